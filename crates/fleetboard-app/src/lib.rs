//! Application service layer - config, seeding, session scripts, export

pub mod app;
pub mod config;
pub mod constants;
pub mod export;
pub mod repository;

pub use app::{apply_seed, Session, SessionBoard, SessionSummary};
pub use config::Config;
