//! Session use cases

pub mod seeding;
pub mod session;

pub use seeding::apply_seed;
pub use session::{Session, SessionBoard, SessionSummary};
