//! Built-in data

pub mod demo_board;

pub use demo_board::{demo_seed, DEMO_SEED_TOML};
