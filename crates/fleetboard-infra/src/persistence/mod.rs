//! Persistence implementations
//!
//! File-based implementations of the domain repository traits.

mod file_snapshot_repo;

pub use file_snapshot_repo::{BoardSnapshot, FileSnapshotRepository};
