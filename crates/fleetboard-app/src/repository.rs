//! Repository adapters for persistence layer

use std::path::{Path, PathBuf};

use fleetboard_infra::persistence::FileSnapshotRepository;
use fleetboard_infra::seed_loader::BoardSeed;
use fleetboard_types::Result;

use crate::config::Config;
use crate::constants::demo_seed;

/// Open the snapshot repository at the configured path
pub fn open_snapshot_repo(config: &Config) -> Result<FileSnapshotRepository> {
    Ok(FileSnapshotRepository::new(config.snapshot_path()?))
}

/// Open a snapshot repository at a custom path
pub fn open_snapshot_repo_at(path: PathBuf) -> FileSnapshotRepository {
    FileSnapshotRepository::new(path)
}

/// Seed from an explicit path, else the configured one, else the demo board
pub fn open_seed(config: &Config, path: Option<&Path>) -> Result<BoardSeed> {
    match path.or(config.seed_path.as_deref()) {
        Some(path) => BoardSeed::load_from_file(path),
        None => demo_seed(),
    }
}
