//! File-based board snapshot repository
//!
//! Snapshots are JSON hand-offs for reporting; the board itself never
//! reads them back mid-session.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use fleetboard_domain::repository::SnapshotRepository;
use fleetboard_domain::BoardState;
use fleetboard_types::{Error, Result};

/// On-disk snapshot document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub state: BoardState,
}

/// JSON snapshot stored at a fixed path
pub struct FileSnapshotRepository {
    path: PathBuf,
}

impl FileSnapshotRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full document including its timestamp
    pub fn load_snapshot(&self) -> Result<Option<BoardSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let snapshot: BoardSnapshot = serde_json::from_reader(reader)?;
        Ok(Some(snapshot))
    }
}

impl SnapshotRepository for FileSnapshotRepository {
    fn save(&self, state: &BoardState) -> std::result::Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let snapshot = BoardSnapshot {
            generated_at: Utc::now(),
            state: state.clone(),
        };
        let file = File::create(&self.path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, &snapshot)?;
        info!(path = %self.path.display(), "snapshot written");
        Ok(())
    }

    fn load(&self) -> std::result::Result<Option<BoardState>, Error> {
        Ok(self.load_snapshot()?.map(|s| s.state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetboard_domain::{ContainerId, DispatchBoard, MemberRole, SequentialIds, Slot};
    use tempfile::tempdir;

    #[test]
    fn test_missing_snapshot_is_none() {
        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("board.json"));
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load_preserves_board() {
        let mut board = DispatchBoard::new(SequentialIds::new("s"));
        let fleet = board.add_fleet("113", Some("Zona Sul")).unwrap();
        let driver = board.add_member("Jose", MemberRole::Motorista).unwrap();
        board.assign_slot(&fleet.id, Slot::Driver, &driver.id).unwrap();
        let stops = board.import_stops("0451;Supermercado Silva;01310-100\n8821;Padaria Estrela");
        board.move_stop(&stops[0].id, &ContainerId::Backlog, &ContainerId::fleet(&fleet.id));

        let dir = tempdir().unwrap();
        let repo = FileSnapshotRepository::new(dir.path().join("nested").join("board.json"));
        repo.save(board.state()).unwrap();

        let loaded = repo.load().unwrap().unwrap();
        assert_eq!(&loaded, board.state());
    }

    #[test]
    fn test_corrupt_snapshot_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("board.json");
        std::fs::write(&path, "{not json").unwrap();
        let repo = FileSnapshotRepository::new(path);
        assert!(matches!(repo.load(), Err(Error::Json(_))));
    }
}
