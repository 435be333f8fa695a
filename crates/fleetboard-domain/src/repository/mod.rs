//! Repository trait definitions for board snapshots

use fleetboard_types::Error;

use crate::model::BoardState;

/// Store for read-only board snapshots handed to reporting
pub trait SnapshotRepository {
    /// Write a snapshot of the given state
    fn save(&self, state: &BoardState) -> Result<(), Error>;

    /// Load the stored snapshot, if one exists
    fn load(&self) -> Result<Option<BoardState>, Error>;
}
