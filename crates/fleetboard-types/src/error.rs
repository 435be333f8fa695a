//! Error types for fleetboard

use thiserror::Error;

/// Rejections raised by board operations.
///
/// Every variant means the operation left the board untouched. Stale
/// references and removals of unknown ids are not errors and never show up
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("{0} must not be empty")]
    Validation(&'static str),

    #[error("A fleet numbered \"{0}\" already exists")]
    DuplicateFleetNumber(String),

    #[error("Fleet not found: {0}")]
    UnknownFleet(String),

    #[error("Member not found: {0}")]
    UnknownMember(String),

    #[error("{member} ({role}) cannot fill the {slot} slot")]
    RoleMismatch {
        member: String,
        role: String,
        slot: String,
    },

    #[error("{member} is unavailable {reason}")]
    MemberUnavailable { member: String, reason: String },

    #[error("The {slot} slot of {fleet} is already taken")]
    SlotOccupied { fleet: String, slot: String },

    /// A loaded state breaks a board invariant
    #[error("Inconsistent board: {0}")]
    InvalidState(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed file error: {0}")]
    Seed(String),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Script line {line}: {message}")]
    Script { line: usize, message: String },

    #[error("File not found: {0}")]
    FileNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
