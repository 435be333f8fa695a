//! Fleet dispatch domain: roster, fleets, backlog and the assignment engine

pub mod board;
pub mod model;
pub mod ports;
pub mod registry;
pub mod repository;
pub mod service;

pub use board::{DispatchBoard, MoveOutcome};
pub use model::*;
pub use ports::{IdGenerator, SequentialIds};
pub use registry::{FleetRegistry, Roster};
