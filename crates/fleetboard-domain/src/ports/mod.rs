//! Port traits defining external boundaries of the domain.
//!
//! Implementations backed by external crates live in `fleetboard-infra`.

pub mod id_gen;

pub use id_gen::{IdGenerator, SequentialIds};
