//! Registries backing the dispatch board

pub mod fleet_registry;
pub mod roster;

pub use fleet_registry::FleetRegistry;
pub use roster::Roster;
