//! Domain model types

pub mod fleet;
pub mod member;
pub mod state;
pub mod stop;

pub use fleet::{ContainerId, Fleet, FleetNaming, Slot, BACKLOG_ID};
pub use member::{Member, MemberRole, RoleCategory};
pub use state::BoardState;
pub use stop::{DeliveryStop, StopList};
