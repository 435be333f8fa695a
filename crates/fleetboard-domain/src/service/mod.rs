//! Domain services

pub mod eligibility;
pub mod route_report;
pub mod stop_import;

pub use eligibility::{member_status, slot_candidates, MemberStatus, SlotCandidate};
pub use route_report::{generate_route_report, BoardStats, FleetRoute, RouteReport};
pub use stop_import::{parse_stop_rows, StopRow};
