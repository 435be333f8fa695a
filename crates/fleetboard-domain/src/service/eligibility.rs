//! Eligibility of members for fleet slots
//!
//! Pure queries. The board's validated assignment path enforces these
//! answers; presentation code uses them to enable or disable choices.

use serde::Serialize;

use crate::model::{BoardState, Member, Slot};
use crate::registry::FleetRegistry;

/// Whether a member may fill a slot, and why not
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberStatus {
    pub available: bool,
    /// Empty when available
    pub reason: String,
}

impl MemberStatus {
    fn available() -> Self {
        Self {
            available: true,
            reason: String::new(),
        }
    }

    fn unavailable(reason: String) -> Self {
        Self {
            available: false,
            reason,
        }
    }
}

/// Resolve a member's status for `slot` of the fleet `current_fleet_id`.
///
/// `current_slot_value` is the member currently sitting in that slot.
/// Checks run in order: current occupant, assignment in another fleet,
/// different slot in the same fleet.
pub fn member_status(
    fleets: &FleetRegistry,
    member: &Member,
    slot: Slot,
    current_fleet_id: &str,
    current_slot_value: Option<&str>,
) -> MemberStatus {
    if current_slot_value == Some(member.id.as_str()) {
        return MemberStatus::available();
    }

    if let Some((other, _)) = fleets.holder_of(&member.id, Some(current_fleet_id)) {
        return MemberStatus::unavailable(format!("(Em {})", other.number));
    }

    if let Some(current) = fleets.get(current_fleet_id) {
        if let Some(occupied) = current.occupied_slot(&member.id) {
            if occupied.category() != slot.category() {
                return MemberStatus::unavailable(format!(
                    "({} desta frota)",
                    occupied.category().label()
                ));
            }
        }
    }

    MemberStatus::available()
}

/// A selectable option for a slot
#[derive(Debug, Clone, Serialize)]
pub struct SlotCandidate<'a> {
    pub member: &'a Member,
    pub status: MemberStatus,
}

/// Members of the slot's category with their status, in roster order.
/// Unknown fleets yield no candidates.
pub fn slot_candidates<'a>(state: &'a BoardState, fleet_id: &str, slot: Slot) -> Vec<SlotCandidate<'a>> {
    let Some(fleet) = state.fleets.get(fleet_id) else {
        return Vec::new();
    };
    let current = fleet.slot(slot);
    state
        .members
        .candidates(slot.category())
        .into_iter()
        .map(|member| SlotCandidate {
            member,
            status: member_status(&state.fleets, member, slot, fleet_id, current),
        })
        .collect()
}
