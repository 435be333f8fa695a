//! Board state aggregate

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use fleetboard_types::BoardError;

use super::fleet::{ContainerId, Slot};
use super::stop::StopList;
use crate::registry::{FleetRegistry, Roster};

/// Everything the board knows: roster, fleets and backlog.
///
/// This is also the read-only snapshot handed to reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub members: Roster,
    #[serde(default)]
    pub fleets: FleetRegistry,
    #[serde(default)]
    pub backlog: StopList,
}

impl BoardState {
    pub fn container(&self, id: &ContainerId) -> Option<&StopList> {
        match id {
            ContainerId::Backlog => Some(&self.backlog),
            ContainerId::Fleet(fleet_id) => self.fleets.get(fleet_id).map(|f| &f.stops),
        }
    }

    pub(crate) fn container_mut(&mut self, id: &ContainerId) -> Option<&mut StopList> {
        match id {
            ContainerId::Backlog => Some(&mut self.backlog),
            ContainerId::Fleet(fleet_id) => self.fleets.get_mut(fleet_id).map(|f| &mut f.stops),
        }
    }

    pub fn container_exists(&self, id: &ContainerId) -> bool {
        self.container(id).is_some()
    }

    /// Container currently holding the stop
    pub fn locate_stop(&self, stop_id: &str) -> Option<ContainerId> {
        if self.backlog.contains(stop_id) {
            return Some(ContainerId::Backlog);
        }
        self.fleets
            .iter()
            .find(|f| f.stops.contains(stop_id))
            .map(|f| ContainerId::fleet(f.id.clone()))
    }

    /// Every stop id across backlog and fleets, backlog first
    pub fn all_stop_ids(&self) -> Vec<String> {
        let mut ids = self.backlog.ids();
        for fleet in self.fleets.iter() {
            ids.extend(fleet.stops.ids());
        }
        ids
    }

    pub fn total_stops(&self) -> usize {
        self.backlog.len() + self.fleets.iter().map(|f| f.stops.len()).sum::<usize>()
    }

    /// Check a state that did not come from board operations (a snapshot).
    ///
    /// Rejects duplicate member, fleet or stop ids, fleet labels equal
    /// ignoring case, slots pointing at unknown members or at a member of
    /// the wrong category, and members seated in more than one slot.
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut member_ids = HashSet::new();
        for member in self.members.iter() {
            if !member_ids.insert(member.id.as_str()) {
                return Err(invalid(format!("member id \"{}\" appears twice", member.id)));
            }
        }

        let mut fleet_ids = HashSet::new();
        let mut labels = HashSet::new();
        for fleet in self.fleets.iter() {
            if !fleet_ids.insert(fleet.id.as_str()) {
                return Err(invalid(format!("fleet id \"{}\" appears twice", fleet.id)));
            }
            if !labels.insert(fleet.number.to_lowercase()) {
                return Err(BoardError::DuplicateFleetNumber(fleet.number.clone()));
            }
        }

        let mut stop_ids = HashSet::new();
        for id in self.all_stop_ids() {
            if !stop_ids.insert(id.clone()) {
                return Err(invalid(format!("stop \"{}\" is held by more than one container", id)));
            }
        }

        let mut seats: HashMap<&str, &str> = HashMap::new();
        for fleet in self.fleets.iter() {
            for slot in Slot::ALL {
                let Some(member_id) = fleet.slot(slot) else {
                    continue;
                };
                let member = self
                    .members
                    .get(member_id)
                    .ok_or_else(|| BoardError::UnknownMember(member_id.to_string()))?;
                if member.category() != slot.category() {
                    return Err(BoardError::RoleMismatch {
                        member: member.name.clone(),
                        role: member.role.label().to_string(),
                        slot: slot.to_string(),
                    });
                }
                if let Some(first) = seats.insert(member_id, fleet.number.as_str()) {
                    return Err(invalid(format!(
                        "{} is seated in both {} and {}",
                        member.name, first, fleet.number
                    )));
                }
            }
        }
        Ok(())
    }
}

fn invalid(message: String) -> BoardError {
    BoardError::InvalidState(message)
}
