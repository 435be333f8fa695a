//! Registry of fleets

use serde::{Deserialize, Serialize};

use crate::model::{Fleet, Slot};

/// Fleets in creation order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FleetRegistry(Vec<Fleet>);

impl FleetRegistry {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fleet> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Fleet] {
        &self.0
    }

    pub fn get(&self, id: &str) -> Option<&Fleet> {
        self.0.iter().find(|f| f.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Fleet> {
        self.0.iter_mut().find(|f| f.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Case-insensitive label lookup
    pub fn find_by_number(&self, number: &str) -> Option<&Fleet> {
        let wanted = number.trim().to_lowercase();
        self.0.iter().find(|f| f.number.to_lowercase() == wanted)
    }

    pub(crate) fn push(&mut self, fleet: Fleet) {
        self.0.push(fleet);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Fleet> {
        let idx = self.0.iter().position(|f| f.id == id)?;
        Some(self.0.remove(idx))
    }

    /// Replace the fleet with the same id; false when absent
    pub(crate) fn replace(&mut self, fleet: Fleet) -> bool {
        match self.get_mut(&fleet.id) {
            Some(slot) => {
                *slot = fleet;
                true
            }
            None => false,
        }
    }

    /// Clear the member from every slot of every fleet
    pub(crate) fn release_member(&mut self, member_id: &str) -> usize {
        self.0.iter_mut().map(|f| f.release_member(member_id)).sum()
    }

    /// Fleet (other than `excluding`) holding the member in any slot
    pub fn holder_of(&self, member_id: &str, excluding: Option<&str>) -> Option<(&Fleet, Slot)> {
        self.0
            .iter()
            .filter(|f| Some(f.id.as_str()) != excluding)
            .find_map(|f| f.occupied_slot(member_id).map(|slot| (f, slot)))
    }

    /// Highest fleet number first; ties keep creation order
    pub fn sorted_for_display(&self) -> Vec<&Fleet> {
        let mut fleets: Vec<&Fleet> = self.0.iter().collect();
        fleets.sort_by(|a, b| b.number_sort_key().cmp(&a.number_sort_key()));
        fleets
    }
}

impl From<Vec<Fleet>> for FleetRegistry {
    fn from(fleets: Vec<Fleet>) -> Self {
        Self(fleets)
    }
}
