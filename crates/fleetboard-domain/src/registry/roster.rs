//! Roster of team members

use serde::{Deserialize, Serialize};

use crate::model::{Member, RoleCategory};
use crate::service::route_report::UNKNOWN_MEMBER;

/// Registered members in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(Vec<Member>);

impl Roster {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Member] {
        &self.0
    }

    pub fn get(&self, id: &str) -> Option<&Member> {
        self.0.iter().find(|m| m.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// First member with this exact name
    pub fn find_by_name(&self, name: &str) -> Option<&Member> {
        let name = name.trim();
        self.0.iter().find(|m| m.name == name)
    }

    pub(crate) fn push(&mut self, member: Member) {
        self.0.push(member);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Member> {
        let idx = self.0.iter().position(|m| m.id == id)?;
        Some(self.0.remove(idx))
    }

    /// Name for display; dangling ids read as "Não identificado"
    pub fn member_name(&self, id: &str) -> &str {
        self.get(id).map(|m| m.name.as_str()).unwrap_or(UNKNOWN_MEMBER)
    }

    /// Members whose role maps to the category, in roster order
    pub fn candidates(&self, category: RoleCategory) -> Vec<&Member> {
        self.0.iter().filter(|m| m.category() == category).collect()
    }
}

impl From<Vec<Member>> for Roster {
    fn from(members: Vec<Member>) -> Self {
        Self(members)
    }
}
