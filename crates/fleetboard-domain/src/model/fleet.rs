//! Fleet (vehicle + crew) type definitions

use serde::{Deserialize, Serialize};

use super::member::RoleCategory;
use super::stop::StopList;

/// Reserved container id of the backlog
pub const BACKLOG_ID: &str = "unassigned";

/// One of a fleet's three crew slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Driver,
    Helper,
    Operator,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Driver, Slot::Helper, Slot::Operator];

    /// Category a member must belong to in order to fill this slot
    pub fn category(self) -> RoleCategory {
        match self {
            Slot::Driver => RoleCategory::Driver,
            Slot::Helper => RoleCategory::Helper,
            Slot::Operator => RoleCategory::Operator,
        }
    }

    /// Slot heading as shown on the board
    pub fn label(self) -> &'static str {
        match self {
            Slot::Driver => "Motorista",
            Slot::Helper => "Auxiliar de Distribuição",
            Slot::Operator => "Operador Granel",
        }
    }

    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "driver" | "motorista" => Some(Slot::Driver),
            "helper" | "auxiliar" => Some(Slot::Helper),
            "operator" | "operador" => Some(Slot::Operator),
            _ => None,
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Driver => write!(f, "driver"),
            Slot::Helper => write!(f, "helper"),
            Slot::Operator => write!(f, "operator"),
        }
    }
}

/// A vehicle with its crew, route notes and ordered stops
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    pub id: String,
    /// Formatted label, e.g. "Frota - 113"
    pub number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_details: Option<String>,
    #[serde(default)]
    pub stops: StopList,
}

impl Fleet {
    /// New fleet with empty slots and no stops
    pub fn new(id: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            driver_id: None,
            helper_id: None,
            operator_id: None,
            route_details: None,
            stops: StopList::new(),
        }
    }

    pub fn slot(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::Driver => self.driver_id.as_deref(),
            Slot::Helper => self.helper_id.as_deref(),
            Slot::Operator => self.operator_id.as_deref(),
        }
    }

    pub fn set_slot(&mut self, slot: Slot, member_id: Option<String>) {
        match slot {
            Slot::Driver => self.driver_id = member_id,
            Slot::Helper => self.helper_id = member_id,
            Slot::Operator => self.operator_id = member_id,
        }
    }

    /// Slot this member occupies in this fleet, if any
    pub fn occupied_slot(&self, member_id: &str) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|&slot| self.slot(slot) == Some(member_id))
    }

    /// Clear every slot referencing the member; returns how many were cleared
    pub fn release_member(&mut self, member_id: &str) -> usize {
        let mut cleared = 0;
        for slot in Slot::ALL {
            if self.slot(slot) == Some(member_id) {
                self.set_slot(slot, None);
                cleared += 1;
            }
        }
        cleared
    }

    pub fn has_crew(&self) -> bool {
        Slot::ALL.into_iter().any(|slot| self.slot(slot).is_some())
    }

    /// Numeric part of the label, used for board ordering. Labels without
    /// digits (or with too many to fit) count as zero.
    pub fn number_sort_key(&self) -> u64 {
        let digits: String = self.number.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }
}

/// Where a stop lives: the backlog or a fleet
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ContainerId {
    Backlog,
    Fleet(String),
}

impl ContainerId {
    pub fn fleet(id: impl Into<String>) -> Self {
        ContainerId::Fleet(id.into())
    }

    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed == BACKLOG_ID {
            ContainerId::Backlog
        } else {
            ContainerId::Fleet(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContainerId::Backlog => BACKLOG_ID,
            ContainerId::Fleet(id) => id,
        }
    }
}

impl From<String> for ContainerId {
    fn from(value: String) -> Self {
        ContainerId::parse(&value)
    }
}

impl From<ContainerId> for String {
    fn from(value: ContainerId) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical fleet label formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FleetNaming {
    /// Labels already starting with this (any case) are kept as typed
    pub prefix: String,
    pub separator: String,
}

impl Default for FleetNaming {
    fn default() -> Self {
        Self {
            prefix: "Frota".to_string(),
            separator: " - ".to_string(),
        }
    }
}

impl FleetNaming {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Format user input into a fleet label. Returns `None` for blank input.
    pub fn format(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.to_lowercase().starts_with(&self.prefix.to_lowercase()) {
            Some(trimmed.to_string())
        } else {
            Some(format!("{}{}{}", self.prefix, self.separator, trimmed))
        }
    }
}
