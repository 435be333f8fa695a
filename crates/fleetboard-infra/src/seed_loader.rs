//! Board seed loader from TOML
//!
//! A seed describes the starting roster, fleets and stops of a session:
//!
//! ```toml
//! [[members]]
//! name = "Jose de Arimateia"
//! role = "Motorista"
//!
//! [[fleets]]
//! number = "113"
//! route_details = "Zona Sul - Rota prioritária"
//! driver = "Jose de Arimateia"
//!
//! [[stops]]
//! client_code = "0451"
//! client_name = "Supermercado Silva"
//! zip_code = "01310-100"
//! fleet = "113"
//! ```
//!
//! Crew members are referenced by name and stops by fleet number; a stop
//! without `fleet` starts in the backlog.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use fleetboard_domain::MemberRole;
use fleetboard_types::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct SeedMember {
    pub name: String,
    pub role: String,
}

impl SeedMember {
    /// Parsed role; validated when the seed is loaded
    pub fn role(&self) -> Option<MemberRole> {
        MemberRole::parse(&self.role)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedFleet {
    pub number: String,
    #[serde(default)]
    pub route_details: Option<String>,
    #[serde(default)]
    pub driver: Option<String>,
    #[serde(default)]
    pub helper: Option<String>,
    #[serde(default)]
    pub operator: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedStop {
    #[serde(default)]
    pub client_code: String,
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub fleet: Option<String>,
}

/// Parsed seed file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardSeed {
    #[serde(default)]
    pub members: Vec<SeedMember>,
    #[serde(default)]
    pub fleets: Vec<SeedFleet>,
    #[serde(default)]
    pub stops: Vec<SeedStop>,
}

impl BoardSeed {
    /// Load a seed from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Seed(format!("Failed to read seed file {}: {}", path.display(), e))
        })?;
        Self::load_from_str(&content)
    }

    /// Load a seed from a TOML string
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let seed: BoardSeed = toml::from_str(toml_content)
            .map_err(|e| Error::Seed(format!("Failed to parse seed TOML: {}", e)))?;

        if let Some(bad) = seed.members.iter().find(|m| m.role().is_none()) {
            return Err(Error::Seed(format!(
                "Unknown role \"{}\" for member \"{}\"",
                bad.role, bad.name
            )));
        }
        Ok(seed)
    }
}
