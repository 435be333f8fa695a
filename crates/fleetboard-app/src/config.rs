//! Configuration management for fleetboard
//!
//! Config stored at: ~/.config/fleetboard/config.json
//! (`FLEETBOARD_CONFIG` overrides the path)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fleetboard_domain::FleetNaming;
use fleetboard_types::{ConfigError, OutputFormat, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Fleet label prefix ("Frota" → "Frota - 113")
    #[serde(default = "default_fleet_prefix")]
    pub fleet_prefix: String,

    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Seed file loaded when a session starts (optional)
    #[serde(default)]
    pub seed_path: Option<PathBuf>,

    /// Where `--snapshot` writes when no path is given
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,

    /// Use predictable ids (`id-1`, `id-2`, ...) instead of UUIDs
    #[serde(default)]
    pub sequential_ids: bool,
}

fn default_fleet_prefix() -> String {
    FleetNaming::default().prefix
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fleet_prefix: default_fleet_prefix(),
            output_format: OutputFormat::default(),
            seed_path: None,
            snapshot_path: None,
            sequential_ids: false,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("fleetboard");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("FLEETBOARD_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Snapshot path, defaulting to the config directory
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.snapshot_path {
            return Ok(path.clone());
        }
        Ok(Self::config_dir()?.join("board.json"))
    }

    pub fn naming(&self) -> FleetNaming {
        FleetNaming::with_prefix(self.fleet_prefix.clone())
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.fleet_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("fleet_prefix must not be empty".to_string()).into());
        }
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fleetboard Configuration")?;
        writeln!(f, "========================")?;
        writeln!(f)?;
        writeln!(f, "Fleet prefix:   {}", self.fleet_prefix)?;
        writeln!(f, "Output format:  {}", self.output_format)?;
        writeln!(
            f,
            "Seed file:      {}",
            self.seed_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(built-in demo)".to_string())
        )?;
        writeln!(
            f,
            "Snapshot path:  {}",
            self.snapshot_path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Sequential ids: {}", self.sequential_ids)?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:    {}", path.display())?;
        }

        Ok(())
    }
}
