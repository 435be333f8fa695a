//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use fleetboard_domain::Slot;
use fleetboard_types::OutputFormat;

fn parse_slot(input: &str) -> Result<Slot, String> {
    Slot::parse(input).ok_or_else(|| format!("unknown slot \"{}\" (use driver, helper or operator)", input))
}

#[derive(Parser)]
#[command(name = "fleetboard")]
#[command(version)]
#[command(about = "Delivery dispatch board: crews, fleets and daily routes")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Verbose output (debug logging; RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Where the board comes from
#[derive(Args, Debug, Clone, Default)]
pub struct BoardSource {
    /// Seed TOML file (defaults to the configured seed, then the demo board)
    #[arg(long, conflicts_with_all = ["snapshot", "empty"])]
    pub seed: Option<PathBuf>,

    /// Start from a JSON snapshot instead of a seed
    #[arg(long, conflicts_with = "empty")]
    pub snapshot: Option<PathBuf>,

    /// Start from an empty board
    #[arg(long)]
    pub empty: bool,

    /// Session script applied on top of the starting board
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Predictable ids (id-1, id-2, ...) instead of UUIDs
    #[arg(long)]
    pub sequential_ids: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show fleets, crews and the backlog
    Board {
        #[command(flatten)]
        source: BoardSource,
    },

    /// Print the daily route report
    Report {
        #[command(flatten)]
        source: BoardSource,

        /// Report date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Run a session script and show the resulting board
    Run {
        /// Script file, one command per line
        script: PathBuf,

        /// Seed TOML file applied before the script
        #[arg(long, conflicts_with = "empty")]
        seed: Option<PathBuf>,

        /// Start from an empty board instead of a seed
        #[arg(long)]
        empty: bool,

        /// Predictable ids (id-1, id-2, ...) instead of UUIDs
        #[arg(long)]
        sequential_ids: bool,

        /// Write a JSON snapshot of the final board
        #[arg(long, short = 'o', conflicts_with = "save_snapshot")]
        snapshot_out: Option<PathBuf>,

        /// Write the snapshot to the configured snapshot path
        #[arg(long)]
        save_snapshot: bool,
    },

    /// Parse a pasted-rows file and show the stops it would create
    Import {
        /// Text file with one row per line (tab, `;` or `,` separated)
        file: PathBuf,
    },

    /// List the members that could fill a fleet slot
    Candidates {
        /// Fleet id or number
        fleet: String,

        /// Slot (driver, helper, operator)
        #[arg(value_parser = parse_slot)]
        slot: Slot,

        #[command(flatten)]
        source: BoardSource,
    },

    /// List member roles and their slot category
    Roles,

    /// Export the route report to .xlsx or .csv
    Export {
        /// Output file; the extension picks the format
        output: PathBuf,

        #[command(flatten)]
        source: BoardSource,

        /// Report date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set the fleet label prefix
        #[arg(long)]
        set_prefix: Option<String>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set the default seed file
        #[arg(long)]
        set_seed: Option<PathBuf>,

        /// Set the default snapshot path
        #[arg(long)]
        set_snapshot: Option<PathBuf>,

        /// Enable/disable sequential ids
        #[arg(long)]
        set_sequential_ids: Option<bool>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}
