//! Command handlers

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::info;

use fleetboard_app::config::Config;
use fleetboard_app::export::export_report;
use fleetboard_app::repository::{open_seed, open_snapshot_repo, open_snapshot_repo_at};
use fleetboard_app::{apply_seed, Session};
use fleetboard_domain::repository::SnapshotRepository;
use fleetboard_domain::service::{parse_stop_rows, RouteReport};
use fleetboard_domain::{DispatchBoard, IdGenerator, SequentialIds};
use fleetboard_infra::persistence::FileSnapshotRepository;
use fleetboard_infra::text_source::read_rows_file;
use fleetboard_infra::UuidIdGenerator;
use fleetboard_types::{BoardError, ConfigError, Error, OutputFormat, Result};

use crate::cli::{BoardSource, Cli, Commands};
use crate::output;

pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let format = cli.format.unwrap_or(config.output_format);

    match &cli.command {
        Commands::Board { source } => {
            let session = build_session(&config, source)?;
            output::output_board(format, session.board())
        }

        Commands::Report { source, date } => {
            let session = build_session(&config, source)?;
            let report = RouteReport::build(session.board().state(), report_date(*date));
            output::output_report(format, &report)
        }

        Commands::Run {
            script,
            seed,
            empty,
            sequential_ids,
            snapshot_out,
            save_snapshot,
        } => {
            let snapshot_repo = match snapshot_out {
                Some(path) => Some(open_snapshot_repo_at(path.clone())),
                None if *save_snapshot => Some(open_snapshot_repo(&config)?),
                None => None,
            };
            let source = BoardSource {
                seed: seed.clone(),
                empty: *empty,
                sequential_ids: *sequential_ids,
                ..BoardSource::default()
            };
            cmd_run(&config, &source, script, snapshot_repo, format)
        }

        Commands::Import { file } => cmd_import(file, format),

        Commands::Candidates { fleet, slot, source } => {
            let session = build_session(&config, source)?;
            let board = session.board();
            let found = board.fleets().get(fleet).or_else(|| {
                board
                    .naming()
                    .format(fleet)
                    .and_then(|label| board.fleets().find_by_number(&label))
            });
            let Some(found) = found else {
                return Err(BoardError::UnknownFleet(fleet.clone()).into());
            };
            let candidates = board.slot_candidates(&found.id, *slot);
            output::output_candidates(format, found, *slot, &candidates)
        }

        Commands::Roles => output::output_roles(format),

        Commands::Export {
            output,
            source,
            date,
        } => {
            let session = build_session(&config, source)?;
            let report = RouteReport::build(session.board().state(), report_date(*date));
            export_report(&report, output)?;
            println!(
                "Exported {} route(s), {} stop(s) to: {}",
                report.routes.len(),
                report.total_stops(),
                output.display()
            );
            Ok(())
        }

        Commands::Config {
            show,
            set_prefix,
            set_output,
            set_seed,
            set_snapshot,
            set_sequential_ids,
            reset,
        } => cmd_config(
            *show,
            set_prefix.clone(),
            *set_output,
            set_seed.clone(),
            set_snapshot.clone(),
            *set_sequential_ids,
            *reset,
        ),
    }
}

fn report_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Starting board from snapshot, empty, or seed; then the optional script
fn build_session(config: &Config, source: &BoardSource) -> Result<Session> {
    let mut session = if let Some(path) = &source.snapshot {
        let state = open_snapshot_repo_at(path.clone())
            .load()?
            .ok_or_else(|| Error::FileNotFound(path.display().to_string()))?;
        let ids: Box<dyn IdGenerator> = if source.sequential_ids || config.sequential_ids {
            Box::new(SequentialIds::new("s"))
        } else {
            Box::new(UuidIdGenerator::new())
        };
        Session::new(DispatchBoard::with_state(state, ids)?.with_naming(config.naming()))
    } else {
        let mut session = Session::from_config(config, source.sequential_ids);
        if !source.empty {
            let seed = open_seed(config, source.seed.as_deref())?;
            apply_seed(session.board_mut(), &seed)?;
        }
        session
    };

    if let Some(script) = &source.script {
        let summary = session.run_script_file(script)?;
        info!(applied = summary.applied, skipped = summary.skipped, "session script applied");
    }
    Ok(session)
}

fn cmd_run(
    config: &Config,
    source: &BoardSource,
    script: &Path,
    snapshot_repo: Option<FileSnapshotRepository>,
    format: OutputFormat,
) -> Result<()> {
    let mut session = build_session(config, source)?;
    let summary = session.run_script_file(script)?;

    if let Some(repo) = snapshot_repo {
        repo.save(session.board().state())?;
        eprintln!("Snapshot saved to: {}", repo.path().display());
    }

    output::output_run(format, &summary, session.board())
}

fn cmd_import(file: &Path, format: OutputFormat) -> Result<()> {
    let text = read_rows_file(file)?;
    let rows = parse_stop_rows(&text);
    if rows.is_empty() {
        return Err(Error::Import(format!(
            "No rows with a client code or name in {}",
            file.display()
        )));
    }
    output::output_rows(format, &rows)
}

fn cmd_config(
    show: bool,
    set_prefix: Option<String>,
    set_output: Option<OutputFormat>,
    set_seed: Option<PathBuf>,
    set_snapshot: Option<PathBuf>,
    set_sequential_ids: Option<bool>,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(prefix) = set_prefix {
        if prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue("fleet prefix must not be empty".to_string()).into());
        }
        config.fleet_prefix = prefix.trim().to_string();
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(seed) = set_seed {
        config.seed_path = Some(seed);
        modified = true;
    }

    if let Some(snapshot) = set_snapshot {
        config.snapshot_path = Some(snapshot);
        modified = true;
    }

    if let Some(sequential) = set_sequential_ids {
        config.sequential_ids = sequential;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration saved");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}
