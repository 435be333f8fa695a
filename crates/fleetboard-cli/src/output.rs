//! Output formatting module

use serde::Serialize;

use fleetboard_app::SessionSummary;
use fleetboard_domain::service::{generate_route_report, BoardStats, RouteReport, SlotCandidate, StopRow};
use fleetboard_domain::{
    DeliveryStop, DispatchBoard, Fleet, IdGenerator, Member, MemberRole, RoleCategory, Slot,
};
use fleetboard_types::{OutputFormat, Result};

/// JSON shape of the board
#[derive(Serialize)]
struct BoardView<'a> {
    stats: BoardStats,
    /// Display order
    fleets: Vec<&'a Fleet>,
    backlog: &'a [DeliveryStop],
    members: &'a [Member],
}

impl<'a> BoardView<'a> {
    fn of<G: IdGenerator>(board: &'a DispatchBoard<G>) -> Self {
        Self {
            stats: BoardStats::of(board.state()),
            fleets: board.fleets_for_display(),
            backlog: board.backlog().as_slice(),
            members: board.members().as_slice(),
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn output_board<G: IdGenerator>(output_format: OutputFormat, board: &DispatchBoard<G>) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(&BoardView::of(board));
    }

    let stats = BoardStats::of(board.state());
    println!("\nDispatch Board");
    println!("==============");
    println!(
        "Fleets: {}   Pending stops: {}   Members: {}",
        stats.fleets, stats.pending_stops, stats.members
    );

    for fleet in board.fleets_for_display() {
        println!();
        match &fleet.route_details {
            Some(details) => println!("{}  ({})", fleet.number, details),
            None => println!("{}", fleet.number),
        }
        for slot in Slot::ALL {
            let name = fleet.slot(slot).map(|id| board.members().member_name(id));
            println!("  {:<26} {}", format!("{}:", slot.label()), name.unwrap_or("-"));
        }
        if fleet.stops.is_empty() {
            println!("  Stops: (none)");
        } else {
            println!("  Stops:");
            for (idx, stop) in fleet.stops.iter().enumerate() {
                println!("    {:02}  {}", idx + 1, stop_line(stop));
            }
        }
    }

    println!("\nBacklog ({})", board.backlog().len());
    println!("-----------");
    if board.backlog().is_empty() {
        println!("  (empty)");
    }
    for stop in board.backlog() {
        println!("  {}", stop_line(stop));
    }

    Ok(())
}

fn stop_line(stop: &DeliveryStop) -> String {
    format!("{:<8} {:<30} {}", stop.client_code, stop.client_name, stop.zip_code)
}

pub fn output_report(output_format: OutputFormat, report: &RouteReport) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(report);
    }
    print!("{}", generate_route_report(report));
    Ok(())
}

pub fn output_run<G: IdGenerator>(
    output_format: OutputFormat,
    summary: &SessionSummary,
    board: &DispatchBoard<G>,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        #[derive(Serialize)]
        struct RunView<'a> {
            summary: &'a SessionSummary,
            board: BoardView<'a>,
        }
        return print_json(&RunView {
            summary,
            board: BoardView::of(board),
        });
    }

    println!(
        "Script finished: {} applied, {} skipped",
        summary.applied, summary.skipped
    );
    output_board(output_format, board)
}

pub fn output_rows(output_format: OutputFormat, rows: &[StopRow]) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(rows);
    }

    println!("\n{} stop(s) parsed", rows.len());
    println!("{:<10} {:<30} {}", "Código", "Cliente", "CEP");
    println!("{}", "-".repeat(52));
    for row in rows {
        println!("{:<10} {:<30} {}", row.client_code, row.client_name, row.zip_code);
    }
    Ok(())
}

pub fn output_candidates(
    output_format: OutputFormat,
    fleet: &Fleet,
    slot: Slot,
    candidates: &[SlotCandidate<'_>],
) -> Result<()> {
    if output_format == OutputFormat::Json {
        return print_json(candidates);
    }

    println!("\n{} / {}", fleet.number, slot.label());
    if candidates.is_empty() {
        println!("  No {} registered", slot.category().label().to_lowercase());
        return Ok(());
    }
    for candidate in candidates {
        let marker = if candidate.status.available { "+" } else { "x" };
        println!(
            "  {} {:<28} {:<26} {}",
            marker, candidate.member.name, candidate.member.role.label(), candidate.status.reason
        );
    }
    Ok(())
}

pub fn output_roles(output_format: OutputFormat) -> Result<()> {
    if output_format == OutputFormat::Json {
        #[derive(Serialize)]
        struct RoleView {
            role: MemberRole,
            label: &'static str,
            category: RoleCategory,
        }
        let roles: Vec<RoleView> = MemberRole::ALL
            .into_iter()
            .map(|role| RoleView {
                role,
                label: role.label(),
                category: role.category(),
            })
            .collect();
        return print_json(&roles);
    }

    for category in RoleCategory::ALL {
        println!("{}:", category.label());
        for role in category.roles() {
            let marker = if role == category.default_role() { " (default)" } else { "" };
            println!("  {}{}", role.label(), marker);
        }
    }
    Ok(())
}
