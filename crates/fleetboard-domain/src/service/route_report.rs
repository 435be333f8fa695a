//! Daily route report
//!
//! Builds the per-fleet crew and stop table handed to printing/exporting
//! collaborators, and renders it as plain text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{BoardState, Slot};

/// Shown when a slot references a member no longer on the roster
pub const UNKNOWN_MEMBER: &str = "Não identificado";

/// Board-wide counters (dashboard cards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardStats {
    pub fleets: usize,
    pub pending_stops: usize,
    pub members: usize,
}

impl BoardStats {
    pub fn of(state: &BoardState) -> Self {
        Self {
            fleets: state.fleets.len(),
            pending_stops: state.backlog.len(),
            members: state.members.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewEntry {
    pub slot: Slot,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStop {
    /// 1-based position in the fleet's route
    pub seq: usize,
    pub client_code: String,
    pub client_name: String,
    pub zip_code: String,
}

impl ReportStop {
    /// Zero-padded sequence label ("01", "02", ...)
    pub fn seq_label(&self) -> String {
        format!("{:02}", self.seq)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetRoute {
    pub fleet_id: String,
    pub number: String,
    pub route_details: Option<String>,
    /// Filled slots only, in driver/helper/operator order
    pub crew: Vec<CrewEntry>,
    pub stops: Vec<ReportStop>,
}

impl FleetRoute {
    pub fn crew_name(&self, slot: Slot) -> Option<&str> {
        self.crew
            .iter()
            .find(|c| c.slot == slot)
            .map(|c| c.name.as_str())
    }
}

/// Snapshot of active fleets for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteReport {
    pub date: NaiveDate,
    pub stats: BoardStats,
    pub routes: Vec<FleetRoute>,
}

impl RouteReport {
    /// Active fleets (any crew or at least one stop), highest number first
    /// like the board columns
    pub fn build(state: &BoardState, date: NaiveDate) -> Self {
        let routes = state
            .fleets
            .sorted_for_display()
            .into_iter()
            .filter(|f| f.has_crew() || !f.stops.is_empty())
            .map(|fleet| {
                let crew = Slot::ALL
                    .into_iter()
                    .filter_map(|slot| {
                        fleet.slot(slot).map(|id| CrewEntry {
                            slot,
                            name: state.members.member_name(id).to_string(),
                        })
                    })
                    .collect();
                let stops = fleet
                    .stops
                    .iter()
                    .enumerate()
                    .map(|(idx, stop)| ReportStop {
                        seq: idx + 1,
                        client_code: stop.client_code.clone(),
                        client_name: stop.client_name.clone(),
                        zip_code: stop.zip_code.clone(),
                    })
                    .collect();
                FleetRoute {
                    fleet_id: fleet.id.clone(),
                    number: fleet.number.clone(),
                    route_details: fleet.route_details.clone().filter(|d| !d.is_empty()),
                    crew,
                    stops,
                }
            })
            .collect();

        Self {
            date,
            stats: BoardStats::of(state),
            routes,
        }
    }

    pub fn total_stops(&self) -> usize {
        self.routes.iter().map(|r| r.stops.len()).sum()
    }
}

pub fn generate_route_report(report: &RouteReport) -> String {
    let mut out = String::new();
    out.push_str("==================================================\n");
    out.push_str("               Relatório de Rotas                 \n");
    out.push_str("                 Route Report                     \n");
    out.push_str("==================================================\n");
    out.push_str(&format!("  Data / Date: {}\n\n", report.date.format("%d/%m/%Y")));

    out.push_str("Resumo / Summary\n");
    out.push_str("----------------\n");
    out.push_str(&format!("  Frotas ativas / Active fleets:     {}\n", report.stats.fleets));
    out.push_str(&format!("  Entregas pendentes / Pending:      {}\n", report.stats.pending_stops));
    out.push_str(&format!("  Equipe total / Team members:       {}\n", report.stats.members));
    out.push_str(&format!("  Entregas roteirizadas / Routed:    {}\n\n", report.total_stops()));

    if report.routes.is_empty() {
        out.push_str("  Nenhuma rota ativa. / No active routes.\n\n");
    }

    for route in &report.routes {
        out.push_str(&"-".repeat(60));
        out.push('\n');
        out.push_str(&format!("{}\n", route.number));
        if let Some(details) = &route.route_details {
            out.push_str(&format!("  Rota: {}\n", details));
        }
        for slot in Slot::ALL {
            out.push_str(&format!(
                "  {:<26} {}\n",
                format!("{}:", slot.label()),
                route.crew_name(slot).unwrap_or("-")
            ));
        }
        out.push_str(&format!("\n  Roteiro de Entregas ({})\n", route.stops.len()));
        if route.stops.is_empty() {
            out.push_str("  Sem entregas. / No stops.\n");
        } else {
            out.push_str(&format!(
                "  {:<4} {:<10} {:<30} {:<10}\n",
                "#", "Código", "Cliente", "CEP"
            ));
            for stop in &route.stops {
                out.push_str(&format!(
                    "  {:<4} {:<10} {:<30} {:<10}\n",
                    stop.seq_label(),
                    truncate_str(&stop.client_code, 10),
                    truncate_str(&stop.client_name, 30),
                    stop.zip_code
                ));
            }
        }
        out.push('\n');
    }

    out.push_str("==================================================\n");
    out
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}
