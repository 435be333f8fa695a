//! CSV export: one row per stop

use std::path::Path;

use serde::Serialize;

use fleetboard_domain::service::{FleetRoute, RouteReport};
use fleetboard_domain::Slot;
use fleetboard_types::{Error, Result};

#[derive(Debug, Serialize)]
struct RouteRow<'a> {
    fleet: &'a str,
    route_details: &'a str,
    driver: &'a str,
    helper: &'a str,
    operator: &'a str,
    seq: String,
    client_code: &'a str,
    client_name: &'a str,
    zip_code: &'a str,
}

impl<'a> RouteRow<'a> {
    fn fleet_only(route: &'a FleetRoute) -> Self {
        Self {
            fleet: &route.number,
            route_details: route.route_details.as_deref().unwrap_or(""),
            driver: route.crew_name(Slot::Driver).unwrap_or(""),
            helper: route.crew_name(Slot::Helper).unwrap_or(""),
            operator: route.crew_name(Slot::Operator).unwrap_or(""),
            seq: String::new(),
            client_code: "",
            client_name: "",
            zip_code: "",
        }
    }
}

/// Write the report as CSV. Crewed fleets without stops still get a row.
pub fn export_to_csv(report: &RouteReport, output_path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(output_path).map_err(|e| Error::Export(e.to_string()))?;

    for route in &report.routes {
        if route.stops.is_empty() {
            writer
                .serialize(RouteRow::fleet_only(route))
                .map_err(|e| Error::Export(e.to_string()))?;
            continue;
        }
        for stop in &route.stops {
            let row = RouteRow {
                seq: stop.seq_label(),
                client_code: &stop.client_code,
                client_name: &stop.client_name,
                zip_code: &stop.zip_code,
                ..RouteRow::fleet_only(route)
            };
            writer.serialize(row).map_err(|e| Error::Export(e.to_string()))?;
        }
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleetboard_domain::{ContainerId, DispatchBoard, MemberRole, SequentialIds};

    #[test]
    fn test_csv_rows() {
        let mut board = DispatchBoard::new(SequentialIds::default());
        let f1 = board.add_fleet("113", Some("Zona Sul")).unwrap();
        let f2 = board.add_fleet("9", None).unwrap();
        let ana = board.add_member("Ana", MemberRole::Motorista).unwrap();
        board.assign_slot(&f2.id, Slot::Driver, &ana.id).unwrap();
        for stop in board.import_stops("0451;Supermercado Silva;01310-100\n8821;Padaria, Estrela") {
            board.move_stop(&stop.id, &ContainerId::Backlog, &ContainerId::fleet(&f1.id));
        }
        let report = RouteReport::build(board.state(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.csv");
        export_to_csv(&report, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines[0],
            "fleet,route_details,driver,helper,operator,seq,client_code,client_name,zip_code"
        );
        assert_eq!(lines[1], "Frota - 113,Zona Sul,,,,01,0451,Supermercado Silva,01310-100");
        assert_eq!(lines[2], "Frota - 113,Zona Sul,,,,02,8821,\"Padaria, Estrela\",");
        assert_eq!(lines[3], "Frota - 9,,Ana,,,,,,");
        assert_eq!(lines.len(), 4);
    }
}
