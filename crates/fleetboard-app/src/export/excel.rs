//! Excel export functionality

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use fleetboard_domain::service::RouteReport;
use fleetboard_domain::Slot;
use fleetboard_types::{Error, Result};

fn xlsx_err(e: rust_xlsxwriter::XlsxError) -> Error {
    Error::Export(e.to_string())
}

/// Export the route report to an Excel file
pub fn export_to_excel(report: &RouteReport, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, report)?;

    let routes_sheet = workbook.add_worksheet();
    write_routes_sheet(routes_sheet, report)?;

    workbook.save(output_path).map_err(xlsx_err)?;

    Ok(())
}

fn write_summary_sheet(sheet: &mut Worksheet, report: &RouteReport) -> Result<()> {
    sheet.set_name("Resumo").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();

    sheet
        .write_string_with_format(0, 0, "Relatório de Rotas", &header_format)
        .map_err(xlsx_err)?;

    let rows: [(&str, String); 5] = [
        ("Data", report.date.format("%d/%m/%Y").to_string()),
        ("Frotas", report.stats.fleets.to_string()),
        ("Rotas ativas", report.routes.len().to_string()),
        ("Entregas em rota", report.total_stops().to_string()),
        ("Entregas pendentes", report.stats.pending_stops.to_string()),
    ];
    for (idx, (label, value)) in rows.iter().enumerate() {
        let row = (idx + 2) as u32;
        sheet.write_string(row, 0, *label).map_err(xlsx_err)?;
        sheet.write_string(row, 1, value).map_err(xlsx_err)?;
    }

    sheet.set_column_width(0, 22).map_err(xlsx_err)?;
    sheet.set_column_width(1, 14).map_err(xlsx_err)?;
    Ok(())
}

fn write_routes_sheet(sheet: &mut Worksheet, report: &RouteReport) -> Result<()> {
    sheet.set_name("Rotas").map_err(xlsx_err)?;

    let header_format = Format::new().set_bold();
    let headers = [
        "Frota",
        "Detalhes da rota",
        "Motorista",
        "Auxiliar",
        "Operador",
        "Seq",
        "Código",
        "Cliente",
        "CEP",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(xlsx_err)?;
    }

    let mut row: u32 = 1;
    for route in &report.routes {
        let crew = [
            route.crew_name(Slot::Driver),
            route.crew_name(Slot::Helper),
            route.crew_name(Slot::Operator),
        ];
        let write_fleet_cells = |sheet: &mut Worksheet, row: u32| -> Result<()> {
            sheet.write_string(row, 0, &route.number).map_err(xlsx_err)?;
            if let Some(details) = &route.route_details {
                sheet.write_string(row, 1, details).map_err(xlsx_err)?;
            }
            for (offset, name) in crew.iter().enumerate() {
                if let Some(name) = name {
                    sheet
                        .write_string(row, 2 + offset as u16, *name)
                        .map_err(xlsx_err)?;
                }
            }
            Ok(())
        };

        if route.stops.is_empty() {
            write_fleet_cells(sheet, row)?;
            row += 1;
            continue;
        }
        for stop in &route.stops {
            write_fleet_cells(sheet, row)?;
            sheet.write_string(row, 5, stop.seq_label()).map_err(xlsx_err)?;
            sheet.write_string(row, 6, &stop.client_code).map_err(xlsx_err)?;
            sheet.write_string(row, 7, &stop.client_name).map_err(xlsx_err)?;
            sheet.write_string(row, 8, &stop.zip_code).map_err(xlsx_err)?;
            row += 1;
        }
    }

    sheet.set_column_width(0, 14).map_err(xlsx_err)?;
    sheet.set_column_width(1, 30).map_err(xlsx_err)?;
    for col in 2..5 {
        sheet.set_column_width(col, 22).map_err(xlsx_err)?;
    }
    sheet.set_column_width(7, 30).map_err(xlsx_err)?;
    Ok(())
}
