//! Route report export

pub mod csv;
pub mod excel;

use std::path::Path;

use fleetboard_domain::service::RouteReport;
use fleetboard_types::{Error, Result};

pub use self::csv::export_to_csv;
pub use self::excel::export_to_excel;

/// Pick the exporter from the file extension (`.csv` or `.xlsx`)
pub fn export_report(report: &RouteReport, output_path: &Path) -> Result<()> {
    let ext = output_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("csv") => export_to_csv(report, output_path),
        Some("xlsx") => export_to_excel(report, output_path),
        _ => Err(Error::Export(format!(
            "Unsupported export format: {} (use .csv or .xlsx)",
            output_path.display()
        ))),
    }
}
