//! YAML report export
//!
//! Same envelope as the JSON export, with a comment header for readers.

use std::io::Write;

use crate::error::{FinsightError, FinsightResult};
use crate::export::json::ReportExport;
use crate::reports::DashboardReport;

/// Export a dashboard report to YAML
pub fn export_report_yaml<W: Write + ?Sized>(
    report: &DashboardReport,
    writer: &mut W,
) -> FinsightResult<()> {
    let export = ReportExport::new(report);

    writeln!(writer, "# finsight income & expense report").map_err(FinsightError::export)?;
    writeln!(writer, "# Generated: {}", export.generated_at).map_err(FinsightError::export)?;
    writeln!(writer, "# App Version: {}", export.app_version).map_err(FinsightError::export)?;
    writeln!(writer).map_err(FinsightError::export)?;

    serde_yaml::to_writer(writer, &export).map_err(FinsightError::export)?;

    Ok(())
}
