//! JSON report export
//!
//! Wraps a dashboard report in a versioned envelope for machine consumers.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{FinsightError, FinsightResult};
use crate::reports::DashboardReport;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Versioned envelope around a dashboard report
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a> {
    /// Schema version for compatibility checking
    pub schema_version: &'static str,

    /// Export timestamp
    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: &'static str,

    pub report: &'a DashboardReport,
}

impl<'a> ReportExport<'a> {
    pub fn new(report: &'a DashboardReport) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            report,
        }
    }
}

/// Export a dashboard report to JSON
pub fn export_report_json<W: Write + ?Sized>(
    report: &DashboardReport,
    writer: &mut W,
    pretty: bool,
) -> FinsightResult<()> {
    let export = ReportExport::new(report);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(FinsightError::export)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::{ExpenseRecord, FilterCriteria, Money};
    use crate::storage::RecordStore;

    fn report() -> DashboardReport {
        let store = RecordStore::with_records(
            Vec::new(),
            vec![ExpenseRecord::new(1, "Food", Money::from_cents(1250), "2024-06-03")],
        );
        DashboardReport::generate(&store, &FilterCriteria::new(), &Settings::default())
    }

    #[test]
    fn test_json_envelope() {
        let mut output = Vec::new();
        export_report_json(&report(), &mut output, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["app_version"], env!("CARGO_PKG_VERSION"));
        assert!(value["generated_at"].is_string());
        assert_eq!(value["report"]["expense_count"], 1);
        assert_eq!(value["report"]["top_categories"][0]["category"], "Food");
        assert_eq!(value["report"]["summary"]["highest_expense_month"], 5);
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let mut output = Vec::new();
        export_report_json(&report(), &mut output, true).unwrap();

        assert!(String::from_utf8(output).unwrap().lines().count() > 10);
    }
}
