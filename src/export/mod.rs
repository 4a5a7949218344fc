//! Export module for finsight
//!
//! - `csv`: the tabular record export (`Source,Amount,Date,Type`)
//! - `snapshot`: the paginated page layout of a dashboard capture
//! - `pdf`: the snapshot layout rendered as a PDF document
//! - `json` / `yaml`: the dashboard report in a versioned envelope

pub mod csv;
pub mod json;
pub mod pdf;
pub mod snapshot;
pub mod yaml;

pub use csv::{to_tabular_export, write_tabular_export, REPORT_CSV_FILENAME};
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use pdf::{render_snapshot_pdf, write_snapshot_pdf, REPORT_DOCUMENT_TITLE};
pub use snapshot::{
    to_paginated_snapshot, PageGeometry, PagePlacement, PngFileCapture, RasterCapture, RasterImage,
    SnapshotDocument, REPORT_DOCUMENT_FILENAME,
};
pub use yaml::export_report_yaml;
