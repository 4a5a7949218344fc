//! CLI commands for exports
//!
//! Without `--output` the export goes to stdout, except the PDF snapshot,
//! which lands in the exports directory. An `--output` naming an existing
//! directory gets the conventional report file name inside it.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::{FinsightPaths, Settings};
use crate::error::{FinsightError, FinsightResult};
use crate::export::{
    export_report_json, export_report_yaml, to_paginated_snapshot, write_snapshot_pdf,
    write_tabular_export, PngFileCapture, REPORT_CSV_FILENAME, REPORT_DOCUMENT_FILENAME,
};
use crate::reports::DashboardReport;
use crate::services::FilteredView;
use crate::storage::RecordStore;

use super::filter::FilterArgs;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export filtered records as CSV (Source,Amount,Date,Type)
    Csv {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export the dashboard report as JSON
    Json {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export the dashboard report as YAML
    Yaml {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lay out a dashboard capture (PNG) across document pages
    Snapshot {
        /// PNG capture of the dashboard
        capture: PathBuf,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Document format
        #[arg(short, long, value_enum, default_value_t = SnapshotFormat::Pdf)]
        format: SnapshotFormat,
    },
}

/// Output format of `export snapshot`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    /// One PDF page per layout page (default file: the exports directory)
    Pdf,
    /// The page layout as JSON with base64 image bytes (default: stdout)
    Layout,
}

/// Handle export commands
pub fn handle_export_command(
    store: &RecordStore,
    settings: &Settings,
    paths: &FinsightPaths,
    cmd: ExportCommands,
) -> FinsightResult<()> {
    match cmd {
        ExportCommands::Csv { filter, output } => handle_export_csv(store, &filter, output),
        ExportCommands::Json {
            filter,
            output,
            pretty,
        } => {
            let report = DashboardReport::generate(store, &filter.to_criteria()?, settings);
            write_output(output, "income_expense_report.json", |w| {
                export_report_json(&report, w, pretty)?;
                writeln!(w).map_err(FinsightError::export)
            })
        }
        ExportCommands::Yaml { filter, output } => {
            let report = DashboardReport::generate(store, &filter.to_criteria()?, settings);
            write_output(output, "income_expense_report.yaml", |w| {
                export_report_yaml(&report, w)
            })
        }
        ExportCommands::Snapshot {
            capture,
            output,
            format,
        } => handle_export_snapshot(&capture, output, format, settings, paths),
    }
}

fn handle_export_csv(
    store: &RecordStore,
    filter: &FilterArgs,
    output: Option<PathBuf>,
) -> FinsightResult<()> {
    let criteria = filter.to_criteria()?;
    let income = store.income();
    let expenses = store.expenses();
    let view = FilteredView::new(&income, &expenses, &criteria);

    write_output(output, REPORT_CSV_FILENAME, |w| {
        write_tabular_export(w, &view.income, &view.expenses)
    })
}

fn handle_export_snapshot(
    capture: &Path,
    output: Option<PathBuf>,
    format: SnapshotFormat,
    settings: &Settings,
    paths: &FinsightPaths,
) -> FinsightResult<()> {
    let (dir, surface) = match (capture.parent(), capture.file_name()) {
        (Some(dir), Some(name)) => (dir.to_path_buf(), name.to_string_lossy().into_owned()),
        _ => {
            return Err(FinsightError::Validation(format!(
                "Invalid capture path: {}",
                capture.display()
            )))
        }
    };

    let capture_source = PngFileCapture::new(dir);
    let Some(document) = to_paginated_snapshot(&surface, &capture_source, &settings.page) else {
        eprintln!("No snapshot from {}; nothing exported.", capture.display());
        return Ok(());
    };

    match format {
        SnapshotFormat::Pdf => {
            let target = match output {
                Some(path) => path,
                None => {
                    paths.ensure_directories()?;
                    paths.exports_dir()
                }
            };
            write_file(target, REPORT_DOCUMENT_FILENAME, |w| {
                write_snapshot_pdf(&document, w)
            })
        }
        SnapshotFormat::Layout => {
            let json = document.export_json()?;
            let default_name = format!("{}.json", REPORT_DOCUMENT_FILENAME);
            write_output(output, &default_name, |w| {
                writeln!(w, "{}", json).map_err(FinsightError::export)
            })
        }
    }
}

/// Run `write` against the chosen destination and flush it
fn write_output<F>(output: Option<PathBuf>, default_name: &str, write: F) -> FinsightResult<()>
where
    F: FnOnce(&mut dyn Write) -> FinsightResult<()>,
{
    match output {
        Some(path) => write_file(path, default_name, write),
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            write(&mut writer)?;
            writer.flush().map_err(FinsightError::export)
        }
    }
}

fn write_file<F>(path: PathBuf, default_name: &str, write: F) -> FinsightResult<()>
where
    F: FnOnce(&mut dyn Write) -> FinsightResult<()>,
{
    let path = if path.is_dir() {
        path.join(default_name)
    } else {
        path
    };
    let file = File::create(&path).map_err(|e| {
        FinsightError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    let mut writer = BufWriter::new(file);
    write(&mut writer)?;
    writer.flush().map_err(FinsightError::export)?;
    eprintln!("Exported to: {}", path.display());
    Ok(())
}
