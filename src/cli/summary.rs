//! CLI command for the dashboard summary

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{FinsightError, FinsightResult};
use crate::reports::DashboardReport;
use crate::services::FilteredView;
use crate::storage::RecordStore;

use super::filter::FilterArgs;

/// Arguments of `finsight summary`
#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Show top N categories instead of the configured number
    #[arg(long)]
    pub top: Option<usize>,

    /// List the matching income and expense records above the summary
    #[arg(short, long)]
    pub records: bool,

    /// Write the category breakdown to a CSV file instead of printing
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle `finsight summary`
pub fn handle_summary_command(
    store: &RecordStore,
    settings: &Settings,
    args: SummaryArgs,
) -> FinsightResult<()> {
    let criteria = args.filter.to_criteria()?;

    let mut settings = settings.clone();
    if let Some(top) = args.top {
        settings.top_category_limit = top;
    }

    let income = store.income();
    let expenses = store.expenses();
    let view = FilteredView::new(&income, &expenses, &criteria);
    let report = DashboardReport::from_view(&view, &criteria, &settings);

    if let Some(path) = args.output {
        let file = File::create(&path).map_err(|e| {
            FinsightError::Export(format!("Failed to create file {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        report.export_csv(&mut writer)?;
        println!("Category breakdown exported to: {}", path.display());
    } else {
        if args.records {
            println!("{}", report.format_records(&view));
        }
        println!("{}", report.format_terminal());
    }

    Ok(())
}
