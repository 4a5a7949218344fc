//! CLI command handlers
//!
//! Bridges clap argument parsing with the filter, report and export layers.

pub mod export;
pub mod filter;
pub mod summary;

pub use export::{handle_export_command, ExportCommands, SnapshotFormat};
pub use filter::FilterArgs;
pub use summary::{handle_summary_command, SummaryArgs};
