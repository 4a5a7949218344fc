//! finsight - income and expense analytics
//!
//! Filters fetched income and expense records, aggregates them into monthly
//! and per-category figures, and exports the results as tabular text, a
//! paginated snapshot PDF, or versioned JSON/YAML reports.
//!
//! # Architecture
//!
//! - `config`: path resolution and user settings
//! - `error`: custom error types
//! - `models`: records, money, months and filter criteria
//! - `storage`: the record store and JSON file helpers
//! - `services`: record filtering
//! - `reports`: aggregation and the dashboard report
//! - `export`: CSV, snapshot (layout and PDF), JSON and YAML exports
//! - `display`: terminal formatting helpers
//! - `cli`: command handlers for the `finsight` binary
//!
//! # Example
//!
//! ```rust
//! use finsight::config::Settings;
//! use finsight::models::{ExpenseRecord, FilterCriteria, IncomeRecord, Money};
//! use finsight::reports::DashboardReport;
//! use finsight::storage::RecordStore;
//!
//! let store = RecordStore::new();
//! store.set_income(vec![IncomeRecord::new(1, "Salary", Money::from_cents(100000), "2024-01-15")]);
//! store.set_expenses(vec![ExpenseRecord::new(1, "Food", Money::from_cents(30000), "2024-01-20")]);
//!
//! let report = DashboardReport::generate(&store, &FilterCriteria::new(), &Settings::default());
//! assert_eq!(report.summary.balance, Money::from_cents(70000));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FinsightError, FinsightResult};
