//! Core data models for finsight
//!
//! Income and expense records as supplied by the backend, the money and date
//! types they are built from, and the filter criteria applied to them.

pub mod expense;
pub mod filter;
pub mod ids;
pub mod income;
pub mod money;
pub mod month;
pub mod record_date;

pub use expense::{ExpenseRecord, KNOWN_CATEGORIES};
pub use filter::FilterCriteria;
pub use ids::{ExpenseId, IncomeId};
pub use income::IncomeRecord;
pub use money::Money;
pub use month::{Month, MONTHS_PER_YEAR};
pub use record_date::RecordDate;
