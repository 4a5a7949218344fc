//! Business logic layer for finsight
//!
//! Services sit between the stored records and the reports built from them.

pub mod filter;

pub use filter::{filter_expenses, filter_income, FilteredView};
