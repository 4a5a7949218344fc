//! Expense record model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::ExpenseId;
use super::money::{zero_if_null, Money};
use super::month::Month;
use super::record_date::RecordDate;

/// Category names offered by the dashboard's filter dropdown
///
/// The empty string means "all categories". This list is a UI affordance
/// only: filtering accepts any category string.
pub const KNOWN_CATEGORIES: [&str; 5] = ["", "Food", "Transport", "Entertainment", "Utilities"];

/// An expense event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,

    /// Spending category, free text, e.g. "Food"
    #[serde(default)]
    pub category: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: Money,

    #[serde(default)]
    pub date: RecordDate,
}

impl ExpenseRecord {
    /// Create a new expense record
    pub fn new(
        id: i64,
        category: impl Into<String>,
        amount: Money,
        date: impl Into<RecordDate>,
    ) -> Self {
        Self {
            id: ExpenseId::new(id),
            category: category.into(),
            amount,
            date: date.into(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.parsed()
    }

    pub fn month(&self) -> Option<Month> {
        self.parsed_date().map(Month::of)
    }
}
