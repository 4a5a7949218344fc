//! Income record model
//!
//! A single income event as fetched from the backend. Records are immutable
//! values; a refresh replaces the whole collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::IncomeId;
use super::money::{zero_if_null, Money};
use super::month::Month;
use super::record_date::RecordDate;

/// An income event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: IncomeId,

    /// Where the money came from, e.g. "Salary"
    #[serde(default)]
    pub source: String,

    /// Missing or null amounts count as zero
    #[serde(default, deserialize_with = "zero_if_null")]
    pub amount: Money,

    #[serde(default)]
    pub date: RecordDate,
}

impl IncomeRecord {
    /// Create a new income record
    pub fn new(
        id: i64,
        source: impl Into<String>,
        amount: Money,
        date: impl Into<RecordDate>,
    ) -> Self {
        Self {
            id: IncomeId::new(id),
            source: source.into(),
            amount,
            date: date.into(),
        }
    }

    /// Calendar date, `None` if the record's date does not parse
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.parsed()
    }

    /// Calendar month bucket, `None` if the record's date does not parse
    pub fn month(&self) -> Option<Month> {
        self.parsed_date().map(Month::of)
    }
}
