//! Calendar month index
//!
//! Monthly aggregates are keyed by calendar month only; the year is ignored,
//! so March 2023 and March 2024 share a bucket.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of monthly buckets
pub const MONTHS_PER_YEAR: usize = 12;

const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, index 0 (January) through 11 (December)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(u8);

impl Month {
    pub const JANUARY: Month = Month(0);
    pub const DECEMBER: Month = Month(11);

    /// Create a month from a zero-based index, `None` if out of range
    pub fn from_index(index: usize) -> Option<Self> {
        (index < MONTHS_PER_YEAR).then(|| Self(index as u8))
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self(date.month0() as u8)
    }

    /// Zero-based index into a 12-bucket aggregate
    pub fn index(&self) -> usize {
        usize::from(self.0)
    }

    /// Long English name, e.g. "January"
    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.index()]
    }

    /// Three-letter abbreviation, e.g. "Jan"
    pub fn short_name(&self) -> &'static str {
        &self.name()[..3]
    }

    /// All twelve months in calendar order
    pub fn all() -> impl Iterator<Item = Month> {
        (0..MONTHS_PER_YEAR as u8).map(Month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for Month {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Month::from_index(usize::from(value))
            .ok_or_else(|| format!("month index out of range: {}", value))
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.0
    }
}
