//! Record dates as supplied by the backend
//!
//! The raw string is preserved so exports reproduce it byte for byte. Parsing
//! is lenient and calendar-only: a time-of-day or offset suffix is accepted
//! and dropped without any timezone conversion. A string that does not parse
//! is an invalid date; the engine never raises on it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A date string attached to a record, parsed on demand
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    /// Wrap a raw date string
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Build from an already valid calendar date
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// The raw string as received
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date, or `None` if the string is not a recognised date
    pub fn parsed(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.0)
    }

    /// Whether the string parses to a calendar date
    pub fn is_valid(&self) -> bool {
        self.parsed().is_some()
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordDate {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<NaiveDate> for RecordDate {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

/// Parse `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS[.f]` or an RFC 3339 timestamp
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.date_naive())
}
