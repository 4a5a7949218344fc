//! Filter criteria chosen by the user
//!
//! One set of criteria drives both record streams: the date range applies to
//! income and expenses alike, the category and text queries to their own
//! stream only.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::expense::ExpenseRecord;
use super::income::IncomeRecord;
use super::record_date::RecordDate;

/// User-chosen filters for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower bound; `None` is unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Inclusive upper bound; `None` is unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,

    /// Exact category match; `None` or empty means all categories
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_equals: Option<String>,

    /// Case-insensitive substring matched against income `source`
    #[serde(default)]
    pub income_query: String,

    /// Case-insensitive substring matched against expense `category`
    #[serde(default)]
    pub expense_query: String,
}

impl FilterCriteria {
    /// Criteria that match every record
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, start: NaiveDate) -> Self {
        self.start_date = Some(start);
        self
    }

    pub fn with_end(mut self, end: NaiveDate) -> Self {
        self.end_date = Some(end);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_equals = Some(category.into());
        self
    }

    pub fn with_income_query(mut self, query: impl Into<String>) -> Self {
        self.income_query = query.into();
        self
    }

    pub fn with_expense_query(mut self, query: impl Into<String>) -> Self {
        self.expense_query = query.into();
        self
    }

    /// True when no filter narrows either stream
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.category().is_none()
            && self.income_query.is_empty()
            && self.expense_query.is_empty()
    }

    /// The category to match, treating an empty string as "all"
    pub fn category(&self) -> Option<&str> {
        self.category_equals.as_deref().filter(|c| !c.is_empty())
    }

    /// Check a record date against the range
    ///
    /// The date is only parsed when a bound is present. An invalid date
    /// fails any bound that is applied.
    pub fn matches_date(&self, date: &RecordDate) -> bool {
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }

        let Some(date) = date.parsed() else {
            return false;
        };

        if let Some(start) = self.start_date {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end {
                return false;
            }
        }
        true
    }

    /// Check if an income record matches these criteria
    pub fn matches_income(&self, record: &IncomeRecord) -> bool {
        self.matches_date(&record.date) && contains_ignore_case(&record.source, &self.income_query)
    }

    /// Check if an expense record matches these criteria
    pub fn matches_expense(&self, record: &ExpenseRecord) -> bool {
        if !self.matches_date(&record.date) {
            return false;
        }

        if let Some(category) = self.category() {
            if record.category != category {
                return false;
            }
        }

        contains_ignore_case(&record.category, &self.expense_query)
    }
}

/// Case-insensitive substring test; an empty needle matches everything
fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_empty() {
        let criteria = FilterCriteria::new();
        assert!(criteria.is_empty());
        assert!(FilterCriteria::new().with_category("").is_empty());
        assert!(!FilterCriteria::new().with_category("Food").is_empty());
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let criteria = FilterCriteria::new()
            .with_start(ymd(2024, 1, 1))
            .with_end(ymd(2024, 1, 31));

        assert!(criteria.matches_date(&"2024-01-01".into()));
        assert!(criteria.matches_date(&"2024-01-31".into()));
        assert!(!criteria.matches_date(&"2023-12-31".into()));
        assert!(!criteria.matches_date(&"2024-02-01".into()));
    }

    #[test]
    fn test_invalid_date_only_fails_applied_bounds() {
        let bad: RecordDate = "garbage".into();
        assert!(FilterCriteria::new().matches_date(&bad));
        assert!(!FilterCriteria::new().with_start(ymd(2024, 1, 1)).matches_date(&bad));
        assert!(!FilterCriteria::new().with_end(ymd(2024, 1, 1)).matches_date(&bad));
    }

    #[test]
    fn test_income_text_query_ignores_case() {
        let record = IncomeRecord::new(1, "Salary", Money::from_cents(100), "2024-01-15");
        assert!(FilterCriteria::new().with_income_query("sal").matches_income(&record));
        assert!(FilterCriteria::new().with_income_query("LARY").matches_income(&record));
        assert!(!FilterCriteria::new().with_income_query("bonus").matches_income(&record));
    }

    #[test]
    fn test_expense_category_is_exact() {
        let record = ExpenseRecord::new(1, "Food", Money::from_cents(100), "2024-01-15");
        assert!(FilterCriteria::new().with_category("Food").matches_expense(&record));
        assert!(!FilterCriteria::new().with_category("food").matches_expense(&record));
        assert!(FilterCriteria::new().with_category("").matches_expense(&record));
        // Text query does not consult the income source
        assert!(FilterCriteria::new().with_expense_query("oo").matches_expense(&record));
        assert!(FilterCriteria::new().with_income_query("zzz").matches_expense(&record));
    }
}
