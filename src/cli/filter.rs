//! Filter flags shared by the report and export commands

use chrono::NaiveDate;
use clap::Args;

use crate::error::{FinsightError, FinsightResult};
use crate::models::FilterCriteria;

/// Filter flags accepted by every command that reads records
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Earliest date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: Option<String>,

    /// Latest date to include (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: Option<String>,

    /// Only expenses in exactly this category (e.g. Food, Transport)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case-insensitive text matched against income sources
    #[arg(long, default_value = "")]
    pub income_search: String,

    /// Case-insensitive text matched against expense categories
    #[arg(long, default_value = "")]
    pub expense_search: String,
}

impl FilterArgs {
    /// Validate the flags and build filter criteria
    pub fn to_criteria(&self) -> FinsightResult<FilterCriteria> {
        let mut criteria = FilterCriteria::new()
            .with_income_query(self.income_search.as_str())
            .with_expense_query(self.expense_search.as_str());

        if let Some(start) = &self.start {
            criteria = criteria.with_start(parse_date_arg("start", start)?);
        }
        if let Some(end) = &self.end {
            criteria = criteria.with_end(parse_date_arg("end", end)?);
        }
        if let Some(category) = &self.category {
            criteria = criteria.with_category(category.as_str());
        }

        if let (Some(start), Some(end)) = (criteria.start_date, criteria.end_date) {
            if start > end {
                tracing::warn!(%start, %end, "start date is after end date, nothing will match");
            }
        }

        Ok(criteria)
    }
}

fn parse_date_arg(flag: &str, value: &str) -> FinsightResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        FinsightError::Validation(format!(
            "Invalid {} date format: {}. Use YYYY-MM-DD",
            flag, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_match_everything() {
        let criteria = FilterArgs::default().to_criteria().unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_args_build_criteria() {
        let args = FilterArgs {
            start: Some("2024-01-01".into()),
            end: Some("2024-03-31".into()),
            category: Some("Food".into()),
            income_search: "sal".into(),
            expense_search: String::new(),
        };
        let criteria = args.to_criteria().unwrap();

        assert_eq!(criteria.start_date, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(criteria.end_date, NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(criteria.category(), Some("Food"));
        assert_eq!(criteria.income_query, "sal");
    }

    #[test]
    fn test_bad_date_is_validation_error() {
        let args = FilterArgs {
            end: Some("31/03/2024".into()),
            ..FilterArgs::default()
        };
        let err = args.to_criteria().unwrap_err();

        assert!(err.is_validation());
        assert!(err.to_string().contains("end date"));
    }
}
