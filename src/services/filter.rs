//! Record filtering
//!
//! Produces the filtered views the aggregator and exporters work from.
//! Filtering is pure, stable and total: output records are the input
//! records themselves (same identities, same relative order) and an empty
//! result is a valid result.

use crate::models::{ExpenseRecord, FilterCriteria, IncomeRecord};

/// Keep income records inside the date range whose source matches the query
pub fn filter_income<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a IncomeRecord>
where
    I: IntoIterator<Item = &'a IncomeRecord>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches_income(record))
        .collect()
}

/// Keep expense records inside the date range matching category and query
pub fn filter_expenses<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a ExpenseRecord>
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    records
        .into_iter()
        .filter(|record| criteria.matches_expense(record))
        .collect()
}

/// Both record streams after applying one set of criteria
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    pub income: Vec<&'a IncomeRecord>,
    pub expenses: Vec<&'a ExpenseRecord>,
}

impl<'a> FilteredView<'a> {
    /// Filter both collections with the same criteria
    pub fn new(
        income: &'a [IncomeRecord],
        expenses: &'a [ExpenseRecord],
        criteria: &FilterCriteria,
    ) -> Self {
        let view = Self {
            income: filter_income(income, criteria),
            expenses: filter_expenses(expenses, criteria),
        };

        tracing::debug!(
            income_in = income.len(),
            income_out = view.income.len(),
            expenses_in = expenses.len(),
            expenses_out = view.expenses.len(),
            "applied filter criteria"
        );

        view
    }

    /// True when neither stream has any records
    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}
