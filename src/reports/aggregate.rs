//! Aggregation over filtered records
//!
//! Every function here is a pure function of its input: no caching, no
//! hidden state. Money sums are integer cent additions, so the same input in
//! the same order always produces the identical output.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{ExpenseRecord, IncomeRecord, Money, Month, MONTHS_PER_YEAR};

/// Twelve calendar-month totals, index 0 = January
pub type MonthlyTotals = [Money; MONTHS_PER_YEAR];

/// Default length of the top-spending ranking
pub const DEFAULT_TOP_LIMIT: usize = 3;

/// Sum amounts into calendar-month buckets, ignoring the year
///
/// Records for which `month_of` returns `None` (unparseable dates) land in
/// no bucket.
pub fn monthly_totals<T, I, A, M>(records: I, amount_of: A, month_of: M) -> MonthlyTotals
where
    I: IntoIterator<Item = T>,
    A: Fn(&T) -> Money,
    M: Fn(&T) -> Option<Month>,
{
    let mut buckets = [Money::zero(); MONTHS_PER_YEAR];
    for record in records {
        if let Some(month) = month_of(&record) {
            buckets[month.index()] += amount_of(&record);
        }
    }
    buckets
}

/// Monthly totals of an income stream
pub fn monthly_income<'a, I>(records: I) -> MonthlyTotals
where
    I: IntoIterator<Item = &'a IncomeRecord>,
{
    monthly_totals(records, |r: &&IncomeRecord| r.amount, |r: &&IncomeRecord| r.month())
}

/// Monthly totals of an expense stream
pub fn monthly_expenses<'a, I>(records: I) -> MonthlyTotals
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    monthly_totals(records, |r: &&ExpenseRecord| r.amount, |r: &&ExpenseRecord| r.month())
}

/// One category's summed spending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
}

/// Spending per category, in first-seen order with unique keys
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CategoryTotal>", into = "Vec<CategoryTotal>")]
pub struct CategoryTotals {
    entries: Vec<CategoryTotal>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an amount to a category, inserting it at the end if new
    pub fn add(&mut self, category: &str, amount: Money) {
        match self.index.get(category) {
            Some(&pos) => self.entries[pos].amount += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push(CategoryTotal {
                    category: category.to_string(),
                    amount,
                });
            }
        }
    }

    /// Total for a category, if it has been seen
    pub fn get(&self, category: &str) -> Option<Money> {
        self.index.get(category).map(|&pos| self.entries[pos].amount)
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryTotal> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

impl From<Vec<CategoryTotal>> for CategoryTotals {
    fn from(entries: Vec<CategoryTotal>) -> Self {
        let mut totals = Self::new();
        for entry in entries {
            totals.add(&entry.category, entry.amount);
        }
        totals
    }
}

impl From<CategoryTotals> for Vec<CategoryTotal> {
    fn from(totals: CategoryTotals) -> Self {
        totals.entries
    }
}

/// Accumulate expense amounts by category
pub fn category_totals<'a, I>(expenses: I) -> CategoryTotals
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut totals = CategoryTotals::new();
    for expense in expenses {
        totals.add(&expense.category, expense.amount);
    }
    totals
}

/// A category in the top-spending ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopCategory {
    pub category: String,
    pub amount: Money,
}

impl TopCategory {
    /// Whether spending is strictly above the threshold
    pub fn exceeds(&self, threshold: Money) -> bool {
        self.amount > threshold
    }
}

/// Rank categories by amount, highest first, keeping at most `limit`
///
/// The sort is stable, so equal amounts keep their first-seen order.
pub fn top_categories(totals: &CategoryTotals, limit: usize) -> Vec<TopCategory> {
    let mut ranked: Vec<&CategoryTotal> = totals.iter().collect();
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));

    ranked
        .into_iter()
        .take(limit)
        .map(|entry| TopCategory {
            category: entry.category.clone(),
            amount: entry.amount,
        })
        .collect()
}

/// Which end of a monthly sequence to look for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    Max,
    Min,
}

/// Month holding the highest or lowest total
///
/// Ties resolve to the earliest month, so an all-zero sequence gives
/// January for both `Max` and `Min`.
pub fn extremal_month(monthly: &MonthlyTotals, kind: Extremum) -> Month {
    let mut best = 0;
    for (index, amount) in monthly.iter().enumerate().skip(1) {
        let better = match kind {
            Extremum::Max => *amount > monthly[best],
            Extremum::Min => *amount < monthly[best],
        };
        if better {
            best = index;
        }
    }
    Month::from_index(best).unwrap_or_default()
}

/// Totals, balance and extremal months of a filtered view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_income: Money,
    pub total_expenses: Money,
    /// `total_income - total_expenses`; may be negative
    pub balance: Money,
    pub highest_income_month: Month,
    pub lowest_income_month: Month,
    pub highest_expense_month: Month,
    pub lowest_expense_month: Month,
}

impl SummaryStatistics {
    /// Build from already computed monthly sequences and totals
    pub fn from_parts(
        total_income: Money,
        total_expenses: Money,
        monthly_income: &MonthlyTotals,
        monthly_expenses: &MonthlyTotals,
    ) -> Self {
        Self {
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            highest_income_month: extremal_month(monthly_income, Extremum::Max),
            lowest_income_month: extremal_month(monthly_income, Extremum::Min),
            highest_expense_month: extremal_month(monthly_expenses, Extremum::Max),
            lowest_expense_month: extremal_month(monthly_expenses, Extremum::Min),
        }
    }
}

/// Summary statistics over filtered income and expenses
///
/// Totals include every record, even those whose date does not parse; the
/// monthly sequences behind the extremal months do not.
pub fn summary_statistics(
    income: &[&IncomeRecord],
    expenses: &[&ExpenseRecord],
) -> SummaryStatistics {
    let total_income: Money = income.iter().map(|r| r.amount).sum();
    let total_expenses: Money = expenses.iter().map(|r| r.amount).sum();

    SummaryStatistics::from_parts(
        total_income,
        total_expenses,
        &monthly_income(income.iter().copied()),
        &monthly_expenses(expenses.iter().copied()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(values: [i64; 12]) -> MonthlyTotals {
        values.map(Money::from_cents)
    }

    fn expense(id: i64, category: &str, amount: i64, date: &str) -> ExpenseRecord {
        ExpenseRecord::new(id, category, Money::from_cents(amount), date)
    }

    #[test]
    fn test_scenario_a_totals() {
        let income = [IncomeRecord::new(1, "Salary", Money::from_cents(100000), "2024-01-15")];
        let expenses = [
            expense(1, "Food", 20000, "2024-01-20"),
            expense(2, "Food", 10000, "2024-02-01"),
        ];
        let income_refs: Vec<_> = income.iter().collect();
        let expense_refs: Vec<_> = expenses.iter().collect();

        let stats = summary_statistics(&income_refs, &expense_refs);
        assert_eq!(stats.total_income.cents(), 100000);
        assert_eq!(stats.total_expenses.cents(), 30000);
        assert_eq!(stats.balance.cents(), 70000);
        assert_eq!(stats.highest_expense_month, Month::JANUARY);

        let totals = category_totals(&expenses);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals.get("Food"), Some(Money::from_cents(30000)));

        let top = top_categories(&totals, DEFAULT_TOP_LIMIT);
        assert_eq!(
            top,
            vec![TopCategory {
                category: "Food".into(),
                amount: Money::from_cents(30000)
            }]
        );
    }

    #[test]
    fn test_scenario_b_years_collapse() {
        let expenses = [
            expense(1, "Food", 1500, "2023-03-10"),
            expense(2, "Food", 2500, "2024-03-15"),
        ];
        let monthly = monthly_expenses(&expenses);

        assert_eq!(monthly[2].cents(), 4000);
        let others: Money = monthly
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 2)
            .map(|(_, m)| *m)
            .sum();
        assert!(others.is_zero());
    }

    #[test]
    fn test_scenario_c_unmatched_category() {
        use crate::models::FilterCriteria;
        use crate::services::filter_expenses;

        let expenses = [
            expense(1, "Food", 20000, "2024-01-20"),
            expense(2, "Food", 10000, "2024-02-01"),
        ];
        let transport = FilterCriteria::new().with_category("Transport");
        let filtered = filter_expenses(&expenses, &transport);

        let totals = category_totals(filtered.iter().copied());
        assert!(totals.is_empty());
        assert!(top_categories(&totals, DEFAULT_TOP_LIMIT).is_empty());

        let stats = summary_statistics(&[], &filtered);
        assert!(stats.total_expenses.is_zero());
        assert_eq!(stats.lowest_expense_month, Month::JANUARY);
    }

    #[test]
    fn test_monthly_sum_matches_record_sum() {
        let expenses = [
            expense(1, "Food", 1234, "2024-01-01"),
            expense(2, "Rent", 99999, "2022-06-30"),
            expense(3, "Food", 1, "2025-12-31"),
            expense(4, "Fun", 700, "2024-06-01"),
        ];
        let monthly = monthly_expenses(&expenses);
        let bucket_sum: Money = monthly.iter().sum();
        let record_sum: Money = expenses.iter().map(|e| e.amount).sum();
        assert_eq!(bucket_sum, record_sum);
    }

    #[test]
    fn test_invalid_dates_skip_buckets_but_count_in_totals() {
        let expenses = [
            expense(1, "Food", 1000, "2024-04-01"),
            expense(2, "Food", 500, "bogus"),
        ];
        let refs: Vec<_> = expenses.iter().collect();

        let monthly = monthly_expenses(refs.iter().copied());
        assert_eq!(monthly.iter().sum::<Money>().cents(), 1000);

        let stats = summary_statistics(&[], &refs);
        assert_eq!(stats.total_expenses.cents(), 1500);
    }

    #[test]
    fn test_category_totals_first_seen_order() {
        let expenses = [
            expense(1, "Transport", 100, "2024-01-01"),
            expense(2, "Food", 200, "2024-01-02"),
            expense(3, "Transport", 300, "2024-01-03"),
            expense(4, "Utilities", 50, "2024-01-04"),
        ];
        let totals = category_totals(&expenses);
        let order: Vec<_> = totals.iter().map(|t| t.category.as_str()).collect();

        assert_eq!(order, vec!["Transport", "Food", "Utilities"]);
        assert_eq!(totals.get("Transport"), Some(Money::from_cents(400)));
        assert_eq!(totals.total().cents(), 650);
    }

    #[test]
    fn test_top_categories_rank_and_truncate() {
        let expenses = [
            expense(1, "A", 100, "2024-01-01"),
            expense(2, "B", 500, "2024-01-01"),
            expense(3, "C", 300, "2024-01-01"),
            expense(4, "D", 300, "2024-01-01"),
            expense(5, "E", 900, "2024-01-01"),
        ];
        let totals = category_totals(&expenses);
        let top = top_categories(&totals, 3);

        let names: Vec<_> = top.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(names, vec!["E", "B", "C"]);
        assert!(top.windows(2).all(|w| w[0].amount >= w[1].amount));

        // Tie between C and D resolves by first-seen order
        let four = top_categories(&totals, 4);
        assert_eq!(four[2].category, "C");
        assert_eq!(four[3].category, "D");

        assert!(top_categories(&totals, 0).is_empty());
        assert_eq!(top_categories(&totals, 10).len(), 5);
    }

    #[test]
    fn test_top_category_threshold() {
        let top = TopCategory {
            category: "Rent".into(),
            amount: Money::from_cents(50000),
        };
        assert!(!top.exceeds(Money::from_cents(50000)));
        assert!(top.exceeds(Money::from_cents(49999)));
    }

    #[test]
    fn test_extremal_month_all_zero_is_january() {
        let zeros = [Money::zero(); 12];
        assert_eq!(extremal_month(&zeros, Extremum::Max), Month::JANUARY);
        assert_eq!(extremal_month(&zeros, Extremum::Min), Month::JANUARY);
    }

    #[test]
    fn test_extremal_month_first_occurrence_wins() {
        let monthly = cents([5, 9, 1, 9, 1, 5, 5, 5, 5, 5, 5, 5]);
        assert_eq!(extremal_month(&monthly, Extremum::Max).index(), 1);
        assert_eq!(extremal_month(&monthly, Extremum::Min).index(), 2);
    }

    #[test]
    fn test_extremal_month_with_sparse_data() {
        // Only March has spending; every other month ties at zero
        let mut monthly = [Money::zero(); 12];
        monthly[2] = Money::from_cents(100);
        assert_eq!(extremal_month(&monthly, Extremum::Max).name(), "March");
        assert_eq!(extremal_month(&monthly, Extremum::Min).name(), "January");
    }

    #[test]
    fn test_aggregation_is_deterministic() {
        let expenses = [
            expense(1, "Food", 1999, "2024-02-29"),
            expense(2, "Fun", 1, "2024-11-11"),
            expense(3, "Food", 333, "2023-02-01"),
        ];
        let first = (
            monthly_expenses(&expenses),
            category_totals(&expenses),
            top_categories(&category_totals(&expenses), 3),
        );
        let second = (
            monthly_expenses(&expenses),
            category_totals(&expenses),
            top_categories(&category_totals(&expenses), 3),
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_negative_amounts_pass_through() {
        let expenses = [expense(1, "Refund", -500, "2024-01-01")];
        let refs: Vec<_> = expenses.iter().collect();
        let stats = summary_statistics(&[], &refs);
        assert_eq!(stats.total_expenses.cents(), -500);
        assert_eq!(stats.balance.cents(), 500);
    }

    #[test]
    fn test_huge_amounts_saturate_instead_of_overflowing() {
        let json = r#"[
            {"id": 1, "category": "Food", "amount": 1e17, "date": "2024-01-01"},
            {"id": 2, "category": "Food", "amount": 1e17, "date": "2024-01-02"}
        ]"#;
        let expenses: Vec<ExpenseRecord> = serde_json::from_str(json).unwrap();
        let refs: Vec<_> = expenses.iter().collect();

        let stats = summary_statistics(&[], &refs);
        assert_eq!(stats.total_expenses, Money::from_cents(i64::MAX));
        assert_eq!(stats.balance, Money::from_cents(-i64::MAX));
        assert_eq!(monthly_expenses(&expenses)[0], Money::from_cents(i64::MAX));
        assert_eq!(
            category_totals(&expenses).get("Food"),
            Some(Money::from_cents(i64::MAX))
        );
    }

    #[test]
    fn test_category_totals_serde_keeps_order() {
        let expenses = [
            expense(1, "Zoo", 100, "2024-01-01"),
            expense(2, "Apples", 200, "2024-01-01"),
        ];
        let totals = category_totals(&expenses);
        let json = serde_json::to_string(&totals).unwrap();
        assert!(json.find("Zoo").unwrap() < json.find("Apples").unwrap());

        let back: CategoryTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, totals);
    }
}
