//! Dashboard report
//!
//! Bundles everything the income/expense dashboard shows for one set of
//! filter criteria: totals and balance, extremal months, the monthly
//! sequences, category breakdown and top-spending ranking.

use std::io::Write;

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::Settings;
use crate::display::report::{
    double_separator, format_bar, format_header, format_percentage, percentage_of, separator,
};
use crate::error::{FinsightError, FinsightResult};
use crate::models::{ExpenseId, FilterCriteria, IncomeId, Money, Month};
use crate::services::FilteredView;
use crate::storage::RecordStore;

use super::aggregate::{
    category_totals, monthly_expenses, monthly_income, top_categories, CategoryTotals,
    MonthlyTotals, SummaryStatistics,
};

const REPORT_WIDTH: usize = 64;
const BAR_WIDTH: usize = 20;

/// A category in the top-spending ranking, flagged against the threshold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCategory {
    /// 1-based position in the ranking
    pub rank: usize,
    pub category: String,
    pub amount: Money,
    /// Spending is strictly above the configured threshold
    pub over_threshold: bool,
}

/// Dashboard figures for one filtered view
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// Criteria the report was built from
    pub criteria: FilterCriteria,
    /// Income records that passed the filter
    pub income_count: usize,
    /// Expense records that passed the filter
    pub expense_count: usize,
    pub monthly_income: MonthlyTotals,
    pub monthly_expenses: MonthlyTotals,
    pub category_totals: CategoryTotals,
    pub top_categories: Vec<RankedCategory>,
    pub summary: SummaryStatistics,
    pub spending_threshold: Money,
    #[serde(skip)]
    currency_symbol: String,
}

#[derive(Tabled)]
struct TopRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "")]
    flag: &'static str,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Income")]
    income: String,
    #[tabled(rename = "Expenses")]
    expenses: String,
    #[tabled(rename = "Spending")]
    bar: String,
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "ID")]
    id: IncomeId,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: ExpenseId,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Date")]
    date: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "%")]
    share: String,
}

impl DashboardReport {
    /// Filter the store's current snapshot and aggregate it
    pub fn generate(store: &RecordStore, criteria: &FilterCriteria, settings: &Settings) -> Self {
        let income = store.income();
        let expenses = store.expenses();
        let view = FilteredView::new(&income, &expenses, criteria);
        Self::from_view(&view, criteria, settings)
    }

    /// Aggregate an already filtered view
    pub fn from_view(
        view: &FilteredView<'_>,
        criteria: &FilterCriteria,
        settings: &Settings,
    ) -> Self {
        let monthly_income = monthly_income(view.income.iter().copied());
        let monthly_expenses = monthly_expenses(view.expenses.iter().copied());
        let category_totals = category_totals(view.expenses.iter().copied());

        let total_income: Money = view.income.iter().map(|r| r.amount).sum();
        let total_expenses: Money = view.expenses.iter().map(|r| r.amount).sum();
        let summary = SummaryStatistics::from_parts(
            total_income,
            total_expenses,
            &monthly_income,
            &monthly_expenses,
        );

        let threshold = settings.spending_threshold;
        let top_categories = top_categories(&category_totals, settings.top_category_limit)
            .into_iter()
            .enumerate()
            .map(|(i, top)| RankedCategory {
                rank: i + 1,
                over_threshold: top.exceeds(threshold),
                category: top.category,
                amount: top.amount,
            })
            .collect();

        Self {
            criteria: criteria.clone(),
            income_count: view.income.len(),
            expense_count: view.expenses.len(),
            monthly_income,
            monthly_expenses,
            category_totals,
            top_categories,
            summary,
            spending_threshold: threshold,
            currency_symbol: settings.currency_symbol.clone(),
        }
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format_header("Income & Expense Summary", REPORT_WIDTH));
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        let s = &self.summary;
        output.push_str(&format!(
            "{:<24} {:>14}  ({} records)\n",
            "Total Income:",
            self.money(s.total_income),
            self.income_count
        ));
        output.push_str(&format!(
            "{:<24} {:>14}  ({} records)\n",
            "Total Expenses:",
            self.money(s.total_expenses),
            self.expense_count
        ));
        output.push_str(&format!("{:<24} {:>14}\n", "Balance:", self.money(s.balance)));
        output.push('\n');
        output.push_str(&format!("{:<24} {}\n", "Highest income month:", s.highest_income_month));
        output.push_str(&format!("{:<24} {}\n", "Lowest income month:", s.lowest_income_month));
        output.push_str(&format!("{:<24} {}\n", "Highest expense month:", s.highest_expense_month));
        output.push_str(&format!("{:<24} {}\n", "Lowest expense month:", s.lowest_expense_month));

        output.push('\n');
        output.push_str(&format!(
            "Top Spending Categories (! = over {})\n",
            self.money(self.spending_threshold)
        ));
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        if self.top_categories.is_empty() {
            output.push_str("No expenses match the current filters.\n");
        } else {
            let rows = self.top_categories.iter().map(|top| TopRow {
                rank: top.rank,
                category: display_category(&top.category),
                amount: self.money(top.amount),
                flag: if top.over_threshold { "!" } else { "" },
            });
            output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
            output.push('\n');
        }

        output.push('\n');
        output.push_str("Monthly Overview\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');
        let peak = self
            .monthly_expenses
            .iter()
            .chain(self.monthly_income.iter())
            .max()
            .copied()
            .unwrap_or_default();
        let rows = Month::all().map(|month| {
            let income = self.monthly_income[month.index()];
            let expenses = self.monthly_expenses[month.index()];
            MonthRow {
                month: month.short_name(),
                income: self.money(income),
                expenses: self.money(expenses),
                bar: format_bar(expenses.cents() as f64, peak.cents() as f64, BAR_WIDTH),
            }
        });
        output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
        output.push('\n');

        if !self.category_totals.is_empty() {
            output.push('\n');
            output.push_str("Spending by Category\n");
            output.push_str(&separator(REPORT_WIDTH));
            output.push('\n');
            let whole = self.category_totals.total().cents();
            let rows = self.category_totals.iter().map(|entry| CategoryRow {
                category: display_category(&entry.category),
                amount: self.money(entry.amount),
                share: format_percentage(percentage_of(entry.amount.cents(), whole)),
            });
            output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
            output.push('\n');
        }

        output
    }

    /// List every record of the view, income first, in filter order
    pub fn format_records(&self, view: &FilteredView<'_>) -> String {
        let mut output = String::new();

        output.push_str(&format_header("Income Records", REPORT_WIDTH));
        output.push('\n');
        if view.income.is_empty() {
            output.push_str("No income matches the current filters.\n");
        } else {
            let rows = view.income.iter().map(|r| IncomeRow {
                id: r.id,
                source: r.source.clone(),
                amount: self.money(r.amount),
                date: r.date.as_str().to_string(),
            });
            output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
            output.push('\n');
        }

        output.push('\n');
        output.push_str(&format_header("Expense Records", REPORT_WIDTH));
        output.push('\n');
        if view.expenses.is_empty() {
            output.push_str("No expenses match the current filters.\n");
        } else {
            let rows = view.expenses.iter().map(|r| ExpenseRow {
                id: r.id,
                category: display_category(&r.category),
                amount: self.money(r.amount),
                date: r.date.as_str().to_string(),
            });
            output.push_str(&Table::new(rows).with(Style::sharp()).to_string());
            output.push('\n');
        }

        output
    }

    /// Export the category breakdown as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> FinsightResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer
            .write_record(["Category", "Amount", "Percentage", "Over Threshold"])
            .map_err(FinsightError::export)?;

        let whole = self.category_totals.total().cents();
        for entry in self.category_totals.iter() {
            let pct = percentage_of(entry.amount.cents(), whole);
            csv_writer
                .write_record([
                    entry.category.clone(),
                    format!("{:.2}", entry.amount.as_decimal()),
                    format!("{:.2}", pct),
                    (entry.amount > self.spending_threshold).to_string(),
                ])
                .map_err(FinsightError::export)?;
        }

        csv_writer.flush().map_err(FinsightError::export)?;
        Ok(())
    }
}

fn display_category(category: &str) -> String {
    if category.is_empty() {
        "(none)".to_string()
    } else {
        category.to_string()
    }
}
