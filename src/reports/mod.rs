//! Reports for finsight
//!
//! `aggregate` holds the pure aggregation functions; `dashboard` bundles
//! their results into the report the CLI prints and exports.

pub mod aggregate;
pub mod dashboard;

pub use aggregate::{
    category_totals, extremal_month, monthly_expenses, monthly_income, monthly_totals,
    summary_statistics, top_categories, CategoryTotal, CategoryTotals, Extremum, MonthlyTotals,
    SummaryStatistics, TopCategory, DEFAULT_TOP_LIMIT,
};
pub use dashboard::{DashboardReport, RankedCategory};
