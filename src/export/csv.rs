//! Tabular record export
//!
//! Writes the filtered records as plain comma-separated text: income rows
//! first, then expense rows, each in filter order. Fields are written
//! verbatim with no quoting, so a comma inside a source or category shifts
//! the columns of that row.

use std::io::Write;

use crate::error::{FinsightError, FinsightResult};
use crate::models::{ExpenseRecord, IncomeRecord};

/// File name the save-as collaborator uses for the tabular export
pub const REPORT_CSV_FILENAME: &str = "income_expense_report.csv";

/// Header row of the tabular export
pub const TABULAR_HEADER: [&str; 4] = ["Source", "Amount", "Date", "Type"];

fn tabular_rows<'a>(
    income: &'a [&'a IncomeRecord],
    expenses: &'a [&'a ExpenseRecord],
) -> impl Iterator<Item = [String; 4]> + 'a {
    let income_rows = income.iter().map(|r| {
        [
            r.source.clone(),
            r.amount.to_plain_string(),
            r.date.as_str().to_string(),
            "Income".to_string(),
        ]
    });
    let expense_rows = expenses.iter().map(|r| {
        [
            r.category.clone(),
            r.amount.to_plain_string(),
            r.date.as_str().to_string(),
            "Expense".to_string(),
        ]
    });
    income_rows.chain(expense_rows)
}

/// Render the filtered records as tabular text
pub fn to_tabular_export(income: &[&IncomeRecord], expenses: &[&ExpenseRecord]) -> String {
    let mut output = TABULAR_HEADER.join(",");
    output.push('\n');
    for row in tabular_rows(income, expenses) {
        output.push_str(&row.join(","));
        output.push('\n');
    }
    output
}

/// Stream the tabular export into any writer
///
/// Produces the same bytes as [`to_tabular_export`].
pub fn write_tabular_export<W: Write>(
    writer: W,
    income: &[&IncomeRecord],
    expenses: &[&ExpenseRecord],
) -> FinsightResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer
        .write_record(TABULAR_HEADER)
        .map_err(FinsightError::export)?;

    let mut rows = 0usize;
    for row in tabular_rows(income, expenses) {
        csv_writer.write_record(&row).map_err(FinsightError::export)?;
        rows += 1;
    }

    csv_writer.flush().map_err(FinsightError::export)?;
    tracing::debug!(rows, "wrote tabular export");
    Ok(())
}
