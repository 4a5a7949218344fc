//! Holder for the two record collections
//!
//! The fetch collaborator is the only writer. Each setter swaps in a whole
//! new snapshot, so a reader sees either the old or the new collection,
//! never a partial one. Snapshots handed out earlier stay valid after a
//! replacement.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::paths::FinsightPaths;
use crate::error::FinsightResult;
use crate::models::{ExpenseRecord, IncomeRecord};

use super::file_io::read_json;

/// Thread-safe store for fetched income and expense records
#[derive(Debug)]
pub struct RecordStore {
    income: RwLock<Arc<[IncomeRecord]>>,
    expenses: RwLock<Arc<[ExpenseRecord]>>,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_records(Vec::new(), Vec::new())
    }

    /// Create a store pre-populated with both collections
    pub fn with_records(income: Vec<IncomeRecord>, expenses: Vec<ExpenseRecord>) -> Self {
        Self {
            income: RwLock::new(income.into()),
            expenses: RwLock::new(expenses.into()),
        }
    }

    /// Load `income.json` and `expenses.json` from the data directory
    ///
    /// A missing file is an empty collection.
    pub fn load(paths: &FinsightPaths) -> FinsightResult<Self> {
        Self::load_files(paths.income_file(), paths.expenses_file())
    }

    /// Load both collections from explicit JSON files
    pub fn load_files(
        income_path: impl AsRef<Path>,
        expenses_path: impl AsRef<Path>,
    ) -> FinsightResult<Self> {
        let income: Vec<IncomeRecord> = read_json(income_path.as_ref())?;
        let expenses: Vec<ExpenseRecord> = read_json(expenses_path.as_ref())?;

        tracing::debug!(
            income = income.len(),
            expenses = expenses.len(),
            "loaded record collections"
        );

        Ok(Self::with_records(income, expenses))
    }

    /// Replace the income collection
    pub fn set_income(&self, records: Vec<IncomeRecord>) {
        let snapshot: Arc<[IncomeRecord]> = records.into();
        *self.income.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Replace the expense collection
    pub fn set_expenses(&self, records: Vec<ExpenseRecord>) {
        let snapshot: Arc<[ExpenseRecord]> = records.into();
        *self.expenses.write().unwrap_or_else(PoisonError::into_inner) = snapshot;
    }

    /// Current income snapshot
    pub fn income(&self) -> Arc<[IncomeRecord]> {
        let guard = self.income.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Current expense snapshot
    pub fn expenses(&self) -> Arc<[ExpenseRecord]> {
        let guard = self.expenses.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }
}
