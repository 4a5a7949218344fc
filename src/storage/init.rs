//! Storage initialization
//!
//! Handles first-run setup: directories plus empty record collections the
//! fetch collaborator can later overwrite.

use crate::config::paths::FinsightPaths;
use crate::error::FinsightError;
use crate::models::{ExpenseRecord, IncomeRecord};

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing record files are left untouched.
pub fn initialize_storage(paths: &FinsightPaths) -> Result<(), FinsightError> {
    paths.ensure_directories()?;

    if !paths.income_file().exists() {
        write_json_atomic(paths.income_file(), &Vec::<IncomeRecord>::new())?;
    }
    if !paths.expenses_file().exists() {
        write_json_atomic(paths.expenses_file(), &Vec::<ExpenseRecord>::new())?;
    }

    tracing::info!(base = %paths.base_dir().display(), "storage initialized");
    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &FinsightPaths) -> bool {
    !paths.income_file().exists() || !paths.expenses_file().exists()
}
