//! User settings for finsight
//!
//! Manages report preferences: currency symbol, how many top categories to
//! rank, the spending threshold that flags a category, and the page geometry
//! of the snapshot document.

use serde::{Deserialize, Serialize};

use super::paths::FinsightPaths;
use crate::error::FinsightError;
use crate::export::snapshot::PageGeometry;
use crate::models::Money;

/// User settings for finsight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of categories in the top-spending ranking
    #[serde(default = "default_top_category_limit")]
    pub top_category_limit: usize,

    /// Categories spending more than this are flagged
    #[serde(default = "default_spending_threshold")]
    pub spending_threshold: Money,

    /// Snapshot document geometry
    #[serde(default)]
    pub page: PageGeometry,

    /// Whether `finsight init` has been run
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_top_category_limit() -> usize {
    3
}

fn default_spending_threshold() -> Money {
    Money::from_dollars_cents(500, 0)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            top_category_limit: default_top_category_limit(),
            spending_threshold: default_spending_threshold(),
            page: PageGeometry::default(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &FinsightPaths) -> Result<Self, FinsightError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| FinsightError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinsightError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            tracing::debug!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinsightPaths) -> Result<(), FinsightError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinsightError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| FinsightError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
