//! User settings
//!
//! Display preferences, the recurrence safety cap, the category list offered
//! for new transactions, and the monthly budgets (the ledger CSV file only
//! carries transactions).

use std::path::Path;

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Ledger;
use crate::models::{Category, Money, Month, DEFAULT_RECURRENCE_CAP, MAX_AMOUNT};
use crate::services::CategoryRegistry;
use crate::storage::write_json_atomic;

/// Categories offered before the user adds any of their own
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Groceries",
    "Rent",
    "Subscriptions",
    "Transport",
    "Entertainment",
    "Health",
    "Education",
    "Shopping",
];

/// A persisted monthly budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSetting {
    pub month: Month,
    pub category: Category,
    pub amount: Money,
}

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Occurrence limit for recurring transactions with no end
    #[serde(default = "default_recurrence_cap")]
    pub recurrence_cap: u32,

    #[serde(default = "default_categories")]
    pub default_categories: Vec<String>,

    #[serde(default)]
    pub budgets: Vec<BudgetSetting>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recurrence_cap() -> u32 {
    DEFAULT_RECURRENCE_CAP
}

fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recurrence_cap: default_recurrence_cap(),
            default_categories: default_categories(),
            budgets: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults if the file doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> LedgerResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| LedgerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to `path` as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> LedgerResult<()> {
        self.validate()?;
        write_json_atomic(path, self)
    }

    pub fn validate(&self) -> LedgerResult<()> {
        if self.recurrence_cap == 0 {
            return Err(LedgerError::Config(
                "recurrence_cap must be at least 1".into(),
            ));
        }
        if self.date_format.trim().is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error))
        {
            return Err(LedgerError::Config(format!(
                "Invalid date_format '{}'",
                self.date_format
            )));
        }
        if let Some(budget) = self.budgets.iter().find(|b| b.amount.exceeds_limit()) {
            return Err(LedgerError::Config(format!(
                "Budget for '{}' in {} is larger than the maximum of {}",
                budget.category, budget.month, MAX_AMOUNT
            )));
        }
        Ok(())
    }

    /// Store a budget, replacing any entry for the same month and category
    pub fn set_budget(&mut self, month: Month, category: Category, amount: Money) {
        let amount = amount.floor_at_zero();
        match self
            .budgets
            .iter_mut()
            .find(|b| b.month == month && b.category == category)
        {
            Some(existing) => existing.amount = amount,
            None => self.budgets.push(BudgetSetting {
                month,
                category,
                amount,
            }),
        }
    }

    /// Copy the persisted budgets into `ledger`
    pub fn apply_budgets(&self, ledger: &mut Ledger) {
        for budget in &self.budgets {
            ledger.set_budget(budget.month, budget.category.clone(), budget.amount);
        }
    }

    pub fn category_registry(&self) -> CategoryRegistry {
        CategoryRegistry::with_defaults(&self.default_categories)
    }
}
