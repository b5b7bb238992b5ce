//! Configuration module
//!
//! User settings persisted as a JSON file next to the ledger.

pub mod settings;

pub use settings::{BudgetSetting, Settings, DEFAULT_CATEGORIES};
