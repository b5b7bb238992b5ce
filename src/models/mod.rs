//! Core data models for the ledger
//!
//! Value types for the ledger domain: transactions, amounts, months,
//! categories and recurrence rules.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod recurrence;
pub mod transaction;

pub use category::{Category, CategoryValidationError};
pub use ids::TransactionId;
pub use money::{Money, MoneyParseError, MAX_AMOUNT};
pub use month::{Month, MonthParseError};
pub use recurrence::{Frequency, Occurrences, RecurrenceRule, DEFAULT_RECURRENCE_CAP};
pub use transaction::{Transaction, TransactionInput, TransactionType};
