//! Storage layer
//!
//! In-memory stores owned by the [`Ledger`](crate::ledger::Ledger), plus
//! atomic file writes for the CSV ledger and the settings file.

pub mod budget;
pub mod file_io;
pub mod transactions;

pub use budget::{BudgetKey, BudgetRegistry};
pub use file_io::{read_json, write_atomic, write_json_atomic};
pub use transactions::TransactionStore;
