//! Import module
//!
//! Loads transactions from the ledger CSV format. Parsing yields an
//! [`ImportOutcome`]; how the rows are merged into a ledger is decided by
//! [`ImportMode`].

pub mod csv;

use std::fmt;

use crate::models::Transaction;

pub use self::csv::{import_from, read_transactions};

/// How imported rows are merged into an existing ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportMode {
    /// Add every row to the existing transactions, duplicates included
    #[default]
    Append,
    /// Discard the existing transactions first
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Append => write!(f, "append"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

/// A row that could not be imported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFailure {
    /// 1-based line where the record starts
    pub line: u64,
    /// The record's fields rejoined with `;`
    pub content: String,
    pub reason: String,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {} ({})", self.line, self.reason, self.content)
    }
}

/// Result of parsing a ledger file
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Successfully parsed rows, in file order
    pub transactions: Vec<Transaction>,
    pub failures: Vec<RowFailure>,
}

impl ImportOutcome {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
