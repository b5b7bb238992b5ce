//! Budget Ledger - personal finance ledger and budget engine
//!
//! Records dated income and expense transactions, derives monthly balances
//! and per-category spending, and compares spending against monthly budgets.
//! Transactions persist to a single `;`-separated CSV file.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Value types (transactions, money, months, categories, recurrence)
//! - `storage`: In-memory stores and atomic file writes
//! - `ledger`: The [`Ledger`] that owns transactions and budgets
//! - `reports`: Aggregations over the transaction list
//! - `services`: Budget arithmetic and the category registry
//! - `import` / `export`: The CSV codec
//! - `config`: User settings
//! - `cli` / `display`: The command-line front end
//!
//! # Example
//!
//! ```
//! use budget_ledger::models::{Money, Month, Transaction, TransactionInput, TransactionType};
//! use budget_ledger::Ledger;
//! use chrono::NaiveDate;
//! use rust_decimal::Decimal;
//!
//! let mut ledger = Ledger::new();
//! let txn = Transaction::new(TransactionInput::new(
//!     "Salary",
//!     Money::new(Decimal::new(250000, 2)),
//!     TransactionType::Income,
//!     NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
//!     None,
//! ))?;
//! ledger.add(txn);
//!
//! let january = Month::new(2025, 1)?;
//! assert_eq!(ledger.monthly_balance(january).to_string(), "2500.00");
//! # Ok::<(), budget_ledger::LedgerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod import;
pub mod ledger;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub use error::{LedgerError, LedgerResult};
pub use ledger::Ledger;

static TRACING: Once = Once::new();

/// Install the stderr log subscriber
///
/// The filter comes from `RUST_LOG`, falling back to warnings from this
/// crate only. Safe to call more than once.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("budget_ledger=warn"));
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal())
                    .with_target(false),
            )
            .try_init();
    });
}
