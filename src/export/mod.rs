//! Export module
//!
//! Serializes the transaction list to the `;`-separated ledger file.

pub mod csv;

pub use csv::{export_to, write_transactions, CSV_DELIMITER, CSV_HEADER};
