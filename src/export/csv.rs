//! CSV Export functionality
//!
//! Writes the ledger file format: a fixed header, then one `;`-separated
//! line per transaction.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::models::Transaction;
use crate::storage::write_atomic;

/// Column header of the ledger file
pub const CSV_HEADER: &str = "ID;Description;Amount;Type;Date;Category";

/// Field separator of the ledger file
pub const CSV_DELIMITER: char = ';';

/// Write transactions in ledger file format
pub fn write_transactions<W: Write>(writer: &mut W, transactions: &[Transaction]) -> LedgerResult<()> {
    writeln!(writer, "{}", CSV_HEADER).map_err(|e| LedgerError::Export(e.to_string()))?;

    for txn in transactions {
        let category = txn.category().map(|c| c.name()).unwrap_or_default();
        writeln!(
            writer,
            "{};{};{};{};{};{}",
            txn.id(),
            escape_csv(txn.description()),
            txn.amount(),
            txn.transaction_type().token(),
            txn.date().format("%Y-%m-%d"),
            escape_csv(category),
        )
        .map_err(|e| LedgerError::Export(e.to_string()))?;
    }

    Ok(())
}

/// Export transactions to `path`, replacing it atomically
pub fn export_to<P: AsRef<Path>>(path: P, transactions: &[Transaction]) -> LedgerResult<()> {
    let path = path.as_ref();
    write_atomic(path, |writer| write_transactions(writer, transactions))?;
    info!(path = %path.display(), count = transactions.len(), "exported transactions");
    Ok(())
}

/// Quote a field if it contains the delimiter, a quote or a line break
fn escape_csv(s: &str) -> String {
    if s.contains(CSV_DELIMITER) || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, TransactionId, TransactionInput, TransactionType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn sample(description: &str, category: Option<&str>) -> Transaction {
        Transaction::with_id(
            TransactionId::parse("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
            TransactionInput::new(
                description,
                Money::new(dec!(12.50)),
                TransactionType::Expense,
                NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
                category.map(|c| Category::new(c).unwrap()),
            ),
        )
        .unwrap()
    }

    fn export_string(transactions: &[Transaction]) -> String {
        let mut buffer = Vec::new();
        write_transactions(&mut buffer, transactions).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_export_plain_row() {
        let csv = export_string(&[sample("Lunch", Some("Groceries"))]);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(
            lines[1],
            "67e55044-10b1-426f-9247-bb680e5fe0c8;Lunch;12.50;Expense;2025-01-15;Groceries"
        );
    }

    #[test]
    fn test_export_unset_category_is_empty() {
        let csv = export_string(&[sample("Lunch", None)]);
        assert!(csv.lines().nth(1).unwrap().ends_with("2025-01-15;"));
    }

    #[test]
    fn test_export_quotes_special_fields() {
        let csv = export_string(&[sample("Say \"hi\"; then\nleave", None)]);
        assert!(csv.contains(";\"Say \"\"hi\"\"; then\nleave\";"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a;b"), "\"a;b\"");
        assert_eq!(escape_csv("a\r\nb"), "\"a\r\nb\"");
        assert_eq!(escape_csv(""), "");
    }

    #[test]
    fn test_export_to_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.csv");

        export_to(&path, &[sample("Lunch", None)]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(export_string(&[]), format!("{}\n", CSV_HEADER));
    }
}
