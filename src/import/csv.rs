//! CSV Import functionality
//!
//! Reads the ledger file format back into transactions. A malformed row is
//! recorded as a [`RowFailure`] and skipped; only I/O failures abort.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use ::csv::{ByteRecord, ReaderBuilder};
use chrono::NaiveDate;
use tracing::{info, warn};

use super::{ImportOutcome, RowFailure};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Money, Transaction, TransactionId, TransactionInput, TransactionType,
};

/// Number of columns a ledger row must have
pub const EXPECTED_FIELDS: usize = 6;

/// Date format of the ledger file
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse ledger CSV from a reader
///
/// The first record is the header and is dropped without inspection.
pub fn read_transactions<R: Read>(reader: R) -> LedgerResult<ImportOutcome> {
    let mut csv_reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut outcome = ImportOutcome::default();

    for result in csv_reader.byte_records() {
        let record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                record_failure(&mut outcome, line, String::new(), e.to_string());
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or_default();
        match parse_record(&record) {
            Ok(txn) => outcome.transactions.push(txn),
            Err(reason) => record_failure(&mut outcome, line, raw_content(&record), reason),
        }
    }

    Ok(outcome)
}

/// Import the ledger file at `path`
pub fn import_from<P: AsRef<Path>>(path: P) -> LedgerResult<ImportOutcome> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| LedgerError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let outcome = read_transactions(BufReader::new(file))?;
    info!(
        path = %path.display(),
        imported = outcome.transactions.len(),
        failed = outcome.failures.len(),
        "imported transactions"
    );
    Ok(outcome)
}

fn record_failure(outcome: &mut ImportOutcome, line: u64, content: String, reason: String) {
    warn!(line, %content, %reason, "skipping CSV row");
    outcome.failures.push(RowFailure {
        line,
        content,
        reason,
    });
}

fn parse_record(record: &ByteRecord) -> Result<Transaction, String> {
    if record.len() < EXPECTED_FIELDS {
        return Err(format!(
            "Expected {} fields, found {}",
            EXPECTED_FIELDS,
            record.len()
        ));
    }

    let id = field(record, 0, "ID")?;
    let id = TransactionId::parse(id).map_err(|e| format!("Invalid ID '{}': {}", id.trim(), e))?;

    // Kept verbatim so descriptions round-trip exactly
    let description = field(record, 1, "Description")?.to_string();

    let amount = Money::parse(field(record, 2, "Amount")?).map_err(|e| e.to_string())?;

    let transaction_type = field(record, 3, "Type")?
        .trim()
        .parse::<TransactionType>()
        .map_err(|e| e.to_string())?;

    let date = field(record, 4, "Date")?.trim();
    let date = NaiveDate::parse_from_str(date, CSV_DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date))?;

    let category = Category::parse_optional(field(record, 5, "Category")?).map_err(|e| e.to_string())?;

    Transaction::with_id(
        id,
        TransactionInput {
            description,
            amount,
            transaction_type,
            date,
            category,
        },
    )
    .map_err(|e| e.to_string())
}

fn field<'r>(record: &'r ByteRecord, index: usize, name: &str) -> Result<&'r str, String> {
    let bytes = record
        .get(index)
        .ok_or_else(|| format!("Missing {} field", name))?;
    std::str::from_utf8(bytes).map_err(|_| format!("{} field is not valid UTF-8", name))
}

fn is_blank(record: &ByteRecord) -> bool {
    record
        .iter()
        .all(|f| f.iter().all(|b| b.is_ascii_whitespace()))
}

fn raw_content(record: &ByteRecord) -> String {
    record
        .iter()
        .map(String::from_utf8_lossy)
        .collect::<Vec<_>>()
        .join(";")
}
