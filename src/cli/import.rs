//! Import CLI command

use std::path::Path;

use super::Session;
use crate::error::LedgerResult;
use crate::import::{import_from, ImportMode};

pub fn handle_import_command(session: &mut Session, source: &Path, mode: ImportMode) -> LedgerResult<()> {
    let outcome = import_from(source)?;

    let imported = outcome.transactions.len();
    session.ledger.apply_import(outcome.transactions, mode);
    session.save()?;

    println!(
        "Imported {} transactions from {} ({})",
        imported,
        source.display(),
        mode
    );
    if !outcome.failures.is_empty() {
        println!(
            "Skipped {} malformed rows (see warnings above)",
            outcome.failures.len()
        );
    }
    println!("Ledger now holds {} transactions", session.ledger.len());
    Ok(())
}
