//! Export CLI command

use std::path::Path;

use super::Session;
use crate::error::LedgerResult;
use crate::export::export_to;

pub fn handle_export_command(session: &Session, dest: &Path) -> LedgerResult<()> {
    export_to(dest, session.ledger.all())?;
    println!(
        "Exported {} transactions to {}",
        session.ledger.len(),
        dest.display()
    );
    Ok(())
}
