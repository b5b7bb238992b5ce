//! CLI command handlers
//!
//! Bridges clap argument parsing with the ledger. Every command runs against
//! a [`Session`]: the ledger file loaded into memory plus the settings file
//! beside it.

pub mod budget;
pub mod category;
pub mod export;
pub mod import;
pub mod report;
pub mod transaction;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::config::Settings;
use crate::display::DisplayStyle;
use crate::error::{LedgerError, LedgerResult};
use crate::export::export_to;
use crate::import::import_from;
use crate::ledger::Ledger;
use crate::models::{Frequency, Month, Transaction, TransactionId, TransactionType};
use crate::services::CategoryRegistry;

pub use budget::{handle_budget_command, BudgetArgs};
pub use category::{handle_categories_command, CategoriesArgs};
pub use export::handle_export_command;
pub use import::handle_import_command;
pub use report::{handle_balance_command, handle_history_command, handle_spending_command};
pub use transaction::{
    handle_add_command, handle_edit_command, handle_list_command, handle_remove_command,
    AddArgs, EditArgs, ListArgs,
};

/// Transaction type as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    Income,
    Expense,
}

impl From<TypeArg> for TransactionType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Income => TransactionType::Income,
            TypeArg::Expense => TransactionType::Expense,
        }
    }
}

/// Repetition interval as typed on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FrequencyArg {
    Monthly,
    Yearly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Monthly => Frequency::Monthly,
            FrequencyArg::Yearly => Frequency::Yearly,
        }
    }
}

/// The ledger file and settings a command operates on
pub struct Session {
    pub ledger: Ledger,
    pub settings: Settings,
    pub categories: CategoryRegistry,
    ledger_path: PathBuf,
    settings_path: PathBuf,
    /// Rows of the ledger file that could not be read on open
    unreadable_rows: usize,
    /// Allow saving even though that drops the unreadable rows
    force: bool,
}

impl Session {
    /// Load the ledger file (empty if absent) and its settings
    ///
    /// Unreadable rows are logged and skipped. They are remembered so that
    /// [`save`](Self::save) refuses to overwrite the file without them.
    pub fn open(ledger_path: &Path, settings_path: Option<&Path>) -> LedgerResult<Self> {
        let settings_path = settings_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_settings_path(ledger_path));
        let settings = Settings::load(&settings_path)?;

        let (mut ledger, unreadable_rows) = if ledger_path.exists() {
            let outcome = import_from(ledger_path)?;
            (
                Ledger::with_transactions(outcome.transactions),
                outcome.failures.len(),
            )
        } else {
            (Ledger::new(), 0)
        };
        settings.apply_budgets(&mut ledger);

        Ok(Self {
            ledger,
            categories: settings.category_registry(),
            settings,
            ledger_path: ledger_path.to_path_buf(),
            settings_path,
            unreadable_rows,
            force: false,
        })
    }

    /// Let [`save`](Self::save) drop rows that could not be read
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn unreadable_rows(&self) -> usize {
        self.unreadable_rows
    }

    /// Write the transactions back to the ledger file
    ///
    /// Fails without touching the file when it had unreadable rows, unless
    /// the session was opened with force.
    pub fn save(&self) -> LedgerResult<()> {
        if self.unreadable_rows > 0 && !self.force {
            return Err(LedgerError::Import(format!(
                "{} has {} unreadable row(s) that saving would drop; \
                 fix them or rerun with --force",
                self.ledger_path.display(),
                self.unreadable_rows
            )));
        }
        export_to(&self.ledger_path, self.ledger.all())
    }

    pub fn save_settings(&self) -> LedgerResult<()> {
        self.settings.save(&self.settings_path)
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    pub fn style(&self) -> DisplayStyle<'_> {
        DisplayStyle::from_settings(&self.settings)
    }

    /// Find a transaction by full id or by a unique id prefix
    pub fn find_transaction(&self, id: &str) -> LedgerResult<&Transaction> {
        if let Ok(id) = TransactionId::parse(id) {
            return self
                .ledger
                .get(id)
                .ok_or_else(|| LedgerError::validation(format!("No transaction with id {}", id)));
        }

        let prefix = id.trim().to_lowercase();
        if prefix.is_empty() {
            return Err(LedgerError::validation("Transaction id cannot be empty"));
        }
        let mut matches = self
            .ledger
            .all()
            .iter()
            .filter(|t| t.id().to_string().starts_with(&prefix));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn),
            (None, _) => Err(LedgerError::validation(format!(
                "No transaction with id {}",
                id
            ))),
            (Some(_), Some(_)) => Err(LedgerError::validation(format!(
                "Id prefix '{}' matches more than one transaction",
                id
            ))),
        }
    }
}

/// `ledger.csv` keeps its settings in `ledger.settings.json`
pub fn default_settings_path(ledger_path: &Path) -> PathBuf {
    ledger_path.with_extension("settings.json")
}

/// Parse a YYYY-MM-DD date argument
pub fn parse_date(s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        LedgerError::validation(format!("Invalid date format: '{}'. Use YYYY-MM-DD", s))
    })
}

/// Parse an optional YYYY-MM argument, defaulting to the current month
pub fn parse_month_or_current(month: Option<&str>) -> LedgerResult<Month> {
    match month {
        Some(s) => Ok(Month::parse(s)?),
        None => Ok(Month::current()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionInput};
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn write_ledger(dir: &TempDir, transactions: &[Transaction]) -> PathBuf {
        let path = dir.path().join("ledger.csv");
        export_to(&path, transactions).unwrap();
        path
    }

    fn txn(description: &str) -> Transaction {
        Transaction::new(TransactionInput::new(
            description,
            Money::new(dec!(1)),
            TransactionType::Income,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            None,
        ))
        .unwrap()
    }

    #[test]
    fn test_open_missing_ledger_is_empty() {
        let dir = TempDir::new().unwrap();
        let session = Session::open(&dir.path().join("ledger.csv"), None).unwrap();
        assert!(session.ledger.is_empty());
        assert_eq!(session.settings_path(), dir.path().join("ledger.settings.json"));
        assert_eq!(session.categories.len(), 8);
    }

    #[test]
    fn test_open_and_save_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = write_ledger(&dir, &[txn("a"), txn("b")]);

        let session = Session::open(&path, None).unwrap();
        assert_eq!(session.ledger.len(), 2);
        session.save().unwrap();

        let reopened = Session::open(&path, None).unwrap();
        assert_eq!(reopened.ledger.all(), session.ledger.all());
    }

    #[test]
    fn test_save_refuses_to_drop_unreadable_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_ledger(&dir, &[txn("a")]);
        let mut content = std::fs::read_to_string(&path).unwrap();
        content.push_str("not-an-id;Coffee;3,50;Expense;2025-01-02;Food\n");
        std::fs::write(&path, &content).unwrap();

        let mut session = Session::open(&path, None).unwrap();
        assert_eq!(session.unreadable_rows(), 1);
        session.ledger.add(txn("b"));
        let err = session.save().unwrap_err();
        assert!(matches!(err, LedgerError::Import(_)));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

        let session = session.with_force(true);
        session.save().unwrap();
        let reopened = Session::open(&path, None).unwrap();
        assert_eq!(reopened.unreadable_rows(), 0);
        assert_eq!(reopened.ledger.len(), 2);
    }

    #[test]
    fn test_find_transaction_by_prefix() {
        let dir = TempDir::new().unwrap();
        let t = txn("a");
        let path = write_ledger(&dir, &[t.clone()]);
        let session = Session::open(&path, None).unwrap();

        assert_eq!(session.find_transaction(&t.id().to_string()).unwrap().id(), t.id());
        assert_eq!(session.find_transaction(&t.id().short()).unwrap().id(), t.id());
        assert!(session.find_transaction("zzzz").is_err());
        assert!(session.find_transaction(&TransactionId::new().to_string()).is_err());
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(
            parse_date("2025-02-03").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
        );
        assert!(parse_date("03.02.2025").is_err());
        assert_eq!(
            parse_month_or_current(Some("2025-02")).unwrap(),
            Month::new(2025, 2).unwrap()
        );
        assert_eq!(parse_month_or_current(None).unwrap(), Month::current());
    }
}
