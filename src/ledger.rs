//! The ledger
//!
//! Owns the transaction store and the budget registry, and is the only way
//! to mutate either. Queries hand out borrowed slices or owned snapshots.
//!
//! There is no internal locking: every mutation takes `&mut self`. A host
//! that shares a ledger between threads wraps it in its own `Mutex`.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::error::LedgerResult;
use crate::import::ImportMode;
use crate::models::{
    Category, Money, Month, RecurrenceRule, Transaction, TransactionId, TransactionInput,
    TransactionType,
};
use crate::reports::spending;
use crate::services::budget::{check_budget_overrun, BudgetOverrun};
use crate::storage::{BudgetRegistry, TransactionStore};

/// Transactions created by [`Ledger::add_recurring`]
#[derive(Debug, Clone, Default)]
pub struct RecurringOutcome {
    /// The base transaction followed by each occurrence, in date order
    pub transactions: Vec<Transaction>,
    pub overruns: Vec<BudgetOverrun>,
}

/// Transaction list plus monthly budgets
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: TransactionStore,
    budgets: BudgetRegistry,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger preloaded with `transactions`
    pub fn with_transactions(transactions: impl IntoIterator<Item = Transaction>) -> Self {
        let mut ledger = Self::new();
        ledger.transactions.replace_all(transactions);
        ledger
    }

    // === Transactions ===

    pub fn add(&mut self, txn: Transaction) {
        self.transactions.add(txn);
    }

    /// Add a transaction, then check the budget of its category
    ///
    /// Returns the overrun when a categorized expense takes its month's
    /// spending past a positive budget. The transaction is kept either way.
    pub fn record(&mut self, txn: Transaction) -> Option<BudgetOverrun> {
        let check = match (txn.transaction_type(), txn.category()) {
            (TransactionType::Expense, Some(category)) => Some((txn.month(), category.clone())),
            _ => None,
        };
        self.transactions.add(txn);

        let (month, category) = check?;
        let total = self
            .expenses_by_category(month)
            .get(&category)
            .copied()
            .unwrap_or_default();
        let overrun = check_budget_overrun(month, &category, total, self.budget_for(month, &category));
        if let Some(ref o) = overrun {
            warn!(
                category = %o.category,
                month = %o.month,
                budget = %o.budget,
                spent = %o.expense_total,
                "budget exceeded"
            );
        }
        overrun
    }

    pub fn update(&mut self, txn: Transaction) -> bool {
        self.transactions.update(txn)
    }

    pub fn remove_by_id(&mut self, id: TransactionId) -> bool {
        self.transactions.remove_by_id(id)
    }

    pub fn replace_all(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.transactions.replace_all(transactions);
    }

    /// Merge imported transactions according to `mode`
    pub fn apply_import(&mut self, transactions: Vec<Transaction>, mode: ImportMode) {
        let count = transactions.len();
        match mode {
            ImportMode::Append => {
                for txn in transactions {
                    self.transactions.add(txn);
                }
            }
            ImportMode::Replace => self.transactions.replace_all(transactions),
        }
        info!(count, ?mode, total = self.transactions.len(), "applied import");
    }

    /// Record a standing order: the base transaction plus every occurrence
    ///
    /// Each occurrence is a copy of `input` dated by `rule` with a fresh id.
    /// `cap` bounds rules that have neither an end date nor a count.
    pub fn add_recurring(
        &mut self,
        input: TransactionInput,
        rule: &RecurrenceRule,
        cap: u32,
    ) -> LedgerResult<RecurringOutcome> {
        let dates: Vec<NaiveDate> = std::iter::once(input.date)
            .chain(rule.occurrences_after(input.date, cap))
            .collect();

        // Validate everything before touching the store
        let transactions = dates
            .into_iter()
            .map(|date| {
                Transaction::new(TransactionInput {
                    date,
                    ..input.clone()
                })
            })
            .collect::<LedgerResult<Vec<_>>>()?;

        let mut outcome = RecurringOutcome::default();
        for txn in transactions {
            outcome.transactions.push(txn.clone());
            if let Some(overrun) = self.record(txn) {
                outcome.overruns.push(overrun);
            }
        }
        debug!(
            count = outcome.transactions.len(),
            frequency = %rule.frequency,
            "added recurring transactions"
        );
        Ok(outcome)
    }

    pub fn all(&self) -> &[Transaction] {
        self.transactions.all()
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn filter_by_category(&self, category: &str) -> Vec<&Transaction> {
        self.transactions.filter_by_category(category)
    }

    pub fn filter_by_type(&self, transaction_type: TransactionType) -> Vec<&Transaction> {
        self.transactions.filter_by_type(transaction_type)
    }

    pub fn search_by_description(&self, needle: &str) -> Vec<&Transaction> {
        self.transactions.search_by_description(needle)
    }

    pub fn search(&self, text: &str) -> Vec<&Transaction> {
        self.transactions.search(text)
    }

    pub fn search_balance(&self, text: &str) -> Money {
        self.transactions.search_balance(text)
    }

    // === Aggregation ===

    pub fn monthly_balance(&self, month: Month) -> Money {
        spending::monthly_balance(self.all(), month)
    }

    pub fn expenses_by_category(&self, month: Month) -> BTreeMap<Category, Money> {
        spending::expenses_by_category(self.all(), month)
    }

    pub fn expenses_by_category_all_time(&self) -> spending::CategoryTotals {
        spending::expenses_by_category_all_time(self.all())
    }

    pub fn running_balance(&self) -> Vec<(NaiveDate, Money)> {
        spending::running_balance(self.all())
    }

    // === Budgets ===

    /// Set a month's budget for a category; negative amounts store zero
    pub fn set_budget(&mut self, month: Month, category: Category, amount: Money) {
        self.budgets.set(month, category, amount);
    }

    /// Set a budget from raw input
    ///
    /// A blank name is ignored and a missing amount counts as zero.
    pub fn set_budget_named(
        &mut self,
        month: Month,
        name: &str,
        amount: Option<Money>,
    ) -> LedgerResult<()> {
        let Some(category) = Category::parse_optional(name)? else {
            return Ok(());
        };
        self.set_budget(month, category, amount.unwrap_or_default());
        Ok(())
    }

    pub fn budget_for(&self, month: Month, category: &Category) -> Money {
        self.budgets.get(month, category)
    }

    /// Budget for a raw category name; zero for blank or invalid names
    pub fn budget_for_named(&self, month: Month, name: &str) -> Money {
        match Category::parse_optional(name) {
            Ok(Some(category)) => self.budget_for(month, &category),
            _ => Money::zero(),
        }
    }

    pub fn budgets_for_month(&self, month: Month) -> BTreeMap<Category, Money> {
        self.budgets.for_month(month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use rust_decimal_macros::dec;

    fn jan() -> Month {
        Month::new(2025, 1).unwrap()
    }

    fn cat(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    fn expense(day: u32, amount: Money, category: Option<&str>) -> TransactionInput {
        TransactionInput::new(
            "test",
            amount,
            TransactionType::Expense,
            NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            category.map(cat),
        )
    }

    #[test]
    fn test_record_reports_overrun() {
        let mut ledger = Ledger::new();
        ledger.set_budget(jan(), cat("Groceries"), Money::new(dec!(100)));

        let first = Transaction::new(expense(2, Money::new(dec!(60)), Some("Groceries"))).unwrap();
        assert!(ledger.record(first).is_none());

        let second = Transaction::new(expense(9, Money::new(dec!(50)), Some("Groceries"))).unwrap();
        let overrun = ledger.record(second).unwrap();
        assert_eq!(overrun.expense_total, Money::new(dec!(110)));
        assert_eq!(overrun.budget, Money::new(dec!(100)));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_mixed_case_categories_share_totals_and_budget() {
        let mut ledger = Ledger::new();
        ledger
            .set_budget_named(jan(), "groceries", Some(Money::new(dec!(100))))
            .unwrap();

        let first = Transaction::new(expense(2, Money::new(dec!(80)), Some("Groceries"))).unwrap();
        assert!(ledger.record(first).is_none());
        let second = Transaction::new(expense(3, Money::new(dec!(30)), Some("GROCERIES"))).unwrap();
        let overrun = ledger.record(second).unwrap();
        assert_eq!(overrun.expense_total, Money::new(dec!(110)));

        assert_eq!(ledger.filter_by_category("groceries").len(), 2);
        let totals = ledger.expenses_by_category(jan());
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[&cat("Groceries")], Money::new(dec!(110)));
        assert_eq!(ledger.budget_for(jan(), &cat("Groceries")), Money::new(dec!(100)));
        assert_eq!(ledger.budgets_for_month(jan()).len(), 1);
    }

    #[test]
    fn test_record_without_budget_never_overruns() {
        let mut ledger = Ledger::new();
        let txn = Transaction::new(expense(2, Money::new(dec!(500)), Some("Rent"))).unwrap();
        assert!(ledger.record(txn).is_none());

        let uncategorized = Transaction::new(expense(3, Money::new(dec!(5)), None)).unwrap();
        assert!(ledger.record(uncategorized).is_none());
    }

    #[test]
    fn test_set_budget_named() {
        let mut ledger = Ledger::new();
        ledger.set_budget_named(jan(), "  ", Some(Money::new(dec!(10)))).unwrap();
        assert!(ledger.budgets_for_month(jan()).is_empty());

        ledger.set_budget_named(jan(), "Rent", None).unwrap();
        assert_eq!(ledger.budgets_for_month(jan()).len(), 1);
        assert_eq!(ledger.budget_for_named(jan(), "Rent"), Money::zero());

        ledger.set_budget_named(jan(), "Rent", Some(Money::new(dec!(-20)))).unwrap();
        assert_eq!(ledger.budget_for(jan(), &cat("Rent")), Money::zero());

        assert_eq!(ledger.budget_for_named(jan(), ""), Money::zero());
    }

    #[test]
    fn test_apply_import_modes() {
        let rows: Vec<_> = (1..=3)
            .map(|d| Transaction::new(expense(d, Money::new(dec!(1)), None)).unwrap())
            .collect();

        let mut ledger = Ledger::with_transactions(rows.clone());
        ledger.apply_import(rows.clone(), ImportMode::Append);
        assert_eq!(ledger.len(), 6);

        ledger.apply_import(rows, ImportMode::Replace);
        assert_eq!(ledger.len(), 3);
    }

    #[test]
    fn test_add_recurring() {
        let mut ledger = Ledger::new();
        ledger.set_budget(jan(), cat("Subscriptions"), Money::new(dec!(5)));
        let rule = RecurrenceRule::new(Frequency::Monthly).count(2);

        let outcome = ledger
            .add_recurring(expense(31, Money::new(dec!(9.99)), Some("Subscriptions")), &rule, 120)
            .unwrap();

        let dates: Vec<_> = outcome.transactions.iter().map(|t| t.date()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
            ]
        );
        assert_eq!(ledger.len(), 3);
        assert_eq!(outcome.overruns.len(), 1);
        assert_ne!(outcome.transactions[0].id(), outcome.transactions[1].id());
    }

    #[test]
    fn test_add_recurring_rejects_negative_amount() {
        let mut ledger = Ledger::new();
        let rule = RecurrenceRule::monthly();
        let result = ledger.add_recurring(expense(1, Money::new(dec!(-1)), None), &rule, 120);
        assert!(result.is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_aggregation_delegates() {
        let mut ledger = Ledger::new();
        ledger.add(Transaction::new(expense(2, Money::new(dec!(40)), Some("Health"))).unwrap());
        ledger.add(
            Transaction::new(TransactionInput::new(
                "Pay",
                Money::new(dec!(100)),
                TransactionType::Income,
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                None,
            ))
            .unwrap(),
        );

        assert_eq!(ledger.monthly_balance(jan()), Money::new(dec!(60)));
        assert_eq!(ledger.expenses_by_category(jan()).len(), 1);
        assert_eq!(ledger.running_balance().len(), 2);
        assert_eq!(ledger.search_balance("health"), Money::new(dec!(-40)));
    }
}
