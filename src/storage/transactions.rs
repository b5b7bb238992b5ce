//! In-memory transaction store
//!
//! Keeps transactions in insertion order. Ids are not indexed: the store is
//! sized for a personal ledger and every query is a linear scan.

use tracing::debug;

use crate::models::{Money, Transaction, TransactionId, TransactionType};

/// Ordered collection of transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transaction. Duplicate ids are not checked.
    pub fn add(&mut self, txn: Transaction) {
        debug!(id = %txn.id(), "adding transaction");
        self.transactions.push(txn);
    }

    /// Remove the first transaction with `id`
    pub fn remove_by_id(&mut self, id: TransactionId) -> bool {
        match self.position(id) {
            Some(index) => {
                self.transactions.remove(index);
                debug!(%id, "removed transaction");
                true
            }
            None => false,
        }
    }

    /// Replace the transaction with the same id, keeping its position
    pub fn update(&mut self, txn: Transaction) -> bool {
        match self.position(txn.id()) {
            Some(index) => {
                debug!(id = %txn.id(), "updated transaction");
                self.transactions[index] = txn;
                true
            }
            None => false,
        }
    }

    /// Drop every transaction and load `transactions` in their place
    pub fn replace_all(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        self.transactions.clear();
        self.transactions.extend(transactions);
        debug!(count = self.transactions.len(), "replaced all transactions");
    }

    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Transactions whose category matches `category` (case-insensitive)
    pub fn filter_by_category(&self, category: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.category().is_some_and(|c| c.matches(category)))
            .collect()
    }

    pub fn filter_by_type(&self, transaction_type: TransactionType) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.transaction_type() == transaction_type)
            .collect()
    }

    /// Case-insensitive substring match on the description
    pub fn search_by_description(&self, needle: &str) -> Vec<&Transaction> {
        let needle = needle.to_lowercase();
        self.transactions
            .iter()
            .filter(|t| t.description().to_lowercase().contains(&needle))
            .collect()
    }

    /// Case-insensitive match against every displayed field
    pub fn search(&self, text: &str) -> Vec<&Transaction> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return self.transactions.iter().collect();
        }
        self.transactions
            .iter()
            .filter(|t| matches_any_field(t, &needle))
            .collect()
    }

    /// Signed sum of the transactions matched by [`search`](Self::search)
    pub fn search_balance(&self, text: &str) -> Money {
        self.search(text).into_iter().map(|t| t.signed_amount()).sum()
    }

    fn position(&self, id: TransactionId) -> Option<usize> {
        self.transactions.iter().position(|t| t.id() == id)
    }
}

fn matches_any_field(txn: &Transaction, needle: &str) -> bool {
    let category = txn.category().map(|c| c.name()).unwrap_or_default();
    [
        txn.description().to_lowercase(),
        txn.amount().to_string(),
        txn.transaction_type().token().to_lowercase(),
        txn.date().format("%Y-%m-%d").to_string(),
        category.to_lowercase(),
    ]
    .iter()
    .any(|field| field.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionInput};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn txn(desc: &str, amount: Money, kind: TransactionType, cat: Option<&str>) -> Transaction {
        Transaction::new(TransactionInput::new(
            desc,
            amount,
            kind,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
            cat.map(|c| Category::new(c).unwrap()),
        ))
        .unwrap()
    }

    fn sample_store() -> TransactionStore {
        let mut store = TransactionStore::new();
        store.add(txn("Salary", Money::new(dec!(3000)), TransactionType::Income, None));
        store.add(txn(
            "Supermarket",
            Money::new(dec!(85.20)),
            TransactionType::Expense,
            Some("Groceries"),
        ));
        store.add(txn(
            "Netflix",
            Money::new(dec!(12.99)),
            TransactionType::Expense,
            Some("Subscriptions"),
        ));
        store
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let store = sample_store();
        let names: Vec<_> = store.all().iter().map(|t| t.description()).collect();
        assert_eq!(names, vec!["Salary", "Supermarket", "Netflix"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = sample_store();
        let id = store.all()[1].id();

        assert!(store.remove_by_id(id));
        assert_eq!(store.len(), 2);
        assert!(store.get(id).is_none());
        assert!(!store.remove_by_id(id));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_first_duplicate_only() {
        let mut store = TransactionStore::new();
        let t = txn("Rent", Money::new(dec!(900)), TransactionType::Expense, None);
        store.add(t.clone());
        store.add(t.clone());

        assert!(store.remove_by_id(t.id()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_keeps_position() {
        let mut store = sample_store();
        let original = store.all()[1].clone();
        let mut input = original.to_input();
        input.amount = Money::new(dec!(90));
        let edited = original.revise(input).unwrap();

        assert!(store.update(edited));
        assert_eq!(store.all()[1].id(), original.id());
        assert_eq!(store.all()[1].amount(), Money::new(dec!(90)));
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = sample_store();
        let before: Vec<_> = store.all().to_vec();
        let stranger = txn("Other", Money::new(dec!(1)), TransactionType::Expense, None);

        assert!(!store.update(stranger));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_replace_all() {
        let mut store = sample_store();
        let replacement = vec![txn("Only", Money::new(dec!(5)), TransactionType::Income, None)];
        let id = replacement[0].id();

        store.replace_all(replacement);
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_filters() {
        let store = sample_store();
        assert_eq!(store.filter_by_category("groceries").len(), 1);
        assert_eq!(store.filter_by_type(TransactionType::Expense).len(), 2);
        assert_eq!(store.filter_by_type(TransactionType::Income).len(), 1);
        assert_eq!(store.search_by_description("NET").len(), 1);
        assert!(store.search_by_description("rent").is_empty());
    }

    #[test]
    fn test_search_matches_all_fields() {
        let store = sample_store();
        assert_eq!(store.search("subscriptions").len(), 1);
        assert_eq!(store.search("85.20").len(), 1);
        assert_eq!(store.search("expense").len(), 2);
        assert_eq!(store.search("2025-01").len(), 3);
        assert_eq!(store.search("").len(), 3);
    }

    #[test]
    fn test_search_balance() {
        let store = sample_store();
        assert_eq!(store.search_balance("expense"), Money::new(dec!(-98.19)));
        assert_eq!(store.search_balance(""), Money::new(dec!(2901.81)));
    }
}
