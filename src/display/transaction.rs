//! Transaction display formatting
//!
//! Register-style listings and a detail view for single transactions.

use super::{truncate, DisplayStyle};
use crate::models::{Money, Transaction, TransactionType};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, style: &DisplayStyle) -> String {
    let description = if txn.description().trim().is_empty() {
        "(no description)".to_string()
    } else {
        // Multi-line descriptions collapse onto one row
        txn.description().replace(['\n', '\r'], " ")
    };
    let category = txn.category().map(|c| c.name()).unwrap_or("-");
    let kind = match txn.transaction_type() {
        TransactionType::Income => "+",
        TransactionType::Expense => "-",
    };

    format!(
        "{:8} {:10} {:24} {:16} {} {:>12}",
        txn.id().short(),
        style.date(txn.date()),
        truncate(&description, 24),
        truncate(category, 16),
        kind,
        style.money(txn.amount())
    )
}

/// Format a list of transactions as a register with a closing balance
pub fn format_transaction_register(transactions: &[&Transaction], style: &DisplayStyle) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:8} {:10} {:24} {:16} {} {:>12}\n",
        "ID", "Date", "Description", "Category", " ", "Amount"
    ));
    output.push_str(&"-".repeat(77));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, style));
        output.push('\n');
    }

    let balance: Money = transactions.iter().map(|t| t.signed_amount()).sum();
    output.push_str(&"-".repeat(77));
    output.push('\n');
    output.push_str(&format!(
        "{:>64} {:>12}\n",
        "Balance:",
        style.money(balance)
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, style: &DisplayStyle) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id()));
    output.push_str(&format!("Date:        {}\n", style.date(txn.date())));
    output.push_str(&format!("Type:        {}\n", txn.transaction_type()));
    output.push_str(&format!(
        "Amount:      {}\n",
        style.money(txn.amount())
    ));

    if !txn.description().is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description()));
    }

    match txn.category() {
        Some(category) => output.push_str(&format!("Category:    {}\n", category)),
        None => output.push_str("Category:    (uncategorized)\n"),
    }

    output
}
