//! Spending aggregation
//!
//! Read-only views over a transaction slice: monthly balance, expenses per
//! category, and the running balance history.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{Category, Money, Month, Transaction};

/// Signed sum of the transactions dated in `month`
pub fn monthly_balance(transactions: &[Transaction], month: Month) -> Money {
    transactions
        .iter()
        .filter(|t| month.contains(t.date()))
        .map(Transaction::signed_amount)
        .sum()
}

/// Expense totals per category for `month`
///
/// Income and uncategorized transactions are left out.
pub fn expenses_by_category(transactions: &[Transaction], month: Month) -> BTreeMap<Category, Money> {
    let mut totals = BTreeMap::new();
    for txn in transactions
        .iter()
        .filter(|t| t.is_expense() && month.contains(t.date()))
    {
        if let Some(category) = txn.category() {
            *totals.entry(category.clone()).or_insert_with(Money::zero) += txn.amount();
        }
    }
    totals
}

/// Expense totals per category across every month
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTotals {
    pub by_category: BTreeMap<Category, Money>,
    /// Expenses with no category
    pub uncategorized: Money,
}

impl CategoryTotals {
    pub fn total(&self) -> Money {
        self.by_category.values().sum::<Money>() + self.uncategorized
    }
}

pub fn expenses_by_category_all_time(transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::default();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        match txn.category() {
            Some(category) => {
                *totals
                    .by_category
                    .entry(category.clone())
                    .or_insert_with(Money::zero) += txn.amount();
            }
            None => totals.uncategorized += txn.amount(),
        }
    }
    totals
}

/// Cumulative balance in date order, one point per distinct date
pub fn running_balance(transactions: &[Transaction]) -> Vec<(NaiveDate, Money)> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|t| t.date());

    let mut points: Vec<(NaiveDate, Money)> = Vec::new();
    let mut balance = Money::zero();
    for txn in sorted {
        balance += txn.signed_amount();
        match points.last_mut() {
            Some((date, value)) if *date == txn.date() => *value = balance,
            _ => points.push((txn.date(), balance)),
        }
    }
    points
}

/// One category's share of spending
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpending {
    pub category: Category,
    pub total: Money,
    pub transaction_count: usize,
    /// Share of total spending in whole percent
    pub percentage: i64,
}

/// Spending report for one month, or for all time when `month` is `None`
#[derive(Debug, Clone)]
pub struct SpendingReport {
    pub month: Option<Month>,
    /// Sorted by total, largest first
    pub categories: Vec<CategorySpending>,
    pub uncategorized: Money,
    pub total_spending: Money,
    pub total_income: Money,
}

impl SpendingReport {
    pub fn generate(transactions: &[Transaction], month: Option<Month>) -> Self {
        let in_scope: Vec<&Transaction> = transactions
            .iter()
            .filter(|t| month.map_or(true, |m| m.contains(t.date())))
            .collect();

        let mut by_category: BTreeMap<Category, (Money, usize)> = BTreeMap::new();
        let mut uncategorized = Money::zero();
        let mut total_income = Money::zero();

        for txn in &in_scope {
            if txn.is_income() {
                total_income += txn.amount();
                continue;
            }
            match txn.category() {
                Some(category) => {
                    let entry = by_category
                        .entry(category.clone())
                        .or_insert((Money::zero(), 0));
                    entry.0 += txn.amount();
                    entry.1 += 1;
                }
                None => uncategorized += txn.amount(),
            }
        }

        let total_spending =
            by_category.values().map(|(total, _)| *total).sum::<Money>() + uncategorized;

        let mut categories: Vec<CategorySpending> = by_category
            .into_iter()
            .map(|(category, (total, transaction_count))| CategorySpending {
                percentage: total.percent_of(total_spending).unwrap_or(0),
                category,
                total,
                transaction_count,
            })
            .collect();
        categories.sort_by(|a, b| b.total.cmp(&a.total).then(a.category.cmp(&b.category)));

        Self {
            month,
            categories,
            uncategorized,
            total_spending,
            total_income,
        }
    }

    pub fn net(&self) -> Money {
        self.total_income - self.total_spending
    }
}
