//! Budget service
//!
//! Budget-versus-actual arithmetic, the overrun decision made after an
//! expense is recorded, and the per-category overview for a month.

use std::collections::BTreeSet;
use std::fmt;

use crate::ledger::Ledger;
use crate::models::{Category, Money, Month};

/// Usage reported when spending happens against an empty budget
pub const UNBUDGETED_USAGE_PERCENT: i64 = 200;

/// Share of `budget` consumed by `expense`, in whole percent
///
/// Rounded half-up and not clamped, so overspending reads above 100. A zero
/// budget reads 200 when anything was spent and 0 otherwise.
pub fn usage_percent(budget: Money, expense: Money) -> i64 {
    if !budget.is_positive() {
        return if expense.is_positive() {
            UNBUDGETED_USAGE_PERCENT
        } else {
            0
        };
    }
    expense.percent_of(budget).unwrap_or(0)
}

/// Budget left after `expense`; negative when overspent
pub fn remaining(budget: Money, expense: Money) -> Money {
    budget - expense
}

/// An expense pushed a category past its monthly budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverrun {
    pub month: Month,
    pub category: Category,
    pub budget: Money,
    pub expense_total: Money,
}

impl BudgetOverrun {
    /// Amount spent beyond the budget
    pub fn excess(&self) -> Money {
        self.expense_total - self.budget
    }
}

impl fmt::Display for BudgetOverrun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Budget for '{}' in {} exceeded: spent {} of {}",
            self.category, self.month, self.expense_total, self.budget
        )
    }
}

/// Decide whether a new expense total overruns the category's budget
///
/// Only a positive budget can be overrun.
pub fn check_budget_overrun(
    month: Month,
    category: &Category,
    new_expense_total: Money,
    budget: Money,
) -> Option<BudgetOverrun> {
    if budget.is_positive() && new_expense_total > budget {
        Some(BudgetOverrun {
            month,
            category: category.clone(),
            budget,
            expense_total: new_expense_total,
        })
    } else {
        None
    }
}

/// One row of the budget overview
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    pub category: Category,
    pub budget: Money,
    pub expense: Money,
    pub remaining: Money,
    pub usage_percent: i64,
}

impl BudgetLine {
    pub fn new(category: Category, budget: Money, expense: Money) -> Self {
        Self {
            category,
            budget,
            expense,
            remaining: remaining(budget, expense),
            usage_percent: usage_percent(budget, expense),
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Budget versus actual for every relevant category in a month
#[derive(Debug, Clone)]
pub struct BudgetOverview {
    pub month: Month,
    pub lines: Vec<BudgetLine>,
    pub total_budget: Money,
    pub total_expense: Money,
    pub total_remaining: Money,
}

impl BudgetOverview {
    /// Build the overview for `month`
    ///
    /// Lines cover `categories` plus any category that has a budget or an
    /// expense that month, in name order.
    pub fn generate(ledger: &Ledger, month: Month, categories: &[Category]) -> Self {
        let budgets = ledger.budgets_for_month(month);
        let expenses = ledger.expenses_by_category(month);

        let names: BTreeSet<&Category> = categories
            .iter()
            .chain(budgets.keys())
            .chain(expenses.keys())
            .collect();

        let lines: Vec<BudgetLine> = names
            .into_iter()
            .map(|category| {
                BudgetLine::new(
                    category.clone(),
                    budgets.get(category).copied().unwrap_or_default(),
                    expenses.get(category).copied().unwrap_or_default(),
                )
            })
            .collect();

        let total_budget: Money = lines.iter().map(|l| l.budget).sum();
        let total_expense: Money = lines.iter().map(|l| l.expense).sum();

        Self {
            month,
            lines,
            total_budget,
            total_expense,
            total_remaining: remaining(total_budget, total_expense),
        }
    }

    pub fn total_usage_percent(&self) -> i64 {
        usage_percent(self.total_budget, self.total_expense)
    }

    pub fn over_budget(&self) -> impl Iterator<Item = &BudgetLine> {
        self.lines.iter().filter(|l| l.is_over_budget())
    }
}
