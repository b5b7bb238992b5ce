//! Budget registry
//!
//! Monthly spending limits keyed by (month, category). Limits are clamped to
//! `0..=MAX_AMOUNT` on write; a missing entry reads as zero.

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::models::{Category, Money, Month, MAX_AMOUNT};

/// Composite key for budget entries
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BudgetKey {
    pub month: Month,
    pub category: Category,
}

impl BudgetKey {
    pub fn new(month: Month, category: Category) -> Self {
        Self { month, category }
    }
}

/// Store of monthly budget amounts
#[derive(Debug, Clone, Default)]
pub struct BudgetRegistry {
    budgets: HashMap<BudgetKey, Money>,
}

impl BudgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the budget for a category in a month, overwriting any prior value
    pub fn set(&mut self, month: Month, category: Category, amount: Money) {
        let amount = amount.floor_at_zero().min(Money::new(MAX_AMOUNT));
        debug!(%month, %category, %amount, "setting budget");
        self.budgets.insert(BudgetKey::new(month, category), amount);
    }

    /// Budget for a category in a month, zero when unset
    pub fn get(&self, month: Month, category: &Category) -> Money {
        self.budgets
            .get(&BudgetKey::new(month, category.clone()))
            .copied()
            .unwrap_or_default()
    }

    /// Snapshot of every budget set for `month`
    pub fn for_month(&self, month: Month) -> BTreeMap<Category, Money> {
        self.budgets
            .iter()
            .filter(|(key, _)| key.month == month)
            .map(|(key, amount)| (key.category.clone(), *amount))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.budgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn jan() -> Month {
        Month::new(2025, 1).unwrap()
    }

    fn cat(name: &str) -> Category {
        Category::new(name).unwrap()
    }

    #[test]
    fn test_unset_reads_zero() {
        let registry = BudgetRegistry::new();
        assert_eq!(registry.get(jan(), &cat("Rent")), Money::zero());
        assert!(registry.for_month(jan()).is_empty());
    }

    #[test]
    fn test_set_overwrites() {
        let mut registry = BudgetRegistry::new();
        registry.set(jan(), cat("Rent"), Money::new(dec!(800)));
        registry.set(jan(), cat("Rent"), Money::new(dec!(950)));

        assert_eq!(registry.get(jan(), &cat("Rent")), Money::new(dec!(950)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_negative_clamped_to_zero() {
        let mut registry = BudgetRegistry::new();
        registry.set(jan(), cat("Rent"), Money::new(dec!(-20)));
        assert_eq!(registry.get(jan(), &cat("Rent")), Money::zero());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_oversized_clamped_to_max() {
        let mut registry = BudgetRegistry::new();
        registry.set(jan(), cat("Rent"), Money::new(rust_decimal::Decimal::MAX));
        assert_eq!(registry.get(jan(), &cat("Rent")), Money::new(MAX_AMOUNT));
    }

    #[test]
    fn test_for_month_is_scoped() {
        let mut registry = BudgetRegistry::new();
        registry.set(jan(), cat("Rent"), Money::new(dec!(800)));
        registry.set(jan(), cat("Groceries"), Money::new(dec!(300)));
        registry.set(jan().next(), cat("Rent"), Money::new(dec!(800)));

        let budgets = registry.for_month(jan());
        assert_eq!(budgets.len(), 2);
        assert_eq!(budgets[&cat("Groceries")], Money::new(dec!(300)));
    }
}
