//! Business logic layer
//!
//! Budget arithmetic and the category registry. Both sit on top of the
//! models and the [`Ledger`](crate::ledger::Ledger) rather than file storage.

pub mod budget;
pub mod category;

pub use budget::{
    check_budget_overrun, remaining, usage_percent, BudgetLine, BudgetOverrun, BudgetOverview,
};
pub use category::{CategoryEvent, CategoryRegistry, ListenerId};
