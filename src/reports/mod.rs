//! Reports
//!
//! Aggregations over the transaction list.

pub mod spending;

pub use spending::{
    expenses_by_category, expenses_by_category_all_time, monthly_balance, running_balance,
    CategorySpending, CategoryTotals, SpendingReport,
};
