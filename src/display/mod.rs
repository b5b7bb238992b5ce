//! Display formatting for terminal output

pub mod report;
pub mod transaction;

pub use report::{
    format_balance_history, format_budget_overview, format_monthly_balance,
    format_spending_report,
};
pub use transaction::{
    format_transaction_details, format_transaction_register, format_transaction_row,
};

use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::Money;

/// Currency and date presentation taken from settings
#[derive(Debug, Clone, Copy)]
pub struct DisplayStyle<'a> {
    pub currency: &'a str,
    pub date_format: &'a str,
}

impl<'a> DisplayStyle<'a> {
    pub fn new(currency: &'a str, date_format: &'a str) -> Self {
        Self {
            currency,
            date_format,
        }
    }

    pub fn from_settings(settings: &'a Settings) -> Self {
        Self::new(&settings.currency_symbol, &settings.date_format)
    }

    pub fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(self.currency)
    }

    /// Format a date, falling back to ISO when the pattern is unusable
    pub fn date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(self.date_format)).is_err() {
            return date.format("%Y-%m-%d").to_string();
        }
        out
    }
}

impl Default for DisplayStyle<'static> {
    fn default() -> Self {
        Self::new("$", "%Y-%m-%d")
    }
}

/// Pad or cut a string to `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let cut: String = s.chars().take(max_len - 3).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style() {
        let style = DisplayStyle::new("€", "%d.%m.%Y");
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(style.date(date), "09.03.2025");
        assert_eq!(style.money(Money::zero()), "€0.00");

        let broken = DisplayStyle::new("$", "%Q");
        assert_eq!(broken.date(date), "2025-03-09");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer name", 10), "a much ...");
        assert_eq!(truncate("Lebensmittelgeschäft", 8), "Leben...");
        assert_eq!(truncate("abcdef", 2), "..");
    }
}
