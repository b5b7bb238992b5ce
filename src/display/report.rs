//! Report formatting utilities for terminal output

use chrono::NaiveDate;

use super::{truncate, DisplayStyle};
use crate::models::{Money, Month};
use crate::reports::SpendingReport;
use crate::services::BudgetOverview;

/// Create a simple bar chart representation of a whole percentage
pub fn format_bar(percent: i64, width: usize) -> String {
    if percent <= 0 {
        return "░".repeat(width);
    }
    let filled = ((percent as usize) * width / 100).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a separator line
pub fn separator(width: usize) -> String {
    "─".repeat(width)
}

pub fn format_monthly_balance(month: Month, balance: Money, style: &DisplayStyle) -> String {
    format!(
        "Balance for {}: {}\n",
        month,
        style.money(balance)
    )
}

pub fn format_spending_report(report: &SpendingReport, style: &DisplayStyle) -> String {
    let mut output = String::new();
    let title = match report.month {
        Some(month) => format!("Spending for {}", month),
        None => "Spending (all time)".to_string(),
    };
    output.push_str(&format!("{}\n{}\n", title, separator(60)));

    if report.categories.is_empty() && report.uncategorized.is_zero() {
        output.push_str("No expenses recorded.\n");
    }

    for line in &report.categories {
        output.push_str(&format!(
            "{:20} {:>12} {:>4}% {}\n",
            truncate(line.category.name(), 20),
            style.money(line.total),
            line.percentage,
            format_bar(line.percentage, 20)
        ));
    }
    if report.uncategorized.is_positive() {
        output.push_str(&format!(
            "{:20} {:>12}\n",
            "(uncategorized)",
            style.money(report.uncategorized)
        ));
    }

    output.push_str(&format!("{}\n", separator(60)));
    output.push_str(&format!(
        "{:20} {:>12}\n",
        "Total spent",
        style.money(report.total_spending)
    ));
    output.push_str(&format!(
        "{:20} {:>12}\n",
        "Total income",
        style.money(report.total_income)
    ));
    output.push_str(&format!(
        "{:20} {:>12}\n",
        "Net",
        style.money(report.net())
    ));
    output
}

pub fn format_budget_overview(overview: &BudgetOverview, style: &DisplayStyle) -> String {
    let mut output = String::new();
    output.push_str(&format!("Budget for {}\n", overview.month));
    output.push_str(&format!(
        "{:20} {:>12} {:>12} {:>12} {:>6}\n",
        "Category", "Budget", "Spent", "Remaining", "Used"
    ));
    output.push_str(&format!("{}\n", separator(66)));

    for line in &overview.lines {
        let marker = if line.is_over_budget() { " !" } else { "" };
        output.push_str(&format!(
            "{:20} {:>12} {:>12} {:>12} {:>5}%{}\n",
            truncate(line.category.name(), 20),
            style.money(line.budget),
            style.money(line.expense),
            style.money(line.remaining),
            line.usage_percent,
            marker
        ));
    }

    output.push_str(&format!("{}\n", separator(66)));
    output.push_str(&format!(
        "{:20} {:>12} {:>12} {:>12} {:>5}%\n",
        "Total",
        style.money(overview.total_budget),
        style.money(overview.total_expense),
        style.money(overview.total_remaining),
        overview.total_usage_percent()
    ));
    output
}

/// Format the running balance history, one line per date
pub fn format_balance_history(points: &[(NaiveDate, Money)], style: &DisplayStyle) -> String {
    if points.is_empty() {
        return "No transactions found.\n".to_string();
    }
    points
        .iter()
        .map(|(date, balance)| {
            format!("{:10}  {:>14}\n", style.date(*date), style.money(*balance))
        })
        .collect()
}
