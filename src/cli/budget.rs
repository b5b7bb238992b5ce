//! Budget CLI commands
//!
//! Sets monthly budgets and shows budget versus actual for a month.

use clap::Args;

use super::{parse_month_or_current, Session};
use crate::display::report::format_budget_overview;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money, MAX_AMOUNT};
use crate::services::BudgetOverview;

#[derive(Debug, Args)]
pub struct BudgetArgs {
    /// Budget month (YYYY-MM), defaults to the current month
    pub month: Option<String>,
    /// Set a budget, as Category=Amount (repeatable)
    #[arg(short, long = "set", value_name = "CATEGORY=AMOUNT")]
    pub set: Vec<String>,
}

/// Split a `Category=Amount` assignment
fn parse_assignment(s: &str) -> LedgerResult<(Category, Money)> {
    let (name, amount) = s.rsplit_once('=').ok_or_else(|| {
        LedgerError::validation(format!(
            "Invalid budget '{}'. Use Category=Amount, e.g. Groceries=300",
            s
        ))
    })?;
    let category = Category::new(name)?;
    let amount = if amount.trim().is_empty() {
        Money::zero()
    } else {
        Money::parse_input(amount)?
    };
    if amount.exceeds_limit() {
        return Err(LedgerError::validation(format!(
            "Budget {} for '{}' is larger than the maximum of {}",
            amount, category, MAX_AMOUNT
        )));
    }
    Ok((category, amount))
}

pub fn handle_budget_command(session: &mut Session, args: BudgetArgs) -> LedgerResult<()> {
    let month = parse_month_or_current(args.month.as_deref())?;

    if !args.set.is_empty() {
        let assignments = args
            .set
            .iter()
            .map(|s| parse_assignment(s))
            .collect::<LedgerResult<Vec<_>>>()?;

        for (category, amount) in assignments {
            if amount.is_negative() {
                println!("Note: negative budget for '{}' stored as 0", category);
            }
            session
                .ledger
                .set_budget(month, category.clone(), amount);
            session.settings.set_budget(month, category, amount);
        }
        session.save_settings()?;
    }

    let overview = BudgetOverview::generate(&session.ledger, month, session.categories.categories());
    print!("{}", format_budget_overview(&overview, &session.style()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_assignment() {
        let (category, amount) = parse_assignment("Groceries=300").unwrap();
        assert_eq!(category.name(), "Groceries");
        assert_eq!(amount, Money::new(dec!(300)));

        let (_, amount) = parse_assignment("Rent = 12,50").unwrap();
        assert_eq!(amount, Money::new(dec!(12.50)));

        let (_, amount) = parse_assignment("Rent=").unwrap();
        assert_eq!(amount, Money::zero());

        assert!(parse_assignment("Groceries").is_err());
        assert!(parse_assignment("=300").is_err());
        assert!(parse_assignment("Rent=1e5").is_err());
        assert!(parse_assignment("Rent=10000000000000000").is_err());
    }
}
