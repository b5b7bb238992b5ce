//! Report CLI commands

use super::{parse_month_or_current, Session};
use crate::display::report::{
    format_balance_history, format_monthly_balance, format_spending_report,
};
use crate::error::LedgerResult;
use crate::reports::SpendingReport;

pub fn handle_balance_command(session: &Session, month: Option<&str>) -> LedgerResult<()> {
    let month = parse_month_or_current(month)?;
    let balance = session.ledger.monthly_balance(month);
    print!(
        "{}",
        format_monthly_balance(month, balance, &session.style())
    );
    Ok(())
}

/// Spending by category for a month, or across all months with `all_time`
pub fn handle_spending_command(
    session: &Session,
    month: Option<&str>,
    all_time: bool,
) -> LedgerResult<()> {
    let month = if all_time {
        None
    } else {
        Some(parse_month_or_current(month)?)
    };
    let report = SpendingReport::generate(session.ledger.all(), month);
    print!("{}", format_spending_report(&report, &session.style()));
    Ok(())
}

pub fn handle_history_command(session: &Session) -> LedgerResult<()> {
    let points = session.ledger.running_balance();
    print!("{}", format_balance_history(&points, &session.style()));
    Ok(())
}
