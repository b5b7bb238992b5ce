//! Transaction CLI commands
//!
//! Add, edit, remove and list transactions in the ledger file.

use clap::Args;

use super::{parse_date, FrequencyArg, Session, TypeArg};
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Category, Money, Month, RecurrenceRule, Transaction, TransactionInput, TransactionType,
};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Description (free text)
    pub description: String,
    /// Amount, always positive (e.g., "12.50" or "12,50")
    pub amount: String,
    /// Income or expense
    #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
    pub transaction_type: TypeArg,
    /// Category name
    #[arg(short, long)]
    pub category: Option<String>,
    /// Transaction date (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    pub date: Option<String>,
    /// Repeat as a standing order
    #[arg(long, value_enum)]
    pub repeat: Option<FrequencyArg>,
    /// Last date of the standing order (YYYY-MM-DD, inclusive)
    #[arg(long, requires = "repeat")]
    pub until: Option<String>,
    /// Number of repetitions after the first
    #[arg(long, requires = "repeat")]
    pub count: Option<u32>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Transaction ID or unique ID prefix
    pub id: String,
    /// New description
    #[arg(long)]
    pub description: Option<String>,
    /// New amount
    #[arg(short, long)]
    pub amount: Option<String>,
    /// New type
    #[arg(short = 't', long = "type", value_enum)]
    pub transaction_type: Option<TypeArg>,
    /// New category (empty string clears it)
    #[arg(short, long)]
    pub category: Option<String>,
    /// New date
    #[arg(short, long)]
    pub date: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Filter by category name
    #[arg(short, long)]
    pub category: Option<String>,
    /// Filter by type
    #[arg(short = 't', long = "type", value_enum)]
    pub transaction_type: Option<TypeArg>,
    /// Search every column (case-insensitive)
    #[arg(short, long)]
    pub search: Option<String>,
    /// Only show this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

fn parse_amount(s: &str) -> LedgerResult<Money> {
    Money::parse_input(s).map_err(|e| {
        LedgerError::validation(format!(
            "Invalid amount format: '{}'. Use a positive amount like '12.50'. Error: {}",
            s, e
        ))
    })
}

pub fn handle_add_command(session: &mut Session, args: AddArgs) -> LedgerResult<()> {
    let date = match &args.date {
        Some(d) => parse_date(d)?,
        None => chrono::Local::now().date_naive(),
    };
    let category = match &args.category {
        Some(name) => Category::parse_optional(name)?,
        None => None,
    };
    let input = TransactionInput::new(
        args.description,
        parse_amount(&args.amount)?,
        args.transaction_type.into(),
        date,
        category,
    );

    let (created, overruns) = match args.repeat {
        Some(frequency) => {
            let mut rule = RecurrenceRule::new(frequency.into());
            if let Some(until) = &args.until {
                rule = rule.until(parse_date(until)?);
            }
            if let Some(count) = args.count {
                rule = rule.count(count);
            }
            let outcome =
                session
                    .ledger
                    .add_recurring(input, &rule, session.settings.recurrence_cap)?;
            (outcome.transactions, outcome.overruns)
        }
        None => {
            let txn = Transaction::new(input)?;
            let overrun = session.ledger.record(txn.clone());
            (vec![txn], overrun.into_iter().collect())
        }
    };

    session.save()?;

    if let [txn] = created.as_slice() {
        println!("Created transaction:");
        print!("{}", format_transaction_details(txn, &session.style()));
    } else {
        println!("Created {} transactions:", created.len());
        let refs: Vec<&Transaction> = created.iter().collect();
        print!("{}", format_transaction_register(&refs, &session.style()));
    }
    for overrun in &overruns {
        println!("Warning: {}", overrun);
    }

    Ok(())
}

pub fn handle_edit_command(session: &mut Session, args: EditArgs) -> LedgerResult<()> {
    let original = session.find_transaction(&args.id)?.clone();
    let mut input = original.to_input();

    if let Some(description) = args.description {
        input.description = description;
    }
    if let Some(amount) = &args.amount {
        input.amount = parse_amount(amount)?;
    }
    if let Some(kind) = args.transaction_type {
        input.transaction_type = kind.into();
    }
    if let Some(category) = &args.category {
        input.category = Category::parse_optional(category)?;
    }
    if let Some(date) = &args.date {
        input.date = parse_date(date)?;
    }

    let edited = original.revise(input)?;
    session.ledger.update(edited.clone());
    session.save()?;

    println!("Updated transaction:");
    print!("{}", format_transaction_details(&edited, &session.style()));
    Ok(())
}

pub fn handle_remove_command(session: &mut Session, id: &str) -> LedgerResult<()> {
    let id = session.find_transaction(id)?.id();
    session.ledger.remove_by_id(id);
    session.save()?;
    println!("Removed transaction {}", id);
    Ok(())
}

pub fn handle_list_command(session: &Session, args: ListArgs) -> LedgerResult<()> {
    let month = args.month.as_deref().map(Month::parse).transpose()?;

    let mut transactions: Vec<&Transaction> = match &args.search {
        Some(text) => session.ledger.search(text),
        None => session.ledger.all().iter().collect(),
    };
    if let Some(category) = &args.category {
        transactions.retain(|t| t.category().is_some_and(|c| c.matches(category)));
    }
    if let Some(kind) = args.transaction_type {
        let kind: TransactionType = kind.into();
        transactions.retain(|t| t.transaction_type() == kind);
    }
    if let Some(month) = month {
        transactions.retain(|t| month.contains(t.date()));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&transactions)?);
        return Ok(());
    }

    print!(
        "{}",
        format_transaction_register(&transactions, &session.style())
    );
    println!("\nShowing {} of {} transactions", transactions.len(), session.ledger.len());
    Ok(())
}
