use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use budget_ledger::cli::{
    handle_add_command, handle_balance_command, handle_budget_command,
    handle_categories_command, handle_edit_command, handle_export_command,
    handle_history_command, handle_import_command, handle_list_command, handle_remove_command,
    handle_spending_command, AddArgs, BudgetArgs, CategoriesArgs, EditArgs, ListArgs, Session,
};
use budget_ledger::import::ImportMode;

#[derive(Parser)]
#[command(
    name = "ledger",
    version,
    about = "Personal finance ledger with monthly budgets",
    long_about = "Records income and expenses in a single CSV file, reports monthly \
                  balances and spending by category, and tracks spending against \
                  monthly budgets."
)]
struct Cli {
    /// Ledger CSV file
    #[arg(short, long, global = true, default_value = "ledger.csv")]
    file: PathBuf,

    /// Settings file (defaults to <FILE stem>.settings.json beside the ledger)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Save even when that drops unreadable rows of the ledger file
    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a transaction (optionally repeating)
    Add(AddArgs),

    /// Edit a transaction
    Edit(EditArgs),

    /// Remove a transaction
    #[command(alias = "rm")]
    Remove {
        /// Transaction ID or unique ID prefix
        id: String,
    },

    /// List transactions
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show the balance for a month
    Balance {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
    },

    /// Show spending by category
    Spending {
        /// Month (YYYY-MM), defaults to the current month
        month: Option<String>,
        /// Report across all months
        #[arg(long, conflicts_with = "month")]
        all: bool,
    },

    /// Show or set monthly budgets
    Budget(BudgetArgs),

    /// Show the running balance over time
    History,

    /// Import transactions from a ledger CSV file
    Import {
        /// File to import
        source: PathBuf,
        /// Replace the current transactions instead of appending
        #[arg(long)]
        replace: bool,
    },

    /// Export transactions to a CSV file
    Export {
        /// Destination file
        dest: PathBuf,
    },

    /// List or edit the known categories
    Categories(CategoriesArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    budget_ledger::init_tracing();
    let cli = Cli::parse();

    let mut session = Session::open(&cli.file, cli.config.as_deref())?.with_force(cli.force);

    match cli.command {
        Some(Commands::Add(args)) => handle_add_command(&mut session, args)?,
        Some(Commands::Edit(args)) => handle_edit_command(&mut session, args)?,
        Some(Commands::Remove { id }) => handle_remove_command(&mut session, &id)?,
        Some(Commands::List(args)) => handle_list_command(&session, args)?,
        Some(Commands::Balance { month }) => handle_balance_command(&session, month.as_deref())?,
        Some(Commands::Spending { month, all }) => {
            handle_spending_command(&session, month.as_deref(), all)?
        }
        Some(Commands::Budget(args)) => handle_budget_command(&mut session, args)?,
        Some(Commands::History) => handle_history_command(&session)?,
        Some(Commands::Import { source, replace }) => {
            let mode = if replace {
                ImportMode::Replace
            } else {
                ImportMode::Append
            };
            handle_import_command(&mut session, &source, mode)?
        }
        Some(Commands::Export { dest }) => handle_export_command(&session, &dest)?,
        Some(Commands::Categories(args)) => handle_categories_command(&mut session, args)?,
        Some(Commands::Config) => {
            let settings = &session.settings;
            println!("Budget Ledger Configuration");
            println!("===========================");
            println!("Ledger file:   {}", session.ledger_path().display());
            println!("Settings file: {}", session.settings_path().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
            println!("  Recurrence cap:  {}", settings.recurrence_cap);
            println!("  Categories:      {}", settings.default_categories.len());
            println!("  Budgets:         {}", settings.budgets.len());
        }
        None => {
            println!("Budget Ledger - income, expenses and monthly budgets");
            println!();
            println!("Run 'ledger --help' for usage information.");
        }
    }

    Ok(())
}
