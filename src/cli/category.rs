//! Category CLI commands
//!
//! Lists the known categories and edits the list kept in settings.

use clap::Args;

use super::Session;
use crate::error::LedgerResult;

#[derive(Debug, Args)]
pub struct CategoriesArgs {
    /// Add a category
    #[arg(short, long, value_name = "NAME")]
    pub add: Option<String>,
    /// Remove a category (exact name)
    #[arg(short, long, value_name = "NAME")]
    pub remove: Option<String>,
}

pub fn handle_categories_command(session: &mut Session, args: CategoriesArgs) -> LedgerResult<()> {
    let mut changed = false;

    if let Some(name) = &args.add {
        if session.categories.add(name)? {
            println!("Added category '{}'", name.trim());
            changed = true;
        } else {
            println!("Category '{}' already exists", name.trim());
        }
    }

    if let Some(name) = &args.remove {
        if session.categories.remove(name) {
            println!("Removed category '{}'", name);
            changed = true;
        } else {
            println!("No category named '{}'", name);
        }
    }

    if changed {
        session.settings.default_categories = session
            .categories
            .categories()
            .iter()
            .map(|c| c.name().to_string())
            .collect();
        session.save_settings()?;
    }

    if session.categories.is_empty() {
        println!("No categories defined.");
    }
    for category in session.categories.categories() {
        let count = session.ledger.filter_by_category(category.name()).len();
        println!("{:20} {:>5} transactions", category.name(), count);
    }
    Ok(())
}
