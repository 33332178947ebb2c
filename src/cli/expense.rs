//! Expense CLI commands

use clap::Subcommand;

use crate::display::{format_expense_list, format_limit_warning};
use crate::error::BudgetResult;
use crate::services::ExpenseService;
use crate::storage::Storage;

use super::parse_amount;

/// Expense subcommands
#[derive(Subcommand, Debug)]
pub enum ExpenseCommands {
    /// Record an expense for the selected member
    Add {
        /// Amount in rupees
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        amount: f64,

        /// Category name (see 'category list')
        category: String,
    },

    /// List the selected member's expenses, newest first
    #[command(alias = "ls")]
    List {
        /// Show at most this many expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

/// Handle an expense command
pub fn handle_expense_command(storage: &mut Storage, cmd: ExpenseCommands) -> BudgetResult<()> {
    let warnings = storage.settings().daily_limit_warnings;
    let mut service = ExpenseService::new(storage);

    match cmd {
        ExpenseCommands::Add { amount, category } => {
            let outcome = service.add(amount, &category)?;
            println!(
                "Expense added: {} ({})",
                outcome.expense.amount, outcome.expense.category
            );
            println!("Remaining balance: {}", outcome.remaining);

            if let (true, Some((spent, limit))) = (warnings, outcome.over_daily_limit) {
                eprintln!("{}", format_limit_warning(spent, limit));
            }
        }

        ExpenseCommands::List { limit } => {
            print!("{}", format_expense_list(&service.list(limit)?));
        }
    }

    Ok(())
}
