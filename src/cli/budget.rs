//! Budget CLI commands

use clap::Subcommand;

use crate::error::BudgetResult;
use crate::models::Budget;
use crate::services::BudgetService;
use crate::storage::Storage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the selected member's budget, starting today
    Set {
        /// Starting balance in rupees (e.g. "3000" or "₹3,000.50")
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        balance: f64,

        /// Timeframe in days (defaults to the configured timeframe)
        #[arg(short, long, allow_hyphen_values = true)]
        days: Option<i64>,
    },

    /// Start the budget over with a new balance; clears all expenses
    Reset {
        /// New starting balance in rupees
        #[arg(value_parser = parse_amount, allow_hyphen_values = true)]
        balance: f64,
    },

    /// Show the selected member's budget
    Show,
}

/// Handle a budget command
pub fn handle_budget_command(storage: &mut Storage, cmd: BudgetCommands) -> BudgetResult<()> {
    let default_days = i64::from(storage.settings().default_timeframe_days);
    let mut service = BudgetService::new(storage);

    match cmd {
        BudgetCommands::Set { balance, days } => {
            let envelope = service.set(balance, days.unwrap_or(default_days))?;
            println!("Budget set: {}", Budget::Active(envelope.clone()));
            println!("Daily limit: {}", envelope.daily_limit());
        }

        BudgetCommands::Reset { balance } => {
            let envelope = service.reset(balance)?;
            println!("Budget reset: {}", Budget::Active(envelope.clone()));
            println!("All expenses for this budget were cleared.");
        }

        BudgetCommands::Show => match service.current()? {
            Budget::NoBudget => println!("No budget set. Use 'budget budget set <BALANCE>'."),
            Budget::Active(envelope) => {
                println!("Total budget: {}", envelope.starting_balance);
                println!("Timeframe:    {} days", envelope.timeframe_days);
                println!("Daily limit:  {}", envelope.daily_limit());
            }
        },
    }

    Ok(())
}
