//! Report CLI commands

use chrono::Local;
use clap::Subcommand;

use crate::error::{BudgetError, BudgetResult};
use crate::reports::{SpendingSummary, WeeklyReport};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Remaining balance, today's spending, streak and days needed
    Summary,

    /// Spending by category and by day over the last 7 days
    Weekly,
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> BudgetResult<()> {
    let state = storage.state();
    let member = state
        .current_member()
        .ok_or_else(BudgetError::no_member_selected)?;
    let today = Local::now().date_naive();

    match cmd {
        ReportCommands::Summary => {
            print!("{}", SpendingSummary::generate(member, today).format_terminal());
        }
        ReportCommands::Weekly => {
            let report = WeeklyReport::generate(member, today);
            print!("{}", report.format_terminal(&state.categories));
        }
    }

    Ok(())
}
