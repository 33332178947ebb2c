//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print results
//! to stdout and return errors for `main` to report.

pub mod backup;
pub mod budget;
pub mod category;
pub mod config;
pub mod expense;
pub mod export;
pub mod import;
pub mod member;
pub mod report;

pub use backup::{handle_backup_command, BackupCommands};
pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use config::{handle_config_command, ConfigArgs};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::handle_export_command;
pub use import::handle_import_command;
pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ReportCommands};

use crate::models::Money;

/// Parse a rupee amount argument ("150", "₹1,500.50", "-5")
pub fn parse_amount(s: &str) -> Result<f64, String> {
    Money::parse(s)
        .map(Money::to_decimal)
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("150"), Ok(150.0));
        assert_eq!(parse_amount("₹1,500.50"), Ok(1500.5));
        assert_eq!(parse_amount("-5"), Ok(-5.0));
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
    }
}
