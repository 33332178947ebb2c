use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use family_budget::cli::{
    handle_backup_command, handle_budget_command, handle_category_command, handle_config_command,
    handle_expense_command, handle_export_command, handle_import_command, handle_member_command,
    handle_report_command, BackupCommands, BudgetCommands, CategoryCommands, ConfigArgs,
    ExpenseCommands, MemberCommands, ReportCommands,
};
use family_budget::config::paths::{BudgetPaths, DATA_DIR_ENV};
use family_budget::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Family budget envelopes with daily limits",
    long_about = "Track a budget envelope per family member: set a starting balance \
                  and timeframe, record expenses by category, and see the daily \
                  limit, remaining balance and a rolling weekly report."
)]
struct Cli {
    /// Directory holding settings, data and backups
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Family member commands
    #[command(subcommand)]
    Member(MemberCommands),

    /// Budget envelope commands for the selected member
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Expense commands for the selected member
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Expense category commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Reports for the selected member
    #[command(subcommand)]
    Report(ReportCommands),

    /// Snapshot backup commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export the whole ledger as JSON
    Export {
        /// Output file path
        file: PathBuf,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Replace the whole ledger with an exported file
    Import {
        /// File written by 'export' (or a backup)
        file: PathBuf,
    },

    /// Show paths and settings, optionally changing settings first
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    family_budget::init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => BudgetPaths::with_base_dir(dir),
        None => BudgetPaths::new()?,
    };
    let mut storage = Storage::open(paths)?;

    match cli.command {
        Some(Commands::Member(cmd)) => handle_member_command(&mut storage, cmd)?,
        Some(Commands::Budget(cmd)) => handle_budget_command(&mut storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&mut storage, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&mut storage, cmd)?,
        Some(Commands::Report(cmd)) => handle_report_command(&storage, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&storage, cmd)?,
        Some(Commands::Export { file, pretty }) => {
            handle_export_command(&mut storage, &file, pretty)?
        }
        Some(Commands::Import { file }) => handle_import_command(&mut storage, &file)?,
        Some(Commands::Config(args)) => handle_config_command(&mut storage, args)?,
        None => {
            println!("Family Budget - per-member budget envelopes");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Start with 'budget member add <NAME>'.");
        }
    }

    Ok(())
}
