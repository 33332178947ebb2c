//! Backup CLI commands

use clap::Subcommand;

use crate::error::BudgetResult;
use crate::storage::Storage;

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Back up the current snapshot now
    Create,

    /// List backups, newest first
    #[command(alias = "ls")]
    List,
}

/// Handle a backup command
pub fn handle_backup_command(storage: &Storage, cmd: BackupCommands) -> BudgetResult<()> {
    let manager = storage.backups();

    match cmd {
        BackupCommands::Create => match manager.create_backup_with_retention()? {
            (Some(path), pruned) => {
                println!("Backup created: {}", path.display());
                if !pruned.is_empty() {
                    println!("Removed {} old backup(s).", pruned.len());
                }
            }
            (None, _) => println!("Nothing to back up yet."),
        },

        BackupCommands::List => {
            let backups = manager.list_backups()?;
            if backups.is_empty() {
                println!("No backups found.");
                return Ok(());
            }

            println!("{:<36} {:>20} {:>10}", "File", "Created (local)", "Size");
            for backup in backups {
                println!(
                    "{:<36} {:>20} {:>10}",
                    backup.filename,
                    backup
                        .created_at
                        .with_timezone(&chrono::Local)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string(),
                    format!("{} B", backup.size_bytes)
                );
            }
            println!();
            println!("Restore one with: budget import <FILE>");
        }
    }

    Ok(())
}
