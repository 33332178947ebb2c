//! Config CLI command
//!
//! Shows paths and settings; any option given is saved to `config.json` first.

use clap::Args;

use crate::error::BudgetResult;
use crate::storage::Storage;

/// Settings that can be changed from the command line
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Timeframe used by 'budget set' when --days is not given
    #[arg(long, value_name = "DAYS", value_parser = clap::value_parser!(u32).range(1..))]
    pub default_days: Option<u32>,

    /// Warn when today's spending passes the daily limit (true/false)
    #[arg(long, value_name = "BOOL")]
    pub limit_warnings: Option<bool>,

    /// Number of backups to keep
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub keep_backups: Option<u32>,
}

impl ConfigArgs {
    fn has_changes(&self) -> bool {
        self.default_days.is_some() || self.limit_warnings.is_some() || self.keep_backups.is_some()
    }
}

/// Handle the config command
pub fn handle_config_command(storage: &mut Storage, args: ConfigArgs) -> BudgetResult<()> {
    if args.has_changes() {
        storage.update_settings(|settings| {
            if let Some(days) = args.default_days {
                settings.default_timeframe_days = days;
            }
            if let Some(enabled) = args.limit_warnings {
                settings.daily_limit_warnings = enabled;
            }
            if let Some(keep) = args.keep_backups {
                settings.backup_retention.keep = keep;
            }
        })?;
        println!("Settings saved to {}", storage.paths().settings_file().display());
        println!();
    }

    let paths = storage.paths();
    let settings = storage.settings();
    println!("Family Budget Configuration");
    println!("===========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Snapshot:         {}", paths.state_file().display());
    println!("Backup directory: {}", paths.backup_dir().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  Default timeframe:     {} days", settings.default_timeframe_days);
    println!("  Daily limit warnings:  {}", settings.daily_limit_warnings);
    println!("  Backups kept:          {}", settings.backup_retention.keep);

    Ok(())
}
