//! CLI command for ledger import
//!
//! Replaces the whole ledger with an exported file or a backup.

use std::path::Path;

use crate::error::BudgetResult;
use crate::services::SnapshotService;
use crate::storage::Storage;

/// Replace the whole ledger with the contents of `path`
pub fn handle_import_command(storage: &mut Storage, path: &Path) -> BudgetResult<()> {
    let outcome = SnapshotService::new(storage).import_from(path)?;
    println!("Imported {} from {}", outcome.summary, path.display());
    if let Some(backup) = outcome.backup {
        println!("Previous data backed up to {}", backup.display());
    }
    Ok(())
}
