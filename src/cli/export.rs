//! CLI command for ledger export

use std::path::Path;

use crate::error::BudgetResult;
use crate::services::SnapshotService;
use crate::storage::Storage;

/// Write the whole ledger to `path`
pub fn handle_export_command(storage: &mut Storage, path: &Path, pretty: bool) -> BudgetResult<()> {
    let summary = SnapshotService::new(storage).export_to(path, pretty)?;
    println!("Exported {} to {}", summary, path.display());
    Ok(())
}
