//! Snapshot service
//!
//! Whole-ledger export to a file and import from one. An import backs up the
//! current snapshot first and then swaps the entire ledger.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::audit::AuditEntry;
use crate::error::{BudgetError, BudgetResult};
use crate::export::{export_state_json, import_state_json, SnapshotSummary};
use crate::storage::Storage;

/// What an import did
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub summary: SnapshotSummary,
    /// Copy of the replaced snapshot, if there was one on disk
    pub backup: Option<PathBuf>,
}

/// Service for import and export
pub struct SnapshotService<'a> {
    storage: &'a mut Storage,
}

impl<'a> SnapshotService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    pub fn export_to(&self, path: &Path, pretty: bool) -> BudgetResult<SnapshotSummary> {
        let file = File::create(path).map_err(|e| {
            BudgetError::Export(format!("Failed to create {}: {}", path.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        export_state_json(self.storage.state(), &mut writer, pretty)?;
        writer
            .flush()
            .map_err(|e| BudgetError::Export(format!("Failed to write {}: {}", path.display(), e)))?;

        let summary = SnapshotSummary::of(self.storage.state());
        tracing::info!(path = %path.display(), %summary, "ledger exported");
        Ok(summary)
    }

    /// Replace the whole ledger with the contents of `path`
    ///
    /// Nothing changes if the file cannot be read or parsed.
    pub fn import_from(&mut self, path: &Path) -> BudgetResult<ImportOutcome> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BudgetError::Import(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let state = import_state_json(&text)?;

        let (backup, pruned) = self.storage.backups().create_backup_with_retention()?;
        if !pruned.is_empty() {
            tracing::debug!(count = pruned.len(), "old backups removed");
        }

        let summary = SnapshotSummary::of(&state);
        self.storage.commit(|current| {
            *current = state;
            Ok(())
        })?;

        self.storage.audit().log(&AuditEntry::replace(
            path.display().to_string(),
            summary.to_string(),
        ))?;
        tracing::info!(path = %path.display(), %summary, "ledger imported");

        Ok(ImportOutcome { summary, backup })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::{BudgetPaths, Settings};
    use crate::models::AppState;
    use crate::services::{BudgetService, ExpenseService, MemberService};
    use tempfile::TempDir;

    fn storage(dir: &TempDir) -> Storage {
        let paths = BudgetPaths::with_base_dir(dir.path().join("ledger"));
        Storage::new(paths, Settings::default()).unwrap()
    }

    fn populated(dir: &TempDir) -> Storage {
        let mut storage = storage(dir);
        MemberService::new(&mut storage).add("Asha").unwrap();
        BudgetService::new(&mut storage).set(3000.0, 30).unwrap();
        ExpenseService::new(&mut storage).add(150.0, "Food").unwrap();
        storage
    }

    #[test]
    fn test_export_import_round_trip() {
        let source_dir = TempDir::new().unwrap();
        let mut source = populated(&source_dir);
        let file = source_dir.path().join("export.json");
        SnapshotService::new(&mut source).export_to(&file, true).unwrap();

        let target_dir = TempDir::new().unwrap();
        let mut target = storage(&target_dir);
        let outcome = SnapshotService::new(&mut target).import_from(&file).unwrap();

        assert_eq!(target.state(), source.state());
        assert_eq!(outcome.summary.member_count, 1);
        assert!(outcome.backup.is_none());
    }

    #[test]
    fn test_import_backs_up_current_snapshot() {
        let dir = TempDir::new().unwrap();
        let mut storage = populated(&dir);
        let before = storage.state().clone();

        let file = dir.path().join("empty.json");
        std::fs::write(&file, "{}").unwrap();
        let outcome = SnapshotService::new(&mut storage).import_from(&file).unwrap();

        assert_eq!(storage.state(), &AppState::default());
        let backup = outcome.backup.unwrap();
        let restored = AppState::from_json(&std::fs::read_to_string(backup).unwrap()).unwrap();
        assert_eq!(restored, before);

        let last = storage.audit().read_all().unwrap().pop().unwrap();
        assert_eq!(last.operation, Operation::Replace);
    }

    #[test]
    fn test_invalid_import_leaves_state_alone() {
        let dir = TempDir::new().unwrap();
        let mut storage = populated(&dir);
        let before = storage.state().clone();

        let file = dir.path().join("bad.json");
        std::fs::write(&file, "<html>").unwrap();
        let err = SnapshotService::new(&mut storage).import_from(&file).unwrap_err();

        assert!(matches!(err, BudgetError::Import(_)));
        assert_eq!(storage.state(), &before);
        assert!(storage.backups().list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_missing_import_file() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage(&dir);
        let err = SnapshotService::new(&mut storage)
            .import_from(&dir.path().join("nope.json"))
            .unwrap_err();
        assert!(matches!(err, BudgetError::Import(_)));
    }
}
