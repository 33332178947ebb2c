//! Ledger store
//!
//! Holds the in-memory `AppState` and mirrors it to one JSON snapshot
//! (`data/state.json`). Loading never fails on bad content: a missing snapshot
//! yields the default ledger, missing or unreadable fields take their defaults,
//! and a file that is not JSON at all is moved into the backup directory before
//! starting fresh.

pub mod file_io;

pub use file_io::{read_text_if_exists, write_json_atomic};

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::backup::BackupManager;
use crate::config::paths::BudgetPaths;
use crate::config::settings::Settings;
use crate::error::BudgetResult;
use crate::models::AppState;

/// Owns the ledger state and its on-disk snapshot
pub struct Storage {
    paths: BudgetPaths,
    settings: Settings,
    state: AppState,
    audit: AuditLogger,
}

impl Storage {
    /// Open the store with an empty ledger; call [`Storage::load`] to read the snapshot
    pub fn new(paths: BudgetPaths, settings: Settings) -> BudgetResult<Self> {
        paths.ensure_directories()?;
        let audit = AuditLogger::new(paths.audit_log());

        Ok(Self {
            paths,
            settings,
            state: AppState::default(),
            audit,
        })
    }

    /// Load settings from `paths`, then the snapshot
    pub fn open(paths: BudgetPaths) -> BudgetResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let mut storage = Self::new(paths, settings)?;
        storage.load()?;
        Ok(storage)
    }

    /// Replace the in-memory ledger with the snapshot on disk
    pub fn load(&mut self) -> BudgetResult<()> {
        let path = self.paths.state_file();

        self.state = match read_text_if_exists(&path)? {
            None => {
                tracing::debug!(path = %path.display(), "no snapshot yet; starting empty");
                AppState::default()
            }
            Some(text) => match AppState::from_json(&text) {
                Ok(state) => {
                    tracing::debug!(
                        members = state.family_members.len(),
                        categories = state.categories.len(),
                        "snapshot loaded"
                    );
                    state
                }
                Err(e) => {
                    let moved = self.backups().quarantine(&path)?;
                    tracing::warn!(
                        error = %e,
                        moved_to = %moved.display(),
                        "snapshot is not valid JSON; starting from defaults"
                    );
                    AppState::default()
                }
            },
        };
        Ok(())
    }

    /// Write the whole ledger to disk
    pub fn save(&self) -> BudgetResult<()> {
        write_json_atomic(&self.paths.state_file(), &self.state)?;
        tracing::debug!("snapshot saved");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply `change` to a copy of the ledger, write the copy, then make it current
    ///
    /// If `change` is rejected or the write fails, the in-memory ledger is left
    /// exactly as it was.
    pub fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut AppState) -> BudgetResult<T>,
    ) -> BudgetResult<T> {
        let mut next = self.state.clone();
        let outcome = change(&mut next)?;

        write_json_atomic(&self.paths.state_file(), &next)?;
        self.state = next;
        tracing::debug!("snapshot saved");
        Ok(outcome)
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Change the settings on a copy, save it to `config.json`, then make it current
    pub fn update_settings(&mut self, change: impl FnOnce(&mut Settings)) -> BudgetResult<()> {
        let mut next = self.settings.clone();
        change(&mut next);
        next.save(&self.paths)?;

        tracing::info!(
            default_timeframe_days = next.default_timeframe_days,
            daily_limit_warnings = next.daily_limit_warnings,
            backups_kept = next.backup_retention.keep,
            "settings updated"
        );
        self.settings = next;
        Ok(())
    }

    pub fn backups(&self) -> BackupManager {
        BackupManager::new(&self.paths, self.settings.backup_retention.clone())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Append a create entry to the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        entity_name: Option<String>,
        entity: &T,
    ) -> BudgetResult<()> {
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Append an update entry to the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: &str,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> BudgetResult<()> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::Utc;
    use std::fs;
    use tempfile::TempDir;

    fn storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, Settings::default()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_new_creates_directories() {
        let (_storage, temp) = storage();
        assert!(temp.path().join("data").exists());
        assert!(temp.path().join("backups").exists());
    }

    #[test]
    fn test_load_without_snapshot_gives_defaults() {
        let (mut storage, _temp) = storage();
        storage.load().unwrap();

        assert_eq!(storage.state(), &AppState::default());
        assert_eq!(storage.state().categories.len(), 5);
    }

    fn asha_with_budget(storage: &mut Storage) {
        storage
            .commit(|state| {
                state.add_member("Asha")?;
                state.set_budget(3000.0, 30, Utc::now())?;
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_commit_and_reload() {
        let (mut storage, temp) = storage();
        asha_with_budget(&mut storage);
        storage
            .commit(|state| state.add_expense(150.0, "Food", Utc::now()))
            .unwrap();

        let paths = BudgetPaths::with_base_dir(temp.path().to_path_buf());
        let reopened = Storage::open(paths).unwrap();
        assert_eq!(reopened.state(), storage.state());
    }

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let (mut storage, _temp) = storage();
        fs::write(
            storage.paths().state_file(),
            r#"{"familyMembers": [{"id": "member-1", "name": "Asha"}]}"#,
        )
        .unwrap();

        storage.load().unwrap();
        let state = storage.state();
        assert_eq!(state.family_members[0].name, "Asha");
        assert!(state.family_members[0].expenses.is_empty());
        assert_eq!(state.categories.len(), 5);
        assert!(state.current_member().is_none());
    }

    #[test]
    fn test_null_categories_keep_members() {
        let (mut storage, _temp) = storage();
        fs::write(
            storage.paths().state_file(),
            r#"{
                "familyMembers": [{
                    "id": "member-1",
                    "name": "Asha",
                    "budget": {"startingBalance": 3000, "timeframe": 30, "startDate": null},
                    "expenses": [
                        {"id": "expense-1", "amount": 150, "category": "Food", "date": "2024-05-01T10:00:00Z"},
                        {"id": "expense-2", "amount": "lots", "category": null, "date": 12}
                    ]
                }],
                "currentMember": "member-1",
                "categories": null
            }"#,
        )
        .unwrap();

        storage.load().unwrap();
        let state = storage.state();
        assert_eq!(state.family_members.len(), 1);
        assert_eq!(state.current_member().unwrap().name, "Asha");
        assert_eq!(state.categories.len(), 5);

        let asha = &state.family_members[0];
        assert!(asha.budget.is_active());
        assert_eq!(asha.expenses.len(), 2);
        assert_eq!(asha.total_spent(), Money::from_rupees(150));
        assert!(storage.paths().state_file().exists());
    }

    #[test]
    fn test_corrupt_snapshot_is_moved_aside() {
        let (mut storage, temp) = storage();
        fs::write(storage.paths().state_file(), "{ this is not json").unwrap();

        storage.load().unwrap();
        assert_eq!(storage.state(), &AppState::default());
        assert!(!storage.paths().state_file().exists());

        let quarantined: Vec<_> = fs::read_dir(temp.path().join("backups"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(quarantined.len(), 1);
        assert!(quarantined[0].starts_with("corrupt-"));
    }

    #[test]
    fn test_snapshot_uses_camel_case_keys() {
        let (mut storage, _temp) = storage();
        asha_with_budget(&mut storage);

        let text = fs::read_to_string(storage.paths().state_file()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let budget = &value["familyMembers"][0]["budget"];

        assert_eq!(value["currentMember"], value["familyMembers"][0]["id"]);
        assert_eq!(budget["startingBalance"], 3000.0);
        assert_eq!(budget["timeframe"], 30);
        assert_eq!(budget["dailyLimit"], 100.0);
        assert!(budget["startDate"].is_string());
    }

    #[test]
    fn test_update_settings_persists() {
        let (mut storage, temp) = storage();
        storage
            .update_settings(|settings| {
                settings.default_timeframe_days = 7;
                settings.backup_retention.keep = 2;
            })
            .unwrap();
        assert_eq!(storage.settings().default_timeframe_days, 7);

        let reopened = Storage::open(BudgetPaths::with_base_dir(temp.path().to_path_buf())).unwrap();
        assert_eq!(reopened.settings().default_timeframe_days, 7);
        assert_eq!(reopened.settings().backup_retention.keep, 2);
    }

    #[test]
    fn test_rejected_commit_changes_nothing() {
        let (mut storage, _temp) = storage();
        asha_with_budget(&mut storage);
        let before = storage.state().clone();

        let err = storage
            .commit(|state| state.add_expense(5000.0, "Food", Utc::now()))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.state(), &before);
    }

    #[test]
    fn test_failed_write_changes_nothing() {
        let (mut storage, _temp) = storage();
        asha_with_budget(&mut storage);
        let before = storage.state().clone();

        // A directory in place of the snapshot makes the final rename fail
        fs::remove_file(storage.paths().state_file()).unwrap();
        fs::create_dir(storage.paths().state_file()).unwrap();

        let result = storage.commit(|state| state.add_member("Ravi").map(|m| m.id.clone()));
        assert!(result.is_err());
        assert_eq!(storage.state(), &before);
    }
}
