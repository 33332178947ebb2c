//! Snapshot backups with count-based retention
//!
//! A backup is a byte-for-byte copy of the ledger snapshot, so any backup can be
//! brought back with a plain import.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::config::paths::BudgetPaths;
use crate::config::settings::BackupRetention;
use crate::error::{BudgetError, BudgetResult};

const BACKUP_PREFIX: &str = "backup-";
const CORRUPT_PREFIX: &str = "corrupt-";

/// A backup file found in the backup directory
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    pub path: PathBuf,
    pub created_at: DateTime<Utc>,
    pub size_bytes: u64,
}

/// Creates, lists and prunes snapshot backups
pub struct BackupManager {
    backup_dir: PathBuf,
    state_file: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    pub fn new(paths: &BudgetPaths, retention: BackupRetention) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            state_file: paths.state_file(),
            retention,
        }
    }

    /// Copy the current snapshot into the backup directory
    ///
    /// Returns `None` when there is no snapshot on disk yet.
    pub fn create_backup(&self) -> BudgetResult<Option<PathBuf>> {
        if !self.state_file.exists() {
            return Ok(None);
        }

        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create backup directory: {}", e)))?;

        let backup_path = self
            .backup_dir
            .join(stamped_filename(BACKUP_PREFIX, Utc::now()));
        fs::copy(&self.state_file, &backup_path)
            .map_err(|e| BudgetError::Io(format!("Failed to write backup file: {}", e)))?;

        tracing::debug!(path = %backup_path.display(), "snapshot backed up");
        Ok(Some(backup_path))
    }

    /// Backup followed by pruning; returns the new backup and the deleted ones
    pub fn create_backup_with_retention(
        &self,
    ) -> BudgetResult<(Option<PathBuf>, Vec<PathBuf>)> {
        let created = self.create_backup()?;
        let deleted = self.enforce_retention()?;
        Ok((created, deleted))
    }

    /// All regular backups, newest first
    pub fn list_backups(&self) -> BudgetResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.backup_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to read backup directory: {}", e)))?;

        let mut backups = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if let Some(info) = backup_info(&path) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    /// Delete everything past the newest `keep` backups
    pub fn enforce_retention(&self) -> BudgetResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();
        for backup in self
            .list_backups()?
            .into_iter()
            .skip(self.retention.keep as usize)
        {
            fs::remove_file(&backup.path)
                .map_err(|e| BudgetError::Io(format!("Failed to delete old backup: {}", e)))?;
            deleted.push(backup.path);
        }
        Ok(deleted)
    }

    /// Move an unreadable snapshot out of the way, keeping it for inspection
    pub fn quarantine(&self, path: &Path) -> BudgetResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir)
            .map_err(|e| BudgetError::Io(format!("Failed to create backup directory: {}", e)))?;

        let target = self
            .backup_dir
            .join(stamped_filename(CORRUPT_PREFIX, Utc::now()));
        fs::rename(path, &target).map_err(|e| {
            BudgetError::Io(format!(
                "Failed to move {} aside: {}",
                path.display(),
                e
            ))
        })?;
        Ok(target)
    }

    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }
}

fn stamped_filename(prefix: &str, at: DateTime<Utc>) -> String {
    format!(
        "{}{}-{:03}.json",
        prefix,
        at.format("%Y%m%d-%H%M%S"),
        at.timestamp_subsec_millis()
    )
}

fn backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();
    let stamp = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(".json")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS` with an optional `-mmm` millisecond suffix
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let (seconds, millis) = match stamp.get(..15) {
        Some(head) if stamp.len() == 15 => (head, 0),
        Some(head) => (head, stamp.get(15..)?.strip_prefix('-')?.parse::<u32>().ok()?),
        None => return None,
    };
    if millis > 999 {
        return None;
    }

    let naive = NaiveDateTime::parse_from_str(seconds, "%Y%m%d-%H%M%S").ok()?;
    let naive = naive.checked_add_signed(chrono::Duration::milliseconds(millis as i64))?;
    Some(naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use std::thread::sleep;
    use std::time::Duration;
    use tempfile::TempDir;

    fn manager(keep: u32) -> (BackupManager, BudgetPaths, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        fs::write(paths.state_file(), r#"{"familyMembers":[],"categories":[]}"#).unwrap();

        let manager = BackupManager::new(&paths, BackupRetention { keep });
        (manager, paths, temp_dir)
    }

    #[test]
    fn test_create_backup_copies_snapshot() {
        let (manager, paths, _temp) = manager(5);

        let backup = manager.create_backup().unwrap().unwrap();
        assert!(backup.file_name().unwrap().to_string_lossy().starts_with("backup-"));
        assert_eq!(
            fs::read_to_string(backup).unwrap(),
            fs::read_to_string(paths.state_file()).unwrap()
        );
    }

    #[test]
    fn test_no_snapshot_no_backup() {
        let (manager, paths, _temp) = manager(5);
        fs::remove_file(paths.state_file()).unwrap();

        assert!(manager.create_backup().unwrap().is_none());
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_list_backups_newest_first() {
        let (manager, _paths, _temp) = manager(5);
        manager.create_backup().unwrap();
        sleep(Duration::from_millis(20));
        manager.create_backup().unwrap();

        let backups = manager.list_backups().unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].created_at > backups[1].created_at);
    }

    #[test]
    fn test_retention_keeps_newest() {
        let (manager, _paths, _temp) = manager(3);
        for _ in 0..5 {
            manager.create_backup().unwrap();
            sleep(Duration::from_millis(20));
        }

        let (created, deleted) = manager.create_backup_with_retention().unwrap();
        assert_eq!(deleted.len(), 3);

        let remaining = manager.list_backups().unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(Some(&remaining[0].path), created.as_ref());
    }

    #[test]
    fn test_quarantine_is_not_listed() {
        let (manager, paths, _temp) = manager(5);

        let moved = manager.quarantine(&paths.state_file()).unwrap();
        assert!(!paths.state_file().exists());
        assert!(moved.file_name().unwrap().to_string_lossy().starts_with("corrupt-"));
        assert!(manager.list_backups().unwrap().is_empty());
    }

    #[test]
    fn test_parse_backup_timestamp() {
        let at = parse_backup_timestamp("20251127-143022").unwrap();
        assert_eq!((at.year(), at.month(), at.day()), (2025, 11, 27));
        assert_eq!((at.hour(), at.minute(), at.second()), (14, 30, 22));

        let at = parse_backup_timestamp("20251127-143022-456").unwrap();
        assert_eq!(at.timestamp_subsec_millis(), 456);

        assert!(parse_backup_timestamp("2025-11-27").is_none());
        assert!(parse_backup_timestamp("20251127-143022-x").is_none());
    }
}
