//! Snapshot backups
//!
//! Before an import replaces the ledger, the current snapshot is copied to
//! `backups/backup-YYYYMMDD-HHMMSS-mmm.json`, and only the newest
//! `backup_retention.keep` copies are kept. A snapshot that cannot be parsed
//! is moved to `backups/corrupt-YYYYMMDD-HHMMSS-mmm.json` instead of being
//! overwritten.
//!
//! Backups share the snapshot format, so `budget import <backup>` restores one.

mod manager;

pub use manager::{BackupInfo, BackupManager};
