//! Ledger import and export
//!
//! The exchange format is the snapshot itself (camelCase JSON), optionally
//! pretty-printed.

pub mod json;

pub use json::{export_state_json, import_state_json, SnapshotSummary};
