//! Family Budget - per-member budget envelopes with daily limits
//!
//! Each family member gets a budget envelope (a starting balance spread over a
//! timeframe, giving a daily limit) and records dated expenses against a shared
//! list of categories. The whole ledger lives in memory as an [`models::AppState`]
//! and is mirrored to a single JSON snapshot after every change.
//!
//! # Architecture
//!
//! - `config`: Paths and user settings
//! - `error`: The [`BudgetError`] type
//! - `models`: Members, budgets, expenses, categories and the ledger root
//! - `storage`: Snapshot load/save with atomic writes
//! - `services`: Validated operations with persistence and audit logging
//! - `reports`: Spending summary and the weekly report
//! - `export`: Snapshot import and export
//! - `audit`: Append-only audit log
//! - `backup`: Snapshot backups and retention
//! - `display`, `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use family_budget::config::BudgetPaths;
//! use family_budget::services::{BudgetService, ExpenseService, MemberService};
//! use family_budget::storage::Storage;
//!
//! let mut storage = Storage::open(BudgetPaths::new()?)?;
//! MemberService::new(&mut storage).add("Asha")?;
//! BudgetService::new(&mut storage).set(3000.0, 30)?;
//! let outcome = ExpenseService::new(&mut storage).add(150.0, "Food")?;
//! assert!(outcome.over_daily_limit.is_some());
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Install the global `tracing` subscriber (stderr, filtered by `RUST_LOG`)
///
/// Defaults to warnings from this crate only. Safe to call more than once.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("family_budget=warn"));

        // Another subscriber may already be installed (e.g. by a test harness)
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing();
        super::init_tracing();
        tracing::debug!("tracing initialized twice without panicking");
    }
}
