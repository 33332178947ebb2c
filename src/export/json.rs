//! JSON snapshot export and import
//!
//! Exports use exactly the stored snapshot shape, so an export, a backup and
//! `data/state.json` are interchangeable.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::AppState;

/// Counts describing a snapshot, for confirmations and audit entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub member_count: usize,
    pub expense_count: usize,
    pub category_count: usize,
}

impl SnapshotSummary {
    pub fn of(state: &AppState) -> Self {
        Self {
            member_count: state.family_members.len(),
            expense_count: state.family_members.iter().map(|m| m.expenses.len()).sum(),
            category_count: state.categories.len(),
        }
    }
}

impl std::fmt::Display for SnapshotSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} members, {} expenses, {} categories",
            self.member_count, self.expense_count, self.category_count
        )
    }
}

/// Write the ledger as JSON
pub fn export_state_json<W: Write>(state: &AppState, writer: &mut W, pretty: bool) -> BudgetResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, state)
    } else {
        serde_json::to_writer(&mut *writer, state)
    };
    result.map_err(|e| BudgetError::Export(format!("Failed to serialize ledger: {}", e)))?;

    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))
}

/// Parse an exported (or stored) snapshot
///
/// Missing, null or mistyped fields take their defaults, like loading. Text that
/// is not a JSON object is rejected.
pub fn import_state_json(text: &str) -> BudgetResult<AppState> {
    let invalid = |e: serde_json::Error| BudgetError::Import(format!("Not a valid ledger file: {}", e));

    let value: serde_json::Value = serde_json::from_str(text).map_err(invalid)?;
    if !value.is_object() {
        return Err(BudgetError::Import(
            "Not a valid ledger file: expected a JSON object".into(),
        ));
    }
    AppState::from_json(text).map_err(invalid)
}
