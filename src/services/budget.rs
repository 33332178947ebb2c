//! Budget service
//!
//! Setting and resetting the selected member's budget envelope.

use chrono::Utc;

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Budget, BudgetEnvelope};
use crate::storage::Storage;

/// Service for budget envelopes
pub struct BudgetService<'a> {
    storage: &'a mut Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Give the selected member a new budget starting now
    pub fn set(&mut self, starting_balance: f64, timeframe_days: i64) -> BudgetResult<BudgetEnvelope> {
        let before = self.current_budget()?;
        let envelope = self
            .storage
            .commit(|state| state.set_budget(starting_balance, timeframe_days, Utc::now()))?;

        self.log_change(&before, &envelope)?;
        tracing::info!(
            starting_balance = %envelope.starting_balance,
            timeframe_days = envelope.timeframe_days,
            "budget set"
        );
        Ok(envelope)
    }

    /// Restart the selected member's budget with a new balance, clearing expenses
    pub fn reset(&mut self, new_starting_balance: f64) -> BudgetResult<BudgetEnvelope> {
        let before = self.current_budget()?;
        let cleared = self
            .storage
            .state()
            .current_member()
            .map_or(0, |m| m.expenses.len());

        let envelope = self
            .storage
            .commit(|state| state.reset_budget(new_starting_balance, Utc::now()))?;

        self.log_change(&before, &envelope)?;
        tracing::info!(
            starting_balance = %envelope.starting_balance,
            expenses_cleared = cleared,
            "budget reset"
        );
        Ok(envelope)
    }

    /// The selected member's budget
    pub fn current(&self) -> BudgetResult<&Budget> {
        self.storage
            .state()
            .current_member()
            .map(|m| &m.budget)
            .ok_or_else(BudgetError::no_member_selected)
    }

    fn current_budget(&self) -> BudgetResult<Budget> {
        self.current().cloned()
    }

    fn log_change(&self, before: &Budget, envelope: &BudgetEnvelope) -> BudgetResult<()> {
        let member = self
            .storage
            .state()
            .current_member()
            .ok_or_else(BudgetError::no_member_selected)?;
        self.storage.log_update(
            EntityType::Budget,
            member.id.as_str(),
            Some(member.name.clone()),
            before,
            &Budget::Active(envelope.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BudgetPaths, Settings};
    use crate::models::Money;
    use crate::services::{ExpenseService, MemberService};
    use tempfile::TempDir;

    fn storage_with_member() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, Settings::default()).unwrap();
        MemberService::new(&mut storage).add("Asha").unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_set_budget() {
        let (mut storage, _temp) = storage_with_member();
        let envelope = BudgetService::new(&mut storage).set(3000.0, 30).unwrap();

        assert_eq!(envelope.daily_limit(), Money::from_rupees(100));
        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert_eq!(last.entity_type, EntityType::Budget);
        assert!(last
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("startingBalance: (added) -> 3000"));
    }

    #[test]
    fn test_set_budget_rejections() {
        let (mut storage, _temp) = storage_with_member();
        let mut service = BudgetService::new(&mut storage);

        assert!(service.set(0.0, 30).unwrap_err().is_validation());
        assert!(service.set(-10.0, 30).unwrap_err().is_validation());
        assert!(service.set(f64::INFINITY, 30).unwrap_err().is_validation());
        assert!(service.set(100.0, 0).unwrap_err().is_validation());
        assert_eq!(service.current().unwrap(), &Budget::NoBudget);
    }

    #[test]
    fn test_reset_budget() {
        let (mut storage, _temp) = storage_with_member();
        BudgetService::new(&mut storage).set(3000.0, 30).unwrap();
        ExpenseService::new(&mut storage).add(150.0, "Food").unwrap();

        let envelope = BudgetService::new(&mut storage).reset(1500.0).unwrap();
        assert_eq!(envelope.timeframe_days, 30);

        let member = storage.state().current_member().unwrap();
        assert!(member.expenses.is_empty());
        assert_eq!(member.remaining_balance(), Money::from_rupees(1500));
    }

    #[test]
    fn test_reset_without_budget() {
        let (mut storage, _temp) = storage_with_member();
        let err = BudgetService::new(&mut storage).reset(1500.0).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_no_member_selected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths, Settings::default()).unwrap();

        let err = BudgetService::new(&mut storage).set(3000.0, 30).unwrap_err();
        assert!(err.is_not_found());
    }
}
