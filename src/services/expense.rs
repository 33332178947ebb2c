//! Expense service
//!
//! Recording expenses for the selected member and checking the day's spending
//! against the daily limit.

use chrono::{Local, Utc};

use crate::audit::EntityType;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{Expense, Money};
use crate::reports;
use crate::storage::Storage;

/// Result of recording an expense
#[derive(Debug, Clone)]
pub struct ExpenseOutcome {
    pub expense: Expense,
    pub remaining: Money,
    /// Today's total and the limit it passed; informational only
    pub over_daily_limit: Option<(Money, Money)>,
}

/// Service for expenses
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Record an expense dated now for the selected member
    pub fn add(&mut self, amount: f64, category: &str) -> BudgetResult<ExpenseOutcome> {
        let expense = self
            .storage
            .commit(|state| state.add_expense(amount, category, Utc::now()))?;

        let member = self
            .storage
            .state()
            .current_member()
            .ok_or_else(BudgetError::no_member_selected)?;
        self.storage.log_create(
            EntityType::Expense,
            expense.id.as_str(),
            Some(member.name.clone()),
            &expense,
        )?;
        tracing::info!(
            expense = %expense.id,
            amount = %expense.amount,
            category = %expense.category,
            "expense added"
        );

        let over_daily_limit = reports::over_daily_limit(member, Local::now().date_naive());
        if let Some((spent, limit)) = over_daily_limit {
            tracing::warn!(%spent, %limit, member = %member.id, "daily limit exceeded");
        }

        Ok(ExpenseOutcome {
            remaining: member.remaining_balance(),
            expense,
            over_daily_limit,
        })
    }

    /// The selected member's expenses, newest first
    pub fn list(&self, limit: Option<usize>) -> BudgetResult<Vec<&Expense>> {
        let member = self
            .storage
            .state()
            .current_member()
            .ok_or_else(BudgetError::no_member_selected)?;

        let newest_first = member.expenses.iter().rev();
        Ok(match limit {
            Some(n) => newest_first.take(n).collect(),
            None => newest_first.collect(),
        })
    }
}
