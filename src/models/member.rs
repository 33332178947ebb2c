//! Family member model
//!
//! A member owns one budget envelope and the expenses recorded against it.
//! The transition methods validate everything before touching `self`, so a
//! rejected call leaves the member unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::{validate_balance, Budget, BudgetEnvelope, BudgetValidationError};
use super::category::CategorySet;
use super::expense::Expense;
use super::ids::MemberId;
use super::lenient;
use super::money::Money;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMember {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: MemberId,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub budget: Budget,

    /// Expenses in insertion order
    #[serde(default, deserialize_with = "lenient::list")]
    pub expenses: Vec<Expense>,
}

impl FamilyMember {
    /// Create a member with no budget and no expenses
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            budget: Budget::NoBudget,
            expenses: Vec::new(),
        }
    }

    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Starting balance minus everything spent; not clamped at zero
    pub fn remaining_balance(&self) -> Money {
        self.budget.starting_balance() - self.total_spent()
    }

    pub fn daily_limit(&self) -> Option<Money> {
        self.budget.daily_limit()
    }

    /// Replace the budget with a fresh envelope starting at `now`
    ///
    /// Existing expenses are kept; only [`FamilyMember::reset_budget`] clears them.
    pub fn set_budget(
        &mut self,
        starting_balance: f64,
        timeframe_days: i64,
        now: DateTime<Utc>,
    ) -> Result<BudgetEnvelope, BudgetValidationError> {
        let envelope = BudgetEnvelope::new(starting_balance, timeframe_days, now)?;
        self.budget = Budget::Active(envelope.clone());
        Ok(envelope)
    }

    /// Start the current envelope over with a new balance and no expenses
    pub fn reset_budget(
        &mut self,
        new_starting_balance: f64,
        now: DateTime<Utc>,
    ) -> Result<BudgetEnvelope, BudgetValidationError> {
        let Budget::Active(current) = &self.budget else {
            return Err(BudgetValidationError::NoBudgetToReset);
        };
        let starting_balance = validate_balance(new_starting_balance)?;

        let envelope = BudgetEnvelope {
            starting_balance,
            timeframe_days: current.timeframe_days,
            start_date: now,
        };
        self.budget = Budget::Active(envelope.clone());
        self.expenses.clear();
        Ok(envelope)
    }

    /// Record an expense dated `now`
    pub fn add_expense(
        &mut self,
        amount: f64,
        category: &str,
        categories: &CategorySet,
        now: DateTime<Utc>,
    ) -> Result<Expense, ExpenseValidationError> {
        let amount = Money::from_decimal(amount)
            .filter(Money::is_positive)
            .ok_or(ExpenseValidationError::InvalidAmount)?;

        let category = category.trim();
        if category.is_empty() {
            return Err(ExpenseValidationError::MissingCategory);
        }
        if !categories.contains(category) {
            return Err(ExpenseValidationError::UnknownCategory(category.to_string()));
        }

        let remaining = self.remaining_balance();
        if amount > remaining {
            return Err(ExpenseValidationError::ExceedsRemaining { amount, remaining });
        }

        let expense = Expense::new(amount, category, now);
        self.expenses.push(expense.clone());
        Ok(expense)
    }
}

impl fmt::Display for FamilyMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for expense input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    InvalidAmount,
    MissingCategory,
    UnknownCategory(String),
    ExceedsRemaining { amount: Money, remaining: Money },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAmount => write!(f, "Please enter a valid expense amount"),
            Self::MissingCategory => write!(f, "Please select an expense category"),
            Self::UnknownCategory(name) => write!(f, "Unknown expense category '{}'", name),
            Self::ExceedsRemaining { amount, remaining } => write!(
                f,
                "Expense exceeds remaining balance ({} requested, {} left)",
                amount, remaining
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}
