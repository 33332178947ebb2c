//! Expense model
//!
//! An expense is a dated, categorized amount spent by one family member.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::lenient;
use super::money::Money;

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ExpenseId,

    /// Amount spent (always positive for expenses recorded through the ledger)
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub amount: Money,

    /// Category name, one of the ledger's categories at the time of entry
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub category: String,

    /// When the expense was recorded
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub date: DateTime<Utc>,
}

impl Expense {
    /// Create an expense with a fresh ID
    pub fn new(amount: Money, category: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: ExpenseId::new(),
            amount,
            category: category.into(),
            date,
        }
    }

    /// Calendar day of this expense in the local time zone
    pub fn local_date(&self) -> NaiveDate {
        self.date.with_timezone(&Local).date_naive()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.local_date(), self.amount, self.category)
    }
}
