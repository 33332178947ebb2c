//! Core data models
//!
//! The ledger domain: family members, their budget envelopes and expenses, the
//! shared category set, and the root `AppState` that owns them all.

pub mod budget;
pub mod category;
pub mod expense;
pub mod ids;
mod lenient;
pub mod member;
pub mod money;
pub mod state;

pub use budget::{Budget, BudgetEnvelope, BudgetValidationError};
pub use category::{CategorySet, CategoryValidationError, DEFAULT_CATEGORIES};
pub use expense::Expense;
pub use ids::{ExpenseId, MemberId};
pub use member::{ExpenseValidationError, FamilyMember};
pub use money::{Money, MoneyParseError};
pub use state::AppState;
