//! Reports for family members
//!
//! Budget position (remaining balance, spending streak, days needed) and the
//! rolling weekly spending breakdown.

pub mod summary;
pub mod weekly;

pub use summary::{days_needed, days_without_spending, over_daily_limit, spent_today, SpendingSummary};
pub use weekly::{WeeklyReport, WINDOW_DAYS};
