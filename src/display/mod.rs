//! Display formatting for terminal output
//!
//! Plain-text tables for members, expenses and categories. Amounts are always
//! shown in rupees with Indian digit grouping (`₹1,23,456.78`).

pub mod category;
pub mod expense;
pub mod member;
pub mod report;

pub use category::format_category_list;
pub use expense::format_expense_list;
pub use member::{format_member_details, format_member_list};
pub use report::{format_bar, format_limit_warning};
