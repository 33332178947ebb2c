//! Service layer
//!
//! Each service wraps the validated transitions on `AppState` with persistence:
//! the snapshot is saved after every accepted mutation, the change is appended to
//! the audit log, and a `tracing` event is emitted. A rejected operation returns
//! before any of that happens.

pub mod budget;
pub mod category;
pub mod expense;
pub mod member;
pub mod snapshot;

pub use budget::BudgetService;
pub use category::CategoryService;
pub use expense::{ExpenseOutcome, ExpenseService};
pub use member::MemberService;
pub use snapshot::{ImportOutcome, SnapshotService};
