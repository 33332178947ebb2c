//! Audit log for ledger mutations
//!
//! Every accepted mutation (member added or selected, budget set or reset,
//! expense recorded, category added, snapshot imported) appends one JSON line to
//! `audit.log` with the entity touched and its before/after values.
//!
//! ```rust,ignore
//! use family_budget::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::FamilyMember,
//!     member.id.as_str(),
//!     Some(member.name.clone()),
//!     &member,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
