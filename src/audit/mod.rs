//! Audit logging for the expense tracker
//!
//! Every successful mutation (expense added, budget set or replaced) is
//! appended to a line-delimited JSON log.
//!
//! - `AuditEntry`: timestamp, operation, entity, and before/after snapshots.
//! - `AuditLogger`: appends entries to the JSONL file and reads them back.
//! - `generate_diff`: summarizes field changes between two snapshots.
//!
//! # Example
//!
//! ```rust,ignore
//! use expense_tracker::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(EntityType::Expense, "1", Some("Coffee".into()), &expense);
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
