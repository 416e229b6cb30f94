//! Audit logging
//!
//! Every create, update and delete of a user, group, expense or comment is
//! appended to `audit.log` with before/after snapshots.
//!
//! - `AuditEntry`: one operation on one entity
//! - `AuditLogger`: JSONL writer and reader for the log file
//! - `generate_diff`: top-level field diff used for update summaries

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
