//! Service layer for groupsplit
//!
//! Services sit on top of [`crate::storage::Storage`]: they resolve the
//! current user, enforce membership and authorship, validate input, call
//! the ledger, and persist plus audit the result.

pub mod expense;
pub mod group;
pub mod user;

pub use expense::{ExpenseInput, ExpenseService};
pub use group::{GroupService, GroupSummary, JoinOutcome};
pub use user::{LoginOutcome, UserService};
