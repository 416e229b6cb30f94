//! groupsplit - shared expense tracking for small groups
//!
//! Members of a group record who paid for what and how each expense is
//! divided. The crate keeps a per-member balance and proposes a short list
//! of payments that settles everyone up.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `ledger`: Split allocation, balance accumulation and debt simplification
//! - `models`: Users, groups, expenses and money
//! - `storage`: JSON file storage layer and the login session
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `config`: Configuration and path management
//! - `display`: Plain-text formatting for the terminal
//! - `cli`: Command handlers for the `groupsplit` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use groupsplit::ledger::{allocate_splits, calculate_balances, simplify_debts, SplitDirective};
//! use groupsplit::models::{Expense, Member, MemberId, Money};
//!
//! let members = vec![
//!     Member::new(MemberId::new(), "Asha"),
//!     Member::new(MemberId::new(), "Ravi"),
//! ];
//! let ids: Vec<MemberId> = members.iter().map(|m| m.id).collect();
//!
//! let total = Money::from_cents(10000);
//! let splits = allocate_splits(total, &ids, &SplitDirective::Equal)?;
//! let expense = Expense::new("Groceries", total, ids[0], ids[0], splits);
//!
//! let balances = calculate_balances(&members, &[expense]);
//! let debts = simplify_debts(&balances);
//! assert_eq!(debts[0].amount, Money::from_cents(5000));
//! # Ok::<(), groupsplit::ledger::AllocationError>(())
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod ledger;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{GroupSplitError, GroupSplitResult};
