//! Core data models for groupsplit
//!
//! This module contains the data structures that represent the shared
//! expense domain: users, group members, groups, expenses and their splits.

pub mod expense;
pub mod group;
pub mod ids;
pub mod member;
pub mod money;
pub mod user;

pub use expense::{Comment, Expense, ExpenseValidationError, Split};
pub use group::{Group, GroupValidationError};
pub use ids::{CommentId, ExpenseId, GroupId, UserId};
pub use member::{member_ids, Member, MemberId};
pub use money::{Money, MoneyParseError};
pub use user::{User, UserValidationError};
