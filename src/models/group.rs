//! Group model
//!
//! A group owns its ordered member id list and its full expense history.
//! Members are never removed; expenses are appended, replaced on edit and
//! removed on delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::expense::Expense;
use super::ids::{ExpenseId, GroupId};
use super::member::MemberId;

/// Length of a group invite code
pub const INVITE_CODE_LEN: usize = 6;

/// A group of people sharing expenses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier
    pub id: GroupId,

    /// Group name
    pub name: String,

    /// Code other users enter to join
    pub invite_code: String,

    /// Member ids in join order; the creator is always first
    pub member_ids: Vec<MemberId>,

    /// Expense history in creation order
    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// When the group was created
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Create a new group with its creator as the only member
    pub fn new(name: impl Into<String>, creator: MemberId) -> Self {
        Self {
            id: GroupId::new(),
            name: name.into(),
            invite_code: generate_invite_code(),
            member_ids: vec![creator],
            expenses: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn has_member(&self, member_id: MemberId) -> bool {
        self.member_ids.contains(&member_id)
    }

    /// Add a member; returns false if they were already in the group
    pub fn add_member(&mut self, member_id: MemberId) -> bool {
        if self.has_member(member_id) {
            return false;
        }
        self.member_ids.push(member_id);
        true
    }

    pub fn find_expense(&self, expense_id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == expense_id)
    }

    pub fn find_expense_mut(&mut self, expense_id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id == expense_id)
    }

    /// Remove an expense, returning it if it existed
    pub fn remove_expense(&mut self, expense_id: ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id == expense_id)?;
        Some(self.expenses.remove(index))
    }

    /// Check whether an invite code refers to this group
    pub fn invite_code_matches(&self, code: &str) -> bool {
        self.invite_code.eq_ignore_ascii_case(code.trim())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Generate a fresh invite code of uppercase hex characters
pub fn generate_invite_code() -> String {
    Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(INVITE_CODE_LEN)
        .collect::<String>()
        .to_uppercase()
}

pub fn validate_group_name(name: &str) -> Result<(), GroupValidationError> {
    if name.trim().chars().count() < 3 {
        return Err(GroupValidationError::NameTooShort);
    }
    Ok(())
}

/// Validation errors for groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupValidationError {
    NameTooShort,
}

impl fmt::Display for GroupValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NameTooShort => write!(f, "Group name must be at least 3 characters."),
        }
    }
}

impl std::error::Error for GroupValidationError {}
