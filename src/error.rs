//! Custom error types for groupsplit
//!
//! The crate-wide error is [`GroupSplitError`]. Split allocation failures
//! have their own enum ([`crate::ledger::AllocationError`]) and are wrapped
//! transparently so their messages reach the user unchanged.

use thiserror::Error;

use crate::ledger::AllocationError;
use crate::models::{ExpenseValidationError, GroupValidationError, UserValidationError};

/// The main error type for groupsplit operations
#[derive(Error, Debug)]
pub enum GroupSplitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("{0}")]
    Validation(String),

    /// Split allocation rejected the expense
    #[error(transparent)]
    Allocation(#[from] AllocationError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// No user is logged in
    #[error("{0}")]
    Unauthenticated(String),

    /// The current user may not touch this entity
    #[error("{0}")]
    PermissionDenied(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl GroupSplitError {
    /// Create a "not found" error for groups
    pub fn group_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Group",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for group members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for users
    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error (including split allocation)
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Allocation(_))
    }
}

impl From<std::io::Error> for GroupSplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for GroupSplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<UserValidationError> for GroupSplitError {
    fn from(err: UserValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<GroupValidationError> for GroupSplitError {
    fn from(err: GroupValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ExpenseValidationError> for GroupSplitError {
    fn from(err: ExpenseValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for groupsplit operations
pub type GroupSplitResult<T> = Result<T, GroupSplitError>;
