//! Expense model
//!
//! An expense records who paid, how much, and how the total was divided
//! among the group's members. The split list is produced by the ledger's
//! split allocator and stored as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CommentId, ExpenseId, UserId};
use super::member::MemberId;
use super::money::Money;
use super::user::User;

/// Largest total a single expense may carry (one trillion major units)
pub const MAX_EXPENSE_AMOUNT: Money = Money::from_cents(100_000_000_000_000);

/// One member's share of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Split {
    /// The member who owes this share
    pub member_id: MemberId,

    /// Owed amount in minor units, never negative
    pub amount: Money,
}

impl Split {
    pub fn new(member_id: MemberId, amount: Money) -> Self {
        Self { member_id, amount }
    }
}

/// A comment left on an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub author_id: UserId,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: &User, text: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            author_id: author.id,
            author_name: author.name.clone(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A shared expense within a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What the money was spent on
    pub description: String,

    /// Total amount paid
    pub amount: Money,

    /// The member who paid the total
    pub paid_by: MemberId,

    /// The user who recorded the expense; only they may edit or delete it
    pub author_id: UserId,

    /// Per-member shares, one entry per group member
    pub splits: Vec<Split>,

    /// When the expense was recorded
    pub created_at: DateTime<Utc>,

    /// Discussion on this expense
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Expense {
    /// Create a new expense
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        paid_by: MemberId,
        author_id: UserId,
        splits: Vec<Split>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            paid_by,
            author_id,
            splits,
            created_at: Utc::now(),
            comments: Vec::new(),
        }
    }

    /// Whether the given user recorded this expense
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.amount)
    }
}

pub fn validate_description(description: &str) -> Result<(), ExpenseValidationError> {
    if description.trim().is_empty() {
        return Err(ExpenseValidationError::EmptyDescription);
    }
    Ok(())
}

pub fn validate_amount(amount: Money) -> Result<(), ExpenseValidationError> {
    if !amount.is_positive() {
        return Err(ExpenseValidationError::NonPositiveAmount);
    }
    if amount > MAX_EXPENSE_AMOUNT {
        return Err(ExpenseValidationError::AmountTooLarge);
    }
    Ok(())
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NonPositiveAmount,
    AmountTooLarge,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description is required."),
            Self::NonPositiveAmount => write!(f, "Amount must be positive."),
            Self::AmountTooLarge => write!(
                f,
                "Amount must not exceed {}.",
                MAX_EXPENSE_AMOUNT
            ),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_authored_by() {
        let a = MemberId::new();
        let expense = Expense::new("Taxi", Money::from_cents(250), a, a, Vec::new());
        assert!(expense.is_authored_by(a));
        assert!(!expense.is_authored_by(MemberId::new()));
    }

    #[test]
    fn test_validation() {
        assert!(validate_description("Taxi").is_ok());
        assert_eq!(
            validate_description("  "),
            Err(ExpenseValidationError::EmptyDescription)
        );

        assert!(validate_amount(Money::from_cents(250)).is_ok());
        assert_eq!(
            validate_amount(Money::zero()),
            Err(ExpenseValidationError::NonPositiveAmount)
        );
    }

    #[test]
    fn test_amount_upper_bound() {
        assert!(validate_amount(MAX_EXPENSE_AMOUNT).is_ok());
        assert_eq!(
            validate_amount(Money::parse("90000000000000000").unwrap()),
            Err(ExpenseValidationError::AmountTooLarge)
        );
        assert_eq!(
            ExpenseValidationError::AmountTooLarge.to_string(),
            "Amount must not exceed 1000000000000.00."
        );
    }

    #[test]
    fn test_comments_default_on_deserialize() {
        let a = MemberId::new();
        let expense = Expense::new("Taxi", Money::from_cents(250), a, a, Vec::new());
        let mut json = serde_json::to_value(&expense).unwrap();
        json.as_object_mut().unwrap().remove("comments");

        let restored: Expense = serde_json::from_value(json).unwrap();
        assert!(restored.comments.is_empty());
    }
}
