//! User model
//!
//! A registered person. Users become group members by creating or joining
//! a group; the member view of a user is [`super::Member`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Display name
    pub name: String,

    /// E-mail address, unique per user (compared case-insensitively)
    pub email: String,

    /// Avatar image URL
    #[serde(default)]
    pub avatar_url: String,

    /// When the user registered
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated avatar URL
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        Self {
            id: UserId::new(),
            name: name.into(),
            avatar_url: default_avatar_url(&email),
            email,
            created_at: Utc::now(),
        }
    }

    /// Validate the user's name and e-mail
    pub fn validate(&self) -> Result<(), UserValidationError> {
        validate_email(&self.email)?;
        validate_name(&self.name)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Avatar placeholder seeded by e-mail
pub fn default_avatar_url(email: &str) -> String {
    format!("https://picsum.photos/seed/{}/150/150", email)
}

/// Check that an e-mail address is plausibly valid
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmail)
    }
}

/// Check that a display name is long enough
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().chars().count() < 2 {
        return Err(UserValidationError::NameTooShort);
    }
    Ok(())
}

/// Validation errors for users
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    InvalidEmail,
    NameTooShort,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "Please enter a valid email address."),
            Self::NameTooShort => write!(f, "Name must be at least 2 characters."),
        }
    }
}

impl std::error::Error for UserValidationError {}
