//! Session persistence
//!
//! Remembers which user is logged in between invocations. A missing
//! session file means nobody is logged in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::GroupSplitError;
use crate::models::UserId;

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

/// The logged-in identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionData {
    #[serde(default)]
    session: Option<Session>,
}

/// Store for the current session
pub struct SessionStore {
    path: PathBuf,
    current: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            current: RwLock::new(None),
        }
    }

    /// Load the session from disk
    pub fn load(&self) -> Result<(), GroupSplitError> {
        let file_data: SessionData = read_json(&self.path)?;

        let mut current = self.current.write().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *current = file_data.session;

        Ok(())
    }

    /// The session in effect, if any
    pub fn current(&self) -> Result<Option<Session>, GroupSplitError> {
        let current = self.current.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(*current)
    }

    /// The logged-in user's id, if any
    pub fn current_user_id(&self) -> Result<Option<UserId>, GroupSplitError> {
        Ok(self.current()?.map(|s| s.user_id))
    }

    /// Start a session for a user and persist it
    pub fn start(&self, user_id: UserId) -> Result<Session, GroupSplitError> {
        let session = Session {
            user_id,
            started_at: Utc::now(),
        };

        {
            let mut current = self.current.write().map_err(|e| {
                GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            *current = Some(session);
        }

        write_json_atomic(
            &self.path,
            &SessionData {
                session: Some(session),
            },
        )?;
        Ok(session)
    }

    /// End the session; returns the user that was logged in
    pub fn end(&self) -> Result<Option<UserId>, GroupSplitError> {
        let previous = {
            let mut current = self.current.write().map_err(|e| {
                GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
            })?;
            current.take()
        };

        remove_if_exists(&self.path)?;
        Ok(previous.map(|s| s.user_id))
    }
}
