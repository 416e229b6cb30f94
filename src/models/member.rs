//! Group member model
//!
//! A member is the view of a [`User`] inside one group. Groups only persist
//! member ids; the records here are resolved from the user store on read.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::user::User;

/// Members are identified by the id of the user behind them
pub type MemberId = UserId;

/// A member of a group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar_url: String::new(),
        }
    }
}

impl From<&User> for Member {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
        }
    }
}

/// Collect the ids of a member list, preserving order
pub fn member_ids(members: &[Member]) -> Vec<MemberId> {
    members.iter().map(|m| m.id).collect()
}
