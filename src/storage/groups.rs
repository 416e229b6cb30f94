//! Group repository for JSON storage
//!
//! Manages loading and saving groups to groups.json. Each group record
//! carries its member ids and its full expense history, so every expense
//! mutation is a read-modify-write of the owning group.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::GroupSplitError;
use crate::models::{Group, GroupId, MemberId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable group data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct GroupData {
    groups: Vec<Group>,
}

/// Repository for group persistence
pub struct GroupRepository {
    path: PathBuf,
    data: RwLock<HashMap<GroupId, Group>>,
}

impl GroupRepository {
    /// Create a new group repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load groups from disk
    pub fn load(&self) -> Result<(), GroupSplitError> {
        let file_data: GroupData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for group in file_data.groups {
            data.insert(group.id, group);
        }

        Ok(())
    }

    /// Save groups to disk
    pub fn save(&self) -> Result<(), GroupSplitError> {
        let groups = self.get_all()?;
        write_json_atomic(&self.path, &GroupData { groups })
    }

    /// Get a group by ID
    pub fn get(&self, id: GroupId) -> Result<Option<Group>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get all groups, newest first
    pub fn get_all(&self) -> Result<Vec<Group>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut groups: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut groups);
        Ok(groups)
    }

    /// Get a group by its invite code (case-insensitive)
    pub fn get_by_invite_code(&self, code: &str) -> Result<Option<Group>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.values().find(|g| g.invite_code_matches(code)).cloned())
    }

    /// Get the groups a member belongs to, newest first
    pub fn get_for_member(&self, member_id: MemberId) -> Result<Vec<Group>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut groups: Vec<_> = data
            .values()
            .filter(|g| g.has_member(member_id))
            .cloned()
            .collect();
        sort_newest_first(&mut groups);
        Ok(groups)
    }

    /// Insert or update a group
    pub fn upsert(&self, group: Group) -> Result<(), GroupSplitError> {
        let mut data = self.data.write().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(group.id, group);
        Ok(())
    }

    /// Check whether an invite code is already in use
    pub fn invite_code_exists(&self, code: &str) -> Result<bool, GroupSplitError> {
        Ok(self.get_by_invite_code(code)?.is_some())
    }

    /// Count groups
    pub fn count(&self) -> Result<usize, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

fn sort_newest_first(groups: &mut [Group]) {
    groups.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));
}
