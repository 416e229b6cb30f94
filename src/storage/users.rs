//! User repository for JSON storage
//!
//! Manages loading and saving registered users to users.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::GroupSplitError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable user data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), GroupSplitError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk, oldest registration first
    pub fn save(&self) -> Result<(), GroupSplitError> {
        let users = self.get_all()?;
        write_json_atomic(&self.path, &UserData { users })
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.get(&id).cloned())
    }

    /// Get several users, skipping ids that are not registered
    pub fn get_many(&self, ids: &[UserId]) -> Result<Vec<User>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(ids.iter().filter_map(|id| data.get(id).cloned()).collect())
    }

    /// Get all users in registration order
    pub fn get_all(&self) -> Result<Vec<User>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.email.cmp(&b.email)));
        Ok(users)
    }

    /// Get a user by e-mail (case-insensitive)
    pub fn get_by_email(&self, email: &str) -> Result<Option<User>, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let email = email.trim();
        Ok(data
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), GroupSplitError> {
        let mut data = self.data.write().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.insert(user.id, user);
        Ok(())
    }

    /// Count users
    pub fn count(&self) -> Result<usize, GroupSplitError> {
        let data = self.data.read().map_err(|e| {
            GroupSplitError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_get_by_email_ignores_case() {
        let (_temp_dir, repo) = create_test_repo();
        let user = User::new("Asha", "Asha@Example.com");
        repo.upsert(user.clone()).unwrap();

        let found = repo.get_by_email("asha@example.COM").unwrap();
        assert_eq!(found, Some(user));
        assert!(repo.get_by_email("ravi@example.com").unwrap().is_none());
    }

    #[test]
    fn test_get_many_skips_unknown() {
        let (_temp_dir, repo) = create_test_repo();
        let asha = User::new("Asha", "asha@example.com");
        let ravi = User::new("Ravi", "ravi@example.com");
        repo.upsert(asha.clone()).unwrap();
        repo.upsert(ravi.clone()).unwrap();

        let found = repo.get_many(&[ravi.id, UserId::new(), asha.id]).unwrap();
        let names: Vec<&str> = found.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Ravi", "Asha"]);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let user = User::new("Meera", "meera@example.com");
        let id = user.id;
        repo.upsert(user).unwrap();
        repo.save().unwrap();

        let repo2 = UserRepository::new(temp_dir.path().join("users.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().name, "Meera");
    }
}
