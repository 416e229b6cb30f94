//! Storage layer for groupsplit
//!
//! JSON file storage with atomic writes. [`Storage`] owns one repository
//! per file plus the session store, and routes audit entries to the audit
//! log when auditing is enabled.

pub mod file_io;
pub mod groups;
pub mod init;
pub mod session;
pub mod users;

pub use file_io::{read_json, write_json_atomic};
pub use groups::GroupRepository;
pub use init::initialize_storage;
pub use session::{Session, SessionStore};
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::GroupSplitPaths;
use crate::error::GroupSplitError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: GroupSplitPaths,
    pub users: UserRepository,
    pub groups: GroupRepository,
    pub session: SessionStore,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Create a new Storage instance; nothing is read until `load_all`
    pub fn new(paths: GroupSplitPaths) -> Result<Self, GroupSplitError> {
        paths.ensure_directories()?;

        Ok(Self {
            users: UserRepository::new(paths.users_file()),
            groups: GroupRepository::new(paths.groups_file()),
            session: SessionStore::new(paths.session_file()),
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn audit logging on or off
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    pub fn paths(&self) -> &GroupSplitPaths {
        &self.paths
    }

    pub fn audit_log(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), GroupSplitError> {
        self.users.load()?;
        self.groups.load()?;
        self.session.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), GroupSplitError> {
        self.users.save()?;
        self.groups.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.is_initialized()
    }

    /// Record a newly created entity
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), GroupSplitError> {
        self.record(AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record a change, with a diff of the top-level fields
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> Result<(), GroupSplitError> {
        let diff = generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(after)?);
        self.record(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a deleted entity
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), GroupSplitError> {
        self.record(AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    fn record(&self, entry: AuditEntry) -> Result<(), GroupSplitError> {
        if !self.audit_enabled {
            return Ok(());
        }

        let entry = match self.session.current_user_id()? {
            Some(user_id) => entry.with_actor(user_id.to_string()),
            None => entry,
        };
        self.audit.log(&entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{Group, MemberId};
    use tempfile::TempDir;

    fn create_storage(temp_dir: &TempDir) -> Storage {
        let paths = GroupSplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_storage(&temp_dir);

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_update_is_audited_with_diff_and_actor() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_storage(&temp_dir);
        let creator = MemberId::new();
        storage.session.start(creator).unwrap();

        let before = Group::new("Flat", creator);
        let mut after = before.clone();
        after.name = "Flat 4B".into();

        storage
            .log_update(EntityType::Group, before.id.to_string(), None, &before, &after)
            .unwrap();

        let entries = storage.audit_log().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Update);
        assert_eq!(entries[0].actor, Some(creator.to_string()));
        assert!(entries[0]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("name: \"Flat\" -> \"Flat 4B\""));
    }

    #[test]
    fn test_audit_can_be_disabled() {
        let temp_dir = TempDir::new().unwrap();
        let storage = create_storage(&temp_dir).with_audit(false);
        let group = Group::new("Flat", MemberId::new());

        storage
            .log_create(EntityType::Group, group.id.to_string(), None, &group)
            .unwrap();

        assert!(storage.audit_log().read_all().unwrap().is_empty());
    }
}
