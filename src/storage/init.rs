//! Storage initialization
//!
//! First-run setup: create the directory layout and empty data files so
//! that later reads never race a missing file.

use crate::config::paths::GroupSplitPaths;
use crate::error::GroupSplitError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing data files are left untouched.
pub fn initialize_storage(paths: &GroupSplitPaths) -> Result<(), GroupSplitError> {
    paths.ensure_directories()?;

    if !paths.users_file().exists() {
        write_json_atomic(paths.users_file(), &serde_json::json!({ "users": [] }))?;
    }
    if !paths.groups_file().exists() {
        write_json_atomic(paths.groups_file(), &serde_json::json!({ "groups": [] }))?;
    }

    tracing::info!(data_dir = %paths.data_dir().display(), "storage initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Storage;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_empty_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroupSplitPaths::with_base_dir(temp_dir.path().to_path_buf());

        initialize_storage(&paths).unwrap();

        assert!(paths.users_file().exists());
        assert!(paths.groups_file().exists());

        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        assert_eq!(storage.users.count().unwrap(), 0);
        assert_eq!(storage.groups.count().unwrap(), 0);
    }

    #[test]
    fn test_initialize_keeps_existing_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = GroupSplitPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir_all(paths.data_dir()).unwrap();
        std::fs::write(paths.users_file(), r#"{"users": [1]}"#).unwrap();

        initialize_storage(&paths).unwrap();

        let contents = std::fs::read_to_string(paths.users_file()).unwrap();
        assert_eq!(contents, r#"{"users": [1]}"#);
    }
}
