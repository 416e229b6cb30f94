//! Path management for groupsplit
//!
//! Resolves where users, groups, the session and the audit log live.
//!
//! ## Path Resolution Order
//!
//! 1. `GROUPSPLIT_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/groupsplit` or `~/.config/groupsplit`
//! 3. Windows: `%APPDATA%\groupsplit`

use std::path::PathBuf;

use crate::error::GroupSplitError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "GROUPSPLIT_DATA_DIR";

/// Manages all paths used by groupsplit
#[derive(Debug, Clone)]
pub struct GroupSplitPaths {
    /// Base directory for all groupsplit data
    base_dir: PathBuf,
}

impl GroupSplitPaths {
    /// Create a new GroupSplitPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or application data directory can be
    /// determined.
    pub fn new() -> Result<Self, GroupSplitError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create GroupSplitPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/groupsplit/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to the session file (who is logged in)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Get the path to users.json
    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Get the path to groups.json (groups with their expenses)
    pub fn groups_file(&self) -> PathBuf {
        self.data_dir().join("groups.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), GroupSplitError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| GroupSplitError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| GroupSplitError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if groupsplit has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, GroupSplitError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                GroupSplitError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("groupsplit"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, GroupSplitError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| GroupSplitError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("groupsplit"))
}
