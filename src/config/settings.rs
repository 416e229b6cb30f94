//! User settings for groupsplit
//!
//! Display and authoring preferences: currency symbol, the split mode used
//! when none is given, and whether mutations are written to the audit log.

use serde::{Deserialize, Serialize};

use super::paths::GroupSplitPaths;
use crate::error::GroupSplitError;
use crate::ledger::SplitMode;
use crate::storage::file_io::write_json_atomic;

/// User settings for groupsplit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Split mode used when `expense add` is given no `--split`
    #[serde(default)]
    pub default_split_mode: SplitMode,

    /// Whether create/update/delete operations are audited
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            default_split_mode: SplitMode::default(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &GroupSplitPaths) -> Result<Self, GroupSplitError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| GroupSplitError::Io(format!("Failed to read settings file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| GroupSplitError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk
    pub fn save(&self, paths: &GroupSplitPaths) -> Result<(), GroupSplitError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
