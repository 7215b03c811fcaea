//! Engine configuration with documented defaults
//!
//! Settings are read from an optional TOML file. Every field has a default, so
//! an empty or missing file yields a working engine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::error::{Result, ZoneError};
use crate::naming::NamingRules;

/// Directory under the user data dir that holds the zone file
pub const ZONE_FILE_DIR: [&str; 2] = ["ModsData", "SpecializedZones"];

/// File name of the zone file
pub const ZONE_FILE_NAME: &str = "SpecializedZones.json";

/// Configuration for the derivation engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === RELOAD ===
    /// Minimum time between two looks at the zone file (seconds)
    ///
    /// Only the modification timestamp is read on each check; the file is
    /// parsed when that timestamp moves.
    pub poll_interval_secs: u64,

    /// Location of the zone file
    ///
    /// Defaults to `<user data>/ModsData/SpecializedZones/SpecializedZones.json`.
    pub zone_file: PathBuf,

    /// Write a migrated document back to disk after loading it
    ///
    /// Off by default: migrations are applied in memory on every load and the
    /// file keeps whatever version the author saved.
    pub rewrite_migrated: bool,

    // === NAMING ===
    /// Rename rules, specialization marker and no-match policy
    pub naming: NamingRules,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 5,
            zone_file: default_zone_file(),
            rewrite_migrated: false,
            naming: NamingRules::industrial_defaults(),
        }
    }
}

/// Default zone file path under the platform's user data directory
pub fn default_zone_file() -> PathBuf {
    let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    ZONE_FILE_DIR
        .iter()
        .fold(base, |path, part| path.join(part))
        .join(ZONE_FILE_NAME)
}

impl EngineConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Interval between file checks
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Parse settings from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| ZoneError::Settings(e.to_string()))?;
        config.validate().map_err(ZoneError::Settings)?;
        Ok(config)
    }

    /// Load settings from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be at least 1".into());
        }

        if self.zone_file.file_name().is_none() {
            return Err(format!(
                "zone_file ({}) must name a file",
                self.zone_file.display()
            ));
        }

        self.naming.validate()
    }
}
