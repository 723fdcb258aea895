use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{KeyloomError, Result};

/// Project-level configuration, loaded from `.keyloom.toml`.
///
/// Every field has a sensible default so Keyloom works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Which keychain to use when none is specified (e.g. "default").
    #[serde(default = "default_keychain")]
    pub default_keychain: String,

    /// Directory (relative to the working directory) where keychain
    /// files are stored.
    #[serde(default = "default_keychain_dir")]
    pub keychain_dir: String,

    /// Whether to require and verify the detached digest sidecar when
    /// loading a keychain.  Disabling this gives up rollback detection.
    #[serde(default = "default_verify_digest")]
    pub verify_digest: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_keychain() -> String {
    "default".to_string()
}

fn default_keychain_dir() -> String {
    ".keyloom".to_string()
}

fn default_verify_digest() -> bool {
    true
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_keychain: default_keychain(),
            keychain_dir: default_keychain_dir(),
            verify_digest: default_verify_digest(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".keyloom.toml";

    /// Load settings from `<project_dir>/.keyloom.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            KeyloomError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Build the full path to a keychain file for a given name.
    ///
    /// Example: `project_dir/.keyloom/default.keychain`
    pub fn keychain_path(&self, project_dir: &Path, name: &str) -> PathBuf {
        project_dir
            .join(&self.keychain_dir)
            .join(format!("{name}.keychain"))
    }
}

// ── Tests ────────────────────────────────────────────────────────────
