//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level platkit configuration.
///
/// All fields have defaults so platkit works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub process: ProcessConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`], except a missing file is not an error.
    pub fn load_or_default(path: &Path) -> CoreResult<Self> {
        match Self::load(path) {
            Err(CoreError::NotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// The per-user config location: `$XDG_CONFIG_HOME/platkit/config.toml`,
    /// falling back to `$HOME/.config/platkit/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("platkit").join("config.toml"))
    }
}

/// Logging preferences.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Emit debug-level events.
    #[serde(default)]
    pub debug: bool,
    /// Append log output to this file instead of stderr.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

/// Behaviour of copy and move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilesConfig {
    #[serde(default = "default_true")]
    pub overwrite_existing: bool,
    /// Resolve a taken destination to a free ` (N)` name instead of failing.
    #[serde(default)]
    pub keep_both: bool,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            overwrite_existing: true,
            keep_both: false,
        }
    }
}

/// Child process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(default = "default_true")]
    pub wait: bool,
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self { wait: true }
    }
}

fn default_true() -> bool {
    true
}
