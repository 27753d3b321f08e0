//! Persistent converter settings.
//!
//! Settings live in a JSON file (by default
//! `src/data/config/activities_config.json`, relative to the working
//! directory). A missing or unreadable file falls back to defaults; command
//! line flags override whatever the file says.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use activity_ingest::{FIRST_TAB_GID, Tab};

/// Where settings are read from and saved to unless `--config` says otherwise.
pub const DEFAULT_CONFIG_PATH: &str = "src/data/config/activities_config.json";

/// Output file name for ordinary imports.
pub const DEFAULT_OUTPUT_FILENAME: &str = "imported-activities.json";

/// Output directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "src/data/activities/";

/// Version written to `metadata.version`.
pub const CONFIG_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove config {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub activities: ActivitiesConfig,
    pub metadata: ConfigMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivitiesConfig {
    /// Sheet URL or bare sheet id; empty when unset.
    pub sheet_url: String,
    pub tabs: TabGids,
    pub default_output: OutputSettings,
    pub preferences: Preferences,
}

/// GID per tab. Empty strings mean "not set".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabGids {
    pub experiences: String,
    pub financial: String,
    pub quotes: String,
}

impl Default for TabGids {
    fn default() -> Self {
        Self {
            experiences: FIRST_TAB_GID.to_string(),
            financial: String::new(),
            quotes: String::new(),
        }
    }
}

impl TabGids {
    pub fn get(&self, tab: Tab) -> Option<&str> {
        let gid = match tab {
            Tab::Experiences => &self.experiences,
            Tab::Financial => &self.financial,
            Tab::Quotes => &self.quotes,
        };
        Some(gid.trim()).filter(|gid| !gid.is_empty())
    }

    pub fn set(&mut self, tab: Tab, gid: impl Into<String>) {
        let slot = match tab {
            Tab::Experiences => &mut self.experiences,
            Tab::Financial => &mut self.financial,
            Tab::Quotes => &mut self.quotes,
        };
        *slot = gid.into();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub filename: String,
    pub directory: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            filename: DEFAULT_OUTPUT_FILENAME.to_string(),
            directory: DEFAULT_OUTPUT_DIRECTORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub create_backups: bool,
    pub default_replace: bool,
    pub skip_financial: bool,
    pub skip_quotes: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            create_backups: true,
            default_replace: false,
            skip_financial: false,
            skip_quotes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigMetadata {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<NaiveDateTime>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION.to_string(),
            created_at: None,
            last_updated: None,
        }
    }
}

impl ConfigFile {
    /// Reads the file at `path`; `Ok(None)` when it does not exist.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(source) if source.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Loads settings, falling back to defaults when the file is missing or
    /// broken.
    pub fn load_from(path: &Path) -> Self {
        match Self::read(path) {
            Ok(Some(config)) => {
                info!(path = %path.display(), "loaded configuration");
                config
            }
            Ok(None) => {
                info!(path = %path.display(), "no configuration file, using defaults");
                Self::default()
            }
            Err(error) => {
                warn!(%error, "could not load configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Writes settings to `path`, creating parent directories.
    ///
    /// `created_at` is carried over from the file already on disk when there
    /// is one; `last_updated` becomes `now`.
    pub fn save_to(&mut self, path: &Path, now: NaiveDateTime) -> Result<(), ConfigError> {
        let existing_created_at = Self::read(path)
            .ok()
            .flatten()
            .and_then(|existing| existing.metadata.created_at);
        self.metadata.version = CONFIG_VERSION.to_string();
        self.metadata.created_at = existing_created_at
            .or(self.metadata.created_at)
            .or(Some(now));
        self.metadata.last_updated = Some(now);

        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, content).map_err(write_error)?;
        info!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Deletes the settings file. Returns whether there was one.
    pub fn reset(path: &Path) -> Result<bool, ConfigError> {
        match fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "removed configuration file");
                Ok(true)
            }
            Err(source) if source.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(ConfigError::Remove {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Sheet URL, if one is set.
    pub fn sheet_url(&self) -> Option<&str> {
        Some(self.activities.sheet_url.trim()).filter(|url| !url.is_empty())
    }
}
