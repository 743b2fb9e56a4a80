use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::defaults::DEFAULT_CONFIG_JSON;
use crate::validators::{find_duplicate_tag, validate_type_tag};

/// Directory name under `~/.config` holding the config file.
const CONFIG_DIR_NAME: &str = "git-convention-cli";

/// Environment variable consulted when `--config` is not given.
pub const CONFIG_ENV_VAR: &str = "GIT_CONVENTION_CONFIG";

/// Status of config file loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLoadStatus {
    /// Config loaded from an existing file
    Loaded,
    /// Created default config file (first run)
    Created,
}

/// Fatal configuration errors. Any of these ends the process.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine home directory - please set HOME")]
    HomeDirNotFound,

    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create default config at {}", path.display())]
    CreateDefault {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No {kind} types configured in {}", path.display())]
    EmptyCatalog { path: PathBuf, kind: &'static str },

    #[error("Invalid {kind} type {tag:?} in {}: {reason}", path.display())]
    InvalidType {
        path: PathBuf,
        kind: &'static str,
        tag: String,
        reason: String,
    },

    #[error("Duplicate {kind} type {tag:?} in {}", path.display())]
    DuplicateType {
        path: PathBuf,
        kind: &'static str,
        tag: String,
    },
}

/// A branch category, e.g. `feature` or `fix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchType {
    #[serde(rename = "type")]
    pub tag: String,
    pub description: String,
}

/// A commit category with its decorating emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitType {
    #[serde(rename = "type")]
    pub tag: String,
    pub description: String,
    #[serde(default)]
    pub emoji: String,
}

fn default_emojis_enabled() -> bool {
    true
}

/// Main application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub default_branch_prefix: String,
    #[serde(default)]
    pub default_commit_prefix: String,
    #[serde(default = "default_emojis_enabled")]
    pub emojis_enabled: bool,
    pub branch_types: Vec<BranchType>,
    pub commit_types: Vec<CommitType>,
}

impl Settings {
    /// Reject settings the form cannot work with.
    ///
    /// Both catalogs must be non-empty, and every tag must be a valid,
    /// unique branch-name segment within its catalog.
    pub fn validate(&self, path: &Path) -> Result<(), ConfigError> {
        check_catalog(path, "branch", self.branch_types.iter().map(|b| b.tag.as_str()))?;
        check_catalog(path, "commit", self.commit_types.iter().map(|c| c.tag.as_str()))?;
        Ok(())
    }
}

fn check_catalog<'a>(
    path: &Path,
    kind: &'static str,
    tags: impl Iterator<Item = &'a str> + Clone,
) -> Result<(), ConfigError> {
    if tags.clone().next().is_none() {
        return Err(ConfigError::EmptyCatalog {
            path: path.to_path_buf(),
            kind,
        });
    }

    for tag in tags.clone() {
        if let Some(reason) = validate_type_tag(tag) {
            return Err(ConfigError::InvalidType {
                path: path.to_path_buf(),
                kind,
                tag: tag.to_string(),
                reason,
            });
        }
    }

    if let Some(tag) = find_duplicate_tag(tags) {
        return Err(ConfigError::DuplicateType {
            path: path.to_path_buf(),
            kind,
            tag: tag.to_string(),
        });
    }

    Ok(())
}

/// Loaded settings with metadata
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub settings: Settings,
    pub path: PathBuf,
    pub status: ConfigLoadStatus,
}

/// Get the full path to the default config file
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|home| home.join(".config").join(CONFIG_DIR_NAME).join("config.json"))
        .ok_or(ConfigError::HomeDirNotFound)
}

/// Pick the explicit config path: the `--config` flag first, then the environment.
pub fn resolve_override(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve_override_from(cli_path, env::var(CONFIG_ENV_VAR).ok())
}

/// Precedence rule behind [`resolve_override`]. An empty env value counts as unset.
pub fn resolve_override_from(
    cli_path: Option<PathBuf>,
    env_value: Option<String>,
) -> Option<PathBuf> {
    cli_path.or_else(|| {
        env_value.filter(|value| !value.is_empty()).map(|value| {
            debug!("Using config path from {}", CONFIG_ENV_VAR);
            PathBuf::from(value)
        })
    })
}

/// Load settings from an explicit path, or from the default location.
///
/// An explicit path must exist and parse; there is no fallback. The default
/// location is created from the embedded payload when missing.
pub fn load_settings(path_override: Option<&Path>) -> Result<LoadedSettings, ConfigError> {
    match path_override {
        Some(path) => Ok(LoadedSettings {
            settings: read_settings(path)?,
            path: path.to_path_buf(),
            status: ConfigLoadStatus::Loaded,
        }),
        None => load_or_create_config(&default_config_path()?),
    }
}

/// Load config from file, or create default if not exists
pub fn load_or_create_config(path: &Path) -> Result<LoadedSettings, ConfigError> {
    let status = if path.exists() {
        ConfigLoadStatus::Loaded
    } else {
        create_default_config(path)?;
        ConfigLoadStatus::Created
    };

    Ok(LoadedSettings {
        settings: read_settings(path)?,
        path: path.to_path_buf(),
        status,
    })
}

/// Read, parse and validate a settings file.
pub fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let settings: Settings =
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    settings.validate(path)?;
    info!(path = ?path, "config_loaded");
    Ok(settings)
}

/// Write the embedded default config, creating parent directories.
/// Never replaces a file that already exists.
fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let to_error = |source| ConfigError::CreateDefault {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(to_error)?;
    }

    let mut file = match fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        // Someone else created it between our check and open; keep theirs.
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(to_error(e)),
    };

    file.write_all(DEFAULT_CONFIG_JSON.as_bytes())
        .map_err(to_error)?;

    info!(path = ?path, "config_created");
    Ok(())
}

#[cfg(test)]
pub(crate) fn sample_settings() -> Settings {
    serde_json::from_str(DEFAULT_CONFIG_JSON).unwrap()
}
