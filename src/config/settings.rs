//! TOML-based configuration for bqcat.
//!
//! Supports a config file (bqcat.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [profiles.default]
//! project_id = "acme-analytics"
//! dataset_id = "orders"
//!
//! [profiles.staging]
//! project_id = "${STAGING_PROJECT}"
//!
//! [output]
//! format = "table"
//! ```
//!
//! Credentials are not configured here; they come from the environment
//! (see [`crate::auth`]).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Unsupported output format: {0}. Supported: table, json, csv")]
    UnsupportedFormat(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Named project/dataset selections.
    pub profiles: BTreeMap<String, ProfileSettings>,

    /// Output configuration.
    pub output: OutputSettings,
}

/// A named project and optional dataset.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProfileSettings {
    /// Project ID (supports ${ENV_VAR} expansion).
    pub project_id: String,

    /// Dataset to select on connect.
    #[serde(default)]
    pub dataset_id: Option<String>,
}

impl ProfileSettings {
    /// Get the project ID with environment variables expanded.
    pub fn resolved_project_id(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.project_id)
    }

    /// Get the dataset ID with environment variables expanded.
    pub fn resolved_dataset_id(&self) -> Result<Option<String>, SettingsError> {
        self.dataset_id.as_deref().map(expand_env_vars).transpose()
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default output format: "table", "json" or "csv".
    pub format: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `BQCAT_CONFIG`
    /// 2. `./bqcat.toml`
    /// 3. `~/.config/bqcat/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("BQCAT_CONFIG") {
            log::debug!("Loading settings from BQCAT_CONFIG={}", path);
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("bqcat.toml");
        if local_config.exists() {
            log::debug!("Loading settings from {}", local_config.display());
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("bqcat").join("config.toml");
            if user_config.exists() {
                log::debug!("Loading settings from {}", user_config.display());
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Get a profile by name.
    pub fn get_profile(&self, name: &str) -> Result<&ProfileSettings, SettingsError> {
        self.profiles
            .get(name)
            .ok_or_else(|| SettingsError::ProfileNotFound(name.to_string()))
    }

    /// Get the default profile ("default" if it exists, otherwise the first by name).
    pub fn default_profile(&self) -> Option<(&str, &ProfileSettings)> {
        if let Some(profile) = self.profiles.get("default") {
            return Some(("default", profile));
        }
        self.profiles.iter().next().map(|(k, v)| (k.as_str(), v))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }

        let mut var_name = String::new();
        while let Some(&ch) = chars.peek() {
            if braced && ch == '}' {
                chars.next();
                break;
            }
            if !braced && !(ch.is_alphanumeric() || ch == '_') {
                break;
            }
            var_name.push(ch);
            chars.next();
        }

        if var_name.is_empty() && !braced {
            // lone '$'
            result.push('$');
            continue;
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
