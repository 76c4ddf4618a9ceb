//! Project and dataset selection for a catalog connection.
//!
//! Supports configuration via environment variables:
//! - `BQCAT_PROJECT`: Project ID (falls back to `GOOGLE_CLOUD_PROJECT`)
//! - `BQCAT_DATASET`: Dataset to select on connect (optional)

use std::env;

use super::settings::{Settings, SettingsError};

/// Error type for connection configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error(
        "No project configured. Pass --project, set BQCAT_PROJECT or GOOGLE_CLOUD_PROJECT, \
         or add a profile to bqcat.toml"
    )]
    MissingProject,

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Project and dataset a client connects to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Project ID.
    pub project_id: String,
    /// Dataset to select on connect.
    pub dataset_id: Option<String>,
}

impl ConnectionConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: None,
        }
    }

    pub fn with_dataset(mut self, dataset_id: impl Into<String>) -> Self {
        self.dataset_id = Some(dataset_id.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` if neither `BQCAT_PROJECT` nor `GOOGLE_CLOUD_PROJECT` is set.
    pub fn from_env() -> Option<Self> {
        let project_id = env::var("BQCAT_PROJECT")
            .or_else(|_| env::var("GOOGLE_CLOUD_PROJECT"))
            .ok()
            .filter(|p| !p.is_empty())?;

        let dataset_id = env::var("BQCAT_DATASET").ok().filter(|d| !d.is_empty());

        Some(Self {
            project_id,
            dataset_id,
        })
    }

    /// Resolve the connection from explicit values, a profile, and the environment.
    ///
    /// Precedence, highest first:
    /// 1. `project` / `dataset` arguments
    /// 2. the named profile, or the default profile when `profile` is `None`
    /// 3. `BQCAT_PROJECT` / `GOOGLE_CLOUD_PROJECT` / `BQCAT_DATASET`
    /// 4. `fallback_project` (the project named by the credentials)
    pub fn resolve(
        settings: &Settings,
        profile: Option<&str>,
        project: Option<String>,
        dataset: Option<String>,
        fallback_project: Option<String>,
    ) -> Result<Self, ConnectionError> {
        let from_profile = match profile {
            Some(name) => Some(settings.get_profile(name)?),
            None => settings.default_profile().map(|(_, p)| p),
        };
        let from_profile = match from_profile {
            Some(p) => Some(Self {
                project_id: p.resolved_project_id()?,
                dataset_id: p.resolved_dataset_id()?,
            }),
            None => None,
        };
        let base = from_profile.or_else(Self::from_env);

        let project_id = project
            .or_else(|| base.as_ref().map(|b| b.project_id.clone()))
            .or(fallback_project)
            .ok_or(ConnectionError::MissingProject)?;

        let dataset_id = dataset.or_else(|| base.and_then(|b| b.dataset_id));

        Ok(Self {
            project_id,
            dataset_id,
        })
    }
}
