//! Application Default Credentials.
//!
//! Discovery is left to the BigQuery client library: it checks
//! `GOOGLE_APPLICATION_CREDENTIALS`, the gcloud well-known file and the
//! metadata server, and hands back a ready client configuration. This module
//! turns its failures into [`AuthError`] and points it at a gcloud login
//! kept under `CLOUDSDK_CONFIG`, which the library does not look at.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use google_cloud_bigquery::client::ClientConfig;
use thiserror::Error;

/// Variable naming an explicit credentials file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Variable relocating the gcloud configuration directory.
pub const CLOUDSDK_CONFIG_ENV: &str = "CLOUDSDK_CONFIG";

const WELL_KNOWN_FILE: &str = "application_default_credentials.json";

/// Errors raised while discovering credentials or using them.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Nothing in the environment yields usable credentials.
    #[error(
        "No authentication credentials found ({reason}). Please authenticate using the \
         Google Cloud SDK with the command 'gcloud auth application-default login'."
    )]
    NoCredentials {
        /// What the credential lookup reported.
        reason: String,
    },

    /// The service refused the credentials.
    #[error("credentials rejected: {message} (status: {status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the error body.
        message: String,
    },

    /// Credentials were found but no access token could be issued for them.
    #[error("failed to obtain an access token: {0}")]
    Token(String),
}

/// Client configuration carrying discovered credentials.
pub struct Credentials {
    pub config: ClientConfig,
    /// Project named by the credentials, if any.
    pub project_id: Option<String>,
}

/// Login file in a relocated gcloud config directory.
///
/// Only applies when no explicit credentials file is named and the file
/// actually exists.
pub fn relocated_login_file(
    credentials_env: Option<OsString>,
    cloudsdk_config: Option<OsString>,
) -> Option<PathBuf> {
    if credentials_env.is_some_and(|v| !v.is_empty()) {
        return None;
    }
    let path = PathBuf::from(cloudsdk_config.filter(|v| !v.is_empty())?).join(WELL_KNOWN_FILE);
    path.is_file().then_some(path)
}

/// Run the ADC lookup.
///
/// A login file found through `CLOUDSDK_CONFIG` is exported as
/// `GOOGLE_APPLICATION_CREDENTIALS` first.
///
/// # Errors
///
/// Every lookup failure, including an unreadable
/// `GOOGLE_APPLICATION_CREDENTIALS` file, is `AuthError::NoCredentials`.
pub async fn discover() -> Result<Credentials, AuthError> {
    if let Some(path) =
        relocated_login_file(env::var_os(CREDENTIALS_ENV), env::var_os(CLOUDSDK_CONFIG_ENV))
    {
        log::debug!("Using gcloud login file {}", path.display());
        env::set_var(CREDENTIALS_ENV, &path);
    }

    let (config, project_id) = ClientConfig::new_with_auth()
        .await
        .map_err(|e| AuthError::NoCredentials {
            reason: e.to_string(),
        })?;

    log::debug!(
        "Credentials found (project: {})",
        project_id.as_deref().unwrap_or("none")
    );

    Ok(Credentials { config, project_id })
}
