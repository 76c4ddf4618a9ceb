//! Error types for catalog operations.

use thiserror::Error;

use crate::auth::AuthError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while talking to the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No usable credentials, or the service rejected them.
    #[error(transparent)]
    Authentication(#[from] AuthError),

    /// The dataset does not exist in the project.
    #[error("Dataset '{dataset_id}' does not exist in project '{project_id}'.")]
    DatasetNotFound {
        /// Project that was searched.
        project_id: String,
        /// Dataset that was requested.
        dataset_id: String,
    },

    /// The table does not exist in the dataset.
    #[error("Table '{table_id}' does not exist in dataset '{dataset_id}'.")]
    TableNotFound {
        /// Dataset that was searched.
        dataset_id: String,
        /// Table that was requested.
        table_id: String,
    },

    /// The operation needs a selected dataset and none was selected.
    #[error("No dataset ID provided and no dataset is selected.")]
    MissingSelection,

    /// The service answered with a non-success status.
    #[error("service error: {message} (status: {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// The request failed before the service answered, or the client could
    /// not be built.
    #[error("request failed: {0}")]
    Transport(String),

    /// A resource could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A response decoded but carried values we cannot interpret.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    /// Create a dataset-not-found error.
    pub fn dataset_not_found(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self::DatasetNotFound {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }

    /// Create a table-not-found error.
    pub fn table_not_found(dataset_id: impl Into<String>, table_id: impl Into<String>) -> Self {
        Self::TableNotFound {
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
        }
    }

    /// Check if this error means the requested entity is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::DatasetNotFound { .. } | Self::TableNotFound { .. })
    }

    /// Check if this error is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }
}
