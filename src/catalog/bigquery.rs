//! BigQueryCatalogService implementation.
//!
//! A thin adapter over `google-cloud-bigquery`. The library owns credentials,
//! transport and paging; this file converts its resources and maps its
//! errors onto [`CatalogError`].

use async_trait::async_trait;
use google_cloud_bigquery::client::Client;
use google_cloud_bigquery::http::error::Error as BigQueryError;
use google_cloud_bigquery::http::table::list::ListTablesRequest;

use super::convert::{self, view};
use super::service::CatalogService;
use super::types::{DatasetMetadata, DatasetSummary, TableMetadata, TableSummary};
use crate::auth::{self, AuthError};
use crate::error::{CatalogError, CatalogResult};

/// CatalogService backed by the BigQuery API.
///
/// # Example
///
/// ```ignore
/// use bqcat::catalog::BigQueryCatalogService;
///
/// let auth = BigQueryCatalogService::authenticate().await?;
/// let datasets = auth.service.list_datasets("acme").await?;
/// ```
pub struct BigQueryCatalogService {
    client: Client,
}

/// An authenticated service plus the project named by the credentials.
pub struct Authenticated {
    pub service: BigQueryCatalogService,
    pub project_id: Option<String>,
}

impl BigQueryCatalogService {
    /// Wrap an existing library client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Discover application default credentials and build a client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Authentication` if no usable credentials are
    /// found, and `CatalogError::Transport` if the client cannot be built.
    pub async fn authenticate() -> CatalogResult<Authenticated> {
        let credentials = auth::discover().await?;
        let client = Client::new(credentials.config)
            .await
            .map_err(|e| CatalogError::Transport(e.to_string()))?;
        log::info!("Authentication successful.");

        Ok(Authenticated {
            service: Self::new(client),
            project_id: credentials.project_id,
        })
    }
}

/// Map an error status onto the catalog taxonomy.
///
/// 404 is whatever the caller was looking for; 401 means the credentials
/// were refused. Everything else, 403 included, stays an API error.
pub(crate) fn from_status<F>(status: u16, message: String, not_found: F) -> CatalogError
where
    F: FnOnce() -> CatalogError,
{
    match status {
        404 => not_found(),
        401 => AuthError::Rejected { status, message }.into(),
        _ => CatalogError::Api { status, message },
    }
}

fn map_error<F>(err: BigQueryError, not_found: F) -> CatalogError
where
    F: FnOnce() -> CatalogError,
{
    match err {
        BigQueryError::Response(response) => from_status(
            u16::try_from(response.code).unwrap_or(500),
            response.message,
            not_found,
        ),
        BigQueryError::TokenSource(source) => AuthError::Token(source.to_string()).into(),
        other => CatalogError::Transport(other.to_string()),
    }
}

#[async_trait]
impl CatalogService for BigQueryCatalogService {
    async fn list_datasets(&self, project_id: &str) -> CatalogResult<Vec<DatasetSummary>> {
        log::debug!("Listing datasets of {}", project_id);
        let datasets = self
            .client
            .dataset()
            .list(project_id, None)
            .await
            .map_err(|e| {
                map_error(e, || CatalogError::Api {
                    status: 404,
                    message: format!("Project '{}' not found", project_id),
                })
            })?;

        datasets
            .iter()
            .map(|d| view::<_, convert::ListedDataset>(d).map(Into::into))
            .collect()
    }

    async fn get_dataset(
        &self,
        project_id: &str,
        dataset_id: &str,
    ) -> CatalogResult<DatasetMetadata> {
        log::debug!("Fetching dataset {}:{}", project_id, dataset_id);
        let dataset = self
            .client
            .dataset()
            .get(project_id, dataset_id)
            .await
            .map_err(|e| map_error(e, || CatalogError::dataset_not_found(project_id, dataset_id)))?;

        view::<_, convert::Dataset>(&dataset)?.try_into()
    }

    async fn list_tables(
        &self,
        project_id: &str,
        dataset_id: &str,
    ) -> CatalogResult<Vec<TableSummary>> {
        log::debug!("Listing tables of {}:{}", project_id, dataset_id);
        let tables = self
            .client
            .table()
            .list(project_id, dataset_id, &ListTablesRequest::default())
            .await
            .map_err(|e| map_error(e, || CatalogError::dataset_not_found(project_id, dataset_id)))?;

        tables
            .iter()
            .map(|t| view::<_, convert::ListedTable>(t).map(Into::into))
            .collect()
    }

    async fn get_table(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
    ) -> CatalogResult<TableMetadata> {
        log::debug!("Fetching table {}:{}.{}", project_id, dataset_id, table_id);
        let table = self
            .client
            .table()
            .get(project_id, dataset_id, table_id)
            .await
            .map_err(|e| map_error(e, || CatalogError::table_not_found(dataset_id, table_id)))?;

        view::<_, convert::Table>(&table)?.try_into()
    }
}
