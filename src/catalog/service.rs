//! CatalogService trait definition.
//!
//! The CatalogService trait abstracts over the remote warehouse API. The
//! primary implementation is [`super::BigQueryCatalogService`]; tests and offline
//! use go through [`super::InMemoryCatalog`].

use async_trait::async_trait;

use super::types::*;
use crate::error::CatalogResult;

/// Read-only access to datasets and tables of the remote service.
///
/// Each call is a single logical round-trip. Implementations follow
/// pagination internally so list calls always return the complete set.
///
/// # Example
///
/// ```ignore
/// use bqcat::catalog::CatalogService;
///
/// async fn example(service: &impl CatalogService) -> CatalogResult<()> {
///     let datasets = service.list_datasets("acme").await?;
///     let orders = service.get_dataset("acme", "orders").await?;
///     let tables = service.list_tables("acme", "orders").await?;
///     let events = service.get_table("acme", "orders", "events").await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List all datasets visible in a project.
    async fn list_datasets(&self, project_id: &str) -> CatalogResult<Vec<DatasetSummary>>;

    /// Get the full metadata record of a dataset.
    ///
    /// Fails with `CatalogError::DatasetNotFound` if the dataset does not exist.
    async fn get_dataset(&self, project_id: &str, dataset_id: &str)
        -> CatalogResult<DatasetMetadata>;

    /// List all tables of a dataset in service order.
    ///
    /// Fails with `CatalogError::DatasetNotFound` if the dataset does not exist.
    async fn list_tables(&self, project_id: &str, dataset_id: &str)
        -> CatalogResult<Vec<TableSummary>>;

    /// Get the full metadata record of a table, schema included.
    ///
    /// Fails with `CatalogError::TableNotFound` if the table does not exist.
    async fn get_table(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
    ) -> CatalogResult<TableMetadata>;
}
