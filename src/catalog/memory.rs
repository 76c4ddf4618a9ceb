//! In-process catalog.
//!
//! Serves a fixed set of datasets and tables without any network access.
//! Insertion order is preserved, so listings come back in the order the
//! catalog was built.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::service::CatalogService;
use super::types::{DatasetMetadata, DatasetSummary, TableMetadata, TableSummary};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone)]
struct DatasetEntry {
    metadata: DatasetMetadata,
    tables: Vec<TableMetadata>,
}

/// A CatalogService that answers from memory.
///
/// # Example
///
/// ```
/// use bqcat::catalog::{DatasetMetadata, InMemoryCatalog, TableMetadata};
///
/// let catalog = InMemoryCatalog::new()
///     .with_dataset(DatasetMetadata::new("acme", "orders"))
///     .with_table(TableMetadata::new("acme", "orders", "events"));
///
/// assert_eq!(catalog.dataset_count("acme"), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    datasets: Vec<DatasetEntry>,
    list_failure: Option<(String, String)>,
    calls: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dataset. Replaces an existing dataset with the same ID.
    pub fn with_dataset(mut self, metadata: DatasetMetadata) -> Self {
        match self.position(&metadata.project_id, &metadata.dataset_id) {
            Some(idx) => self.datasets[idx].metadata = metadata,
            None => self.datasets.push(DatasetEntry {
                metadata,
                tables: Vec::new(),
            }),
        }
        self
    }

    /// Add a table, creating its dataset if needed.
    pub fn with_table(mut self, table: TableMetadata) -> Self {
        let idx = match self.position(&table.project_id, &table.dataset_id) {
            Some(idx) => idx,
            None => {
                self.datasets.push(DatasetEntry {
                    metadata: DatasetMetadata::new(&table.project_id, &table.dataset_id),
                    tables: Vec::new(),
                });
                self.datasets.len() - 1
            }
        };
        self.datasets[idx].tables.push(table);
        self
    }

    /// Make dataset enumeration of `project_id` fail with `message`.
    pub fn failing_list(mut self, project_id: impl Into<String>, message: impl Into<String>) -> Self {
        self.list_failure = Some((project_id.into(), message.into()));
        self
    }

    /// Number of datasets held for a project.
    pub fn dataset_count(&self, project_id: &str) -> usize {
        self.datasets
            .iter()
            .filter(|d| d.metadata.project_id == project_id)
            .count()
    }

    /// Number of service calls answered so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn position(&self, project_id: &str, dataset_id: &str) -> Option<usize> {
        self.datasets.iter().position(|d| {
            d.metadata.project_id == project_id && d.metadata.dataset_id == dataset_id
        })
    }

    fn entry(&self, project_id: &str, dataset_id: &str) -> CatalogResult<&DatasetEntry> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        self.position(project_id, dataset_id)
            .map(|idx| &self.datasets[idx])
            .ok_or_else(|| CatalogError::dataset_not_found(project_id, dataset_id))
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalog {
    async fn list_datasets(&self, project_id: &str) -> CatalogResult<Vec<DatasetSummary>> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if let Some((failing, message)) = &self.list_failure {
            if failing == project_id {
                return Err(CatalogError::Api {
                    status: 500,
                    message: message.clone(),
                });
            }
        }

        Ok(self
            .datasets
            .iter()
            .filter(|d| d.metadata.project_id == project_id)
            .map(|d| d.metadata.summary())
            .collect())
    }

    async fn get_dataset(
        &self,
        project_id: &str,
        dataset_id: &str,
    ) -> CatalogResult<DatasetMetadata> {
        Ok(self.entry(project_id, dataset_id)?.metadata.clone())
    }

    async fn list_tables(
        &self,
        project_id: &str,
        dataset_id: &str,
    ) -> CatalogResult<Vec<TableSummary>> {
        Ok(self
            .entry(project_id, dataset_id)?
            .tables
            .iter()
            .map(TableMetadata::summary)
            .collect())
    }

    async fn get_table(
        &self,
        project_id: &str,
        dataset_id: &str,
        table_id: &str,
    ) -> CatalogResult<TableMetadata> {
        self.entry(project_id, dataset_id)?
            .tables
            .iter()
            .find(|t| t.table_id == table_id)
            .cloned()
            .ok_or_else(|| CatalogError::table_not_found(dataset_id, table_id))
    }
}
