//! Stateful catalog client.
//!
//! A [`CatalogClient`] holds an authenticated connection scoped to one
//! project and, optionally, a selected dataset whose metadata and table list
//! are cached until another dataset is selected.

use std::sync::Arc;

use crate::catalog::{BigQueryCatalogService, CatalogService, DatasetMetadata, TableSummary};
use crate::error::{CatalogError, CatalogResult};
use crate::report::{DatasetListing, DatasetReport, SchemaListing, TableListing, TableReport};

/// Cached state for the selected dataset.
#[derive(Debug, Clone)]
struct DatasetContext {
    /// Project the dataset was loaded from.
    project_id: String,
    dataset: DatasetMetadata,
    tables: Vec<TableSummary>,
}

impl DatasetContext {
    fn dataset_id(&self) -> &str {
        &self.dataset.dataset_id
    }
}

/// Client for browsing datasets and tables of one project.
///
/// # Example
///
/// ```
/// # #[tokio::main]
/// # async fn main() {
/// use std::sync::Arc;
/// use bqcat::catalog::{DatasetMetadata, InMemoryCatalog, TableMetadata};
/// use bqcat::client::CatalogClient;
///
/// let catalog = InMemoryCatalog::new()
///     .with_dataset(DatasetMetadata::new("acme", "orders"))
///     .with_table(TableMetadata::new("acme", "orders", "events"));
///
/// let client = CatalogClient::with_service(Arc::new(catalog), "acme", Some("orders"))
///     .await
///     .unwrap();
/// assert_eq!(client.dataset_id(), Some("orders"));
/// assert_eq!(client.tables().len(), 1);
/// # }
/// ```
pub struct CatalogClient {
    project_id: String,
    service: Arc<dyn CatalogService>,
    context: Option<DatasetContext>,
}

impl CatalogClient {
    /// Authenticate against the service and open a client for `project_id`.
    ///
    /// When `dataset_id` is given it is selected immediately.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Authentication` if no credentials are available.
    /// - `CatalogError::DatasetNotFound` if `dataset_id` does not exist.
    pub async fn connect(
        project_id: impl Into<String>,
        dataset_id: Option<&str>,
    ) -> CatalogResult<Self> {
        let auth = BigQueryCatalogService::authenticate().await?;
        Self::with_service(Arc::new(auth.service), project_id, dataset_id).await
    }

    /// Open a client over an already constructed service.
    pub async fn with_service(
        service: Arc<dyn CatalogService>,
        project_id: impl Into<String>,
        dataset_id: Option<&str>,
    ) -> CatalogResult<Self> {
        let mut client = Self {
            project_id: project_id.into(),
            service,
            context: None,
        };

        if let Some(dataset_id) = dataset_id {
            client.select_dataset(dataset_id).await?;
        }

        Ok(client)
    }

    /// Current project.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Selected dataset ID, if any.
    pub fn dataset_id(&self) -> Option<&str> {
        self.context.as_ref().map(DatasetContext::dataset_id)
    }

    /// Cached metadata of the selected dataset.
    pub fn dataset(&self) -> Option<&DatasetMetadata> {
        self.context.as_ref().map(|c| &c.dataset)
    }

    /// Cached tables of the selected dataset. Empty when nothing is selected.
    pub fn tables(&self) -> &[TableSummary] {
        self.context
            .as_ref()
            .map(|c| c.tables.as_slice())
            .unwrap_or(&[])
    }

    /// Switch to another project.
    ///
    /// The selected dataset is kept as is; it still refers to the project
    /// it was loaded from.
    pub fn select_project(&mut self, project_id: impl Into<String>) {
        self.project_id = project_id.into();
        log::debug!("Selected project {}", self.project_id);
    }

    /// Select a dataset of the current project and cache its tables.
    ///
    /// On failure the previous selection is left untouched.
    pub async fn select_dataset(&mut self, dataset_id: &str) -> CatalogResult<()> {
        let context = self.load_context(dataset_id).await?;
        log::debug!(
            "Selected dataset {}.{} ({} tables)",
            context.project_id,
            context.dataset_id(),
            context.tables.len()
        );
        self.context = Some(context);
        Ok(())
    }

    async fn load_context(&self, dataset_id: &str) -> CatalogResult<DatasetContext> {
        let dataset = self
            .service
            .get_dataset(&self.project_id, dataset_id)
            .await?;
        let tables = self
            .service
            .list_tables(&self.project_id, dataset_id)
            .await?;

        Ok(DatasetContext {
            project_id: self.project_id.clone(),
            dataset,
            tables,
        })
    }

    /// Describe a dataset and its tables.
    ///
    /// With no ID, or the selected ID, the cached context is used. Any other
    /// ID is fetched from the current project without changing the selection.
    ///
    /// # Errors
    ///
    /// - `CatalogError::MissingSelection` if no ID is given and none is selected.
    /// - `CatalogError::DatasetNotFound` if the dataset does not exist.
    pub async fn describe_dataset(&self, dataset_id: Option<&str>) -> CatalogResult<DatasetReport> {
        match (dataset_id, &self.context) {
            (None, None) => Err(CatalogError::MissingSelection),
            (None, Some(context)) => Ok(DatasetReport::new(
                context.dataset.clone(),
                &context.tables,
            )),
            (Some(id), Some(context)) if id == context.dataset_id() => Ok(DatasetReport::new(
                context.dataset.clone(),
                &context.tables,
            )),
            (Some(id), _) => {
                let context = self.load_context(id).await?;
                Ok(DatasetReport::new(context.dataset, &context.tables))
            }
        }
    }

    /// Tables of the selected dataset.
    pub fn list_tables(&self) -> CatalogResult<TableListing> {
        let context = self.context.as_ref().ok_or(CatalogError::MissingSelection)?;
        Ok(TableListing {
            tables: context.tables.clone(),
        })
    }

    /// Full metadata of every dataset in the current project.
    ///
    /// Failures are logged and produce an empty listing. Use
    /// [`try_list_datasets`](Self::try_list_datasets) to observe them.
    pub async fn list_datasets(&self) -> DatasetListing {
        match self.try_list_datasets().await {
            Ok(listing) => {
                if listing.is_empty() {
                    log::warn!(
                        "Project {} does not contain any datasets.",
                        self.project_id
                    );
                }
                listing
            }
            Err(e) => {
                log::error!(
                    "Failed to list datasets of project {}: {}",
                    self.project_id,
                    e
                );
                DatasetListing::default()
            }
        }
    }

    /// Full metadata of every dataset in the current project.
    ///
    /// Datasets are fetched one after another in service order.
    pub async fn try_list_datasets(&self) -> CatalogResult<DatasetListing> {
        log::info!("Listing datasets of project {}", self.project_id);
        let summaries = self.service.list_datasets(&self.project_id).await?;

        let mut datasets = Vec::with_capacity(summaries.len());
        for summary in &summaries {
            let metadata = self
                .service
                .get_dataset(&self.project_id, &summary.dataset_id)
                .await?;
            datasets.push(metadata);
        }

        log::info!(
            "Found {} datasets in project {}",
            datasets.len(),
            self.project_id
        );
        Ok(DatasetListing::new(datasets))
    }

    /// Describe a table of the selected dataset.
    ///
    /// # Errors
    ///
    /// - `CatalogError::MissingSelection` if no dataset is selected.
    /// - `CatalogError::TableNotFound` if the table does not exist.
    pub async fn describe_table(&self, table_id: &str) -> CatalogResult<TableReport> {
        let context = self.context.as_ref().ok_or(CatalogError::MissingSelection)?;
        let table = self
            .service
            .get_table(&context.project_id, context.dataset_id(), table_id)
            .await?;
        Ok(TableReport::new(table))
    }

    /// Top-level schema fields of a table of the selected dataset.
    pub async fn get_table_schema(&self, table_id: &str) -> CatalogResult<SchemaListing> {
        let report = self.describe_table(table_id).await?;
        Ok(SchemaListing::new(report.table.table_id, report.table.schema))
    }
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("project_id", &self.project_id)
            .field("dataset_id", &self.dataset_id())
            .finish_non_exhaustive()
    }
}
