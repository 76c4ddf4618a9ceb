//! Catalog service module.
//!
//! This module provides the abstraction over the remote warehouse API and
//! its implementations.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      CatalogService                             │
//! │  - list_datasets()        - list_tables()                       │
//! │  - get_dataset()          - get_table()                         │
//! └─────────────────────────────────────────────────────────────────┘
//!            │                                   │
//!            ▼                                   ▼
//! ┌───────────────────────────┐    ┌───────────────────────────────┐
//! │   BigQueryCatalogService  │    │   InMemoryCatalog             │
//! │   (google-cloud-bigquery) │    │   (fixed datasets/tables)     │
//! └───────────────────────────┘    └───────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use bqcat::catalog::{BigQueryCatalogService, CatalogService};
//!
//! let auth = BigQueryCatalogService::authenticate().await?;
//! let tables = auth.service.list_tables("acme", "orders").await?;
//! ```

mod bigquery;
pub mod convert;
mod memory;
mod service;
mod types;

pub use bigquery::{Authenticated, BigQueryCatalogService};
pub use memory::InMemoryCatalog;
pub use service::CatalogService;
pub use types::*;
