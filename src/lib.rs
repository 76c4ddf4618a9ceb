//! # bqcat
//!
//! A catalog client for browsing BigQuery projects, datasets, tables and
//! table schemas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                 CLI (bqcat binary)                       │
//! │  (arguments, settings, printing)                         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                   CatalogClient                          │
//! │  (project + selected dataset context)                    │
//! └─────────────────────────────────────────────────────────┘
//!              │                               │
//!              ▼ [catalog]                     ▼ [report]
//! ┌──────────────────────────┐   ┌──────────────────────────┐
//! │  CatalogService          │   │  Reports and listings    │
//! │  BigQuery / in-memory    │   │  text, table, JSON, CSV  │
//! └──────────────────────────┘   └──────────────────────────┘
//!              │
//!              ▼ [auth]
//! ┌─────────────────────────────────────────────────────────┐
//! │          Application default credentials                 │
//! │  (key file, gcloud login, metadata server)               │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod report;

pub use client::CatalogClient;
pub use error::{CatalogError, CatalogResult};

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::catalog::{
        BigQueryCatalogService, CatalogService, DatasetMetadata, FieldMode, InMemoryCatalog,
        SchemaField, TableMetadata, TableSummary, TableType,
    };
    pub use crate::client::CatalogClient;
    pub use crate::config::{ConnectionConfig, Settings};
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::report::{
        DatasetListing, DatasetReport, OutputFormat, ResultFormatter, SchemaListing,
        TableListing, TableReport,
    };
}
