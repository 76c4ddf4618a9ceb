//! Catalog metadata types.
//!
//! These types are immutable snapshots of what the service returned,
//! built from client-library resources by [`super::convert`].

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A dataset as returned by dataset enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    /// Project the dataset belongs to.
    pub project_id: String,
    /// Dataset ID.
    pub dataset_id: String,
    /// User-facing name.
    pub friendly_name: Option<String>,
    /// Storage location.
    pub location: Option<String>,
}

impl DatasetSummary {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            friendly_name: None,
            location: None,
        }
    }
}

/// Full metadata record of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetMetadata {
    pub project_id: String,
    pub dataset_id: String,
    pub friendly_name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    /// Default lifetime of new tables, in milliseconds.
    pub default_table_expiration_ms: Option<i64>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl DatasetMetadata {
    /// Create a record with only the identifiers set.
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            friendly_name: None,
            created: None,
            last_modified: None,
            default_table_expiration_ms: None,
            location: None,
            description: None,
        }
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            project_id: self.project_id.clone(),
            dataset_id: self.dataset_id.clone(),
            friendly_name: self.friendly_name.clone(),
            location: self.location.clone(),
        }
    }
}

/// Type of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableType {
    #[default]
    Table,
    View,
    MaterializedView,
    External,
    Snapshot,
    Unknown,
}

impl TableType {
    /// Parse the service's type name; unknown names map to `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "TABLE" => Self::Table,
            "VIEW" => Self::View,
            "MATERIALIZED_VIEW" => Self::MaterializedView,
            "EXTERNAL" => Self::External,
            "SNAPSHOT" => Self::Snapshot,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::MaterializedView => "MATERIALIZED_VIEW",
            Self::External => "EXTERNAL",
            Self::Snapshot => "SNAPSHOT",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for TableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A table as returned by table enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
    pub table_type: TableType,
    pub friendly_name: Option<String>,
}

/// Full metadata record of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableMetadata {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
    pub table_type: TableType,
    pub friendly_name: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub last_modified: Option<DateTime<Utc>>,
    /// When the table will be deleted, if it has an expiration.
    pub expires: Option<DateTime<Utc>>,
    pub num_rows: Option<u64>,
    pub num_bytes: Option<u64>,
    pub description: Option<String>,
    /// Top-level fields in service order.
    pub schema: Vec<SchemaField>,
}

impl TableMetadata {
    /// Create a record with only the identifiers set.
    pub fn new(
        project_id: impl Into<String>,
        dataset_id: impl Into<String>,
        table_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
            table_id: table_id.into(),
            table_type: TableType::Table,
            friendly_name: None,
            created: None,
            last_modified: None,
            expires: None,
            num_rows: None,
            num_bytes: None,
            description: None,
            schema: Vec::new(),
        }
    }

    pub fn with_schema(mut self, schema: Vec<SchemaField>) -> Self {
        self.schema = schema;
        self
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            project_id: self.project_id.clone(),
            dataset_id: self.dataset_id.clone(),
            table_id: self.table_id.clone(),
            table_type: self.table_type,
            friendly_name: self.friendly_name.clone(),
        }
    }
}

/// Mode of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldMode {
    #[default]
    Nullable,
    Required,
    Repeated,
}

impl FieldMode {
    /// Parse the service's mode name. A missing mode means NULLABLE.
    pub fn parse(s: Option<&str>) -> Option<Self> {
        match s.map(str::to_uppercase).as_deref() {
            None | Some("") | Some("NULLABLE") => Some(Self::Nullable),
            Some("REQUIRED") => Some(Self::Required),
            Some("REPEATED") => Some(Self::Repeated),
            Some(_) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nullable => "NULLABLE",
            Self::Required => "REQUIRED",
            Self::Repeated => "REPEATED",
        }
    }
}

impl fmt::Display for FieldMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a table schema. RECORD columns carry their sub-fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub mode: FieldMode,
    pub description: Option<String>,
    pub fields: Vec<SchemaField>,
}

impl SchemaField {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            mode: FieldMode::Nullable,
            description: None,
            fields: Vec::new(),
        }
    }

    pub fn with_mode(mut self, mode: FieldMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_fields(mut self, fields: Vec<SchemaField>) -> Self {
        self.fields = fields;
        self
    }

    /// Whether the field has nested sub-fields.
    pub fn is_nested(&self) -> bool {
        !self.fields.is_empty()
    }
}
