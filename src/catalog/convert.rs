//! Conversion of client-library resources into catalog snapshots.
//!
//! Resources are read through their JSON form, so only the fields the
//! catalog shows are modelled here. Counts and timestamps may arrive as JSON
//! numbers or as the decimal strings the REST API uses; both are accepted.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::types::{
    DatasetMetadata, DatasetSummary, FieldMode, SchemaField, TableMetadata, TableSummary,
    TableType,
};
use crate::error::{CatalogError, CatalogResult};

/// Re-read a library resource as one of the views below.
pub fn view<S, T>(resource: &S) -> CatalogResult<T>
where
    S: Serialize,
    T: DeserializeOwned,
{
    Ok(serde_json::from_value(serde_json::to_value(resource)?)?)
}

fn number_or_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetReference {
    pub project_id: String,
    pub dataset_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReference {
    pub project_id: String,
    pub dataset_id: String,
    pub table_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedDataset {
    pub dataset_reference: DatasetReference,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub dataset_reference: DatasetReference,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub creation_time: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub last_modified_time: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub default_table_expiration_ms: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedTable {
    pub table_reference: TableReference,
    #[serde(rename = "type", default)]
    pub table_type: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub table_reference: TableReference,
    #[serde(rename = "type", default)]
    pub table_type: Option<String>,
    #[serde(default)]
    pub friendly_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub creation_time: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub last_modified_time: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub expiration_time: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub num_rows: Option<String>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub num_bytes: Option<String>,
    #[serde(default)]
    pub schema: Option<TableSchema>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableSchema {
    #[serde(default)]
    pub fields: Option<Vec<TableFieldSchema>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableFieldSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Option<Vec<TableFieldSchema>>,
}

// ============================================================================
// Conversions
// ============================================================================

fn parse_millis(field: &str, value: Option<&str>) -> CatalogResult<Option<DateTime<Utc>>> {
    let Some(raw) = value else {
        return Ok(None);
    };
    let millis: i64 = raw
        .parse()
        .map_err(|_| CatalogError::InvalidResponse(format!("{} is not a timestamp: {}", field, raw)))?;
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(Some)
        .ok_or_else(|| CatalogError::InvalidResponse(format!("{} out of range: {}", field, raw)))
}

fn parse_number<T: std::str::FromStr>(field: &str, value: Option<&str>) -> CatalogResult<Option<T>> {
    value
        .map(|raw| {
            raw.parse().map_err(|_| {
                CatalogError::InvalidResponse(format!("{} is not a number: {}", field, raw))
            })
        })
        .transpose()
}

fn table_type(value: Option<&str>) -> TableType {
    value.map(TableType::parse).unwrap_or_default()
}

fn schema_fields(fields: Option<Vec<TableFieldSchema>>) -> CatalogResult<Vec<SchemaField>> {
    fields
        .unwrap_or_default()
        .into_iter()
        .map(SchemaField::try_from)
        .collect()
}

impl From<ListedDataset> for DatasetSummary {
    fn from(d: ListedDataset) -> Self {
        Self {
            project_id: d.dataset_reference.project_id,
            dataset_id: d.dataset_reference.dataset_id,
            friendly_name: d.friendly_name,
            location: d.location,
        }
    }
}

impl TryFrom<Dataset> for DatasetMetadata {
    type Error = CatalogError;

    fn try_from(d: Dataset) -> CatalogResult<Self> {
        Ok(Self {
            created: parse_millis("creationTime", d.creation_time.as_deref())?,
            last_modified: parse_millis("lastModifiedTime", d.last_modified_time.as_deref())?,
            default_table_expiration_ms: parse_number(
                "defaultTableExpirationMs",
                d.default_table_expiration_ms.as_deref(),
            )?,
            project_id: d.dataset_reference.project_id,
            dataset_id: d.dataset_reference.dataset_id,
            friendly_name: d.friendly_name,
            // The library reports an unset location as an empty string.
            location: d.location.filter(|l| !l.is_empty()),
            description: d.description,
        })
    }
}

impl From<ListedTable> for TableSummary {
    fn from(t: ListedTable) -> Self {
        Self {
            project_id: t.table_reference.project_id,
            dataset_id: t.table_reference.dataset_id,
            table_id: t.table_reference.table_id,
            table_type: table_type(t.table_type.as_deref()),
            friendly_name: t.friendly_name,
        }
    }
}

impl TryFrom<TableFieldSchema> for SchemaField {
    type Error = CatalogError;

    fn try_from(f: TableFieldSchema) -> CatalogResult<Self> {
        let mode = FieldMode::parse(f.mode.as_deref()).ok_or_else(|| {
            CatalogError::InvalidResponse(format!(
                "field {} has unknown mode {}",
                f.name,
                f.mode.as_deref().unwrap_or_default()
            ))
        })?;

        Ok(Self {
            fields: schema_fields(f.fields)?,
            name: f.name,
            field_type: f.field_type.to_uppercase(),
            mode,
            description: f.description,
        })
    }
}

impl TryFrom<Table> for TableMetadata {
    type Error = CatalogError;

    fn try_from(t: Table) -> CatalogResult<Self> {
        Ok(Self {
            created: parse_millis("creationTime", t.creation_time.as_deref())?,
            last_modified: parse_millis("lastModifiedTime", t.last_modified_time.as_deref())?,
            expires: parse_millis("expirationTime", t.expiration_time.as_deref())?,
            num_rows: parse_number("numRows", t.num_rows.as_deref())?,
            num_bytes: parse_number("numBytes", t.num_bytes.as_deref())?,
            table_type: table_type(t.table_type.as_deref()),
            schema: schema_fields(t.schema.and_then(|s| s.fields))?,
            project_id: t.table_reference.project_id,
            dataset_id: t.table_reference.dataset_id,
            table_id: t.table_reference.table_id,
            friendly_name: t.friendly_name,
            description: t.description,
        })
    }
}
