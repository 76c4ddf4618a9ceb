//! Report values and their text, table, JSON and CSV renderings.
//!
//! Catalog operations return the structured values defined here. Turning a
//! value into text is a pure function of the value and an [`OutputFormat`];
//! writing that text anywhere is left to the caller.

use std::fmt;
use std::str::FromStr;

use comfy_table::{presets::UTF8_FULL, Table};
use serde::Serialize;

use crate::catalog::{DatasetMetadata, SchemaField, TableMetadata, TableSummary};
use crate::config::SettingsError;

/// Output format for reports and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Text layout for reports, bordered table for listings.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
    /// Comma-separated values with a header row.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(SettingsError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A value with a fixed set of columns.
pub trait Tabular {
    /// Column headers, in order.
    fn columns(&self) -> &'static [&'static str];

    /// One entry per row, aligned with `columns()`. Missing values are empty.
    fn rows(&self) -> Vec<Vec<String>>;

    /// Shown instead of an empty table.
    fn empty_message(&self) -> &'static str {
        "No results found"
    }
}

fn or_none<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "None".to_string(),
    }
}

fn or_empty<T: fmt::Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

// ============================================================================
// Dataset report
// ============================================================================

/// Description of one dataset and the tables it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    pub dataset: DatasetMetadata,
    /// Table IDs in service order.
    pub tables: Vec<String>,
}

impl DatasetReport {
    pub fn new(dataset: DatasetMetadata, tables: &[TableSummary]) -> Self {
        Self {
            dataset,
            tables: tables.iter().map(|t| t.table_id.clone()).collect(),
        }
    }

    pub fn dataset_id(&self) -> &str {
        &self.dataset.dataset_id
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl fmt::Display for DatasetReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.dataset;
        writeln!(f, "{:<26}{}", "Dataset ID:", d.dataset_id)?;
        writeln!(f, "{:<26}{}", "Friendly Name:", or_none(&d.friendly_name))?;
        writeln!(f, "{:<26}{}", "Created:", or_none(&d.created))?;
        writeln!(f, "{:<26}{}", "Last Modified:", or_none(&d.last_modified))?;
        writeln!(
            f,
            "{:<26}{}",
            "Default Table Expiration:",
            or_none(&d.default_table_expiration_ms)
        )?;
        writeln!(f, "{:<26}{}", "Location:", or_none(&d.location))?;
        writeln!(f)?;
        writeln!(f, "Dataset Description: {}", or_none(&d.description))?;

        if self.tables.is_empty() {
            writeln!(f, "Dataset '{}' does not have any tables.", d.dataset_id)?;
        } else {
            writeln!(f)?;
            writeln!(f, "Tables found in {}: {}", d.dataset_id, self.tables.len())?;
            writeln!(f)?;
            for table in &self.tables {
                writeln!(f, "\t- {}", table)?;
            }
        }
        Ok(())
    }
}

impl Tabular for DatasetReport {
    fn columns(&self) -> &'static [&'static str] {
        &["field", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let d = &self.dataset;
        vec![
            vec!["dataset_id".to_string(), d.dataset_id.clone()],
            vec!["friendly_name".to_string(), or_empty(&d.friendly_name)],
            vec!["created".to_string(), or_empty(&d.created)],
            vec!["last_modified".to_string(), or_empty(&d.last_modified)],
            vec![
                "default_table_expiration".to_string(),
                or_empty(&d.default_table_expiration_ms),
            ],
            vec!["data_location".to_string(), or_empty(&d.location)],
            vec!["description".to_string(), or_empty(&d.description)],
            vec!["tables".to_string(), self.tables.join(" ")],
        ]
    }
}

// ============================================================================
// Table report
// ============================================================================

/// Description of one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableReport {
    pub table: TableMetadata,
}

impl TableReport {
    pub fn new(table: TableMetadata) -> Self {
        Self { table }
    }

    pub fn table_id(&self) -> &str {
        &self.table.table_id
    }
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.table;
        writeln!(f, "{:<18}{}", "Table ID:", t.table_id)?;
        writeln!(f, "{:<18}{}", "Friendly Name:", or_none(&t.friendly_name))?;
        writeln!(f, "{:<18}{}", "Created:", or_none(&t.created))?;
        writeln!(f, "{:<18}{}", "Last Modified:", or_none(&t.last_modified))?;
        writeln!(f, "{:<18}{}", "Table Expiration:", or_none(&t.expires))?;
        writeln!(f, "{:<18}{}", "Number of Rows:", or_none(&t.num_rows))?;
        writeln!(f, "{:<18}{}", "Number of Bytes:", or_none(&t.num_bytes))?;
        writeln!(f)?;
        writeln!(f, "Table Description: {}", or_none(&t.description))
    }
}

impl Tabular for TableReport {
    fn columns(&self) -> &'static [&'static str] {
        &["field", "value"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        let t = &self.table;
        vec![
            vec!["table_id".to_string(), t.table_id.clone()],
            vec!["friendly_name".to_string(), or_empty(&t.friendly_name)],
            vec!["created".to_string(), or_empty(&t.created)],
            vec!["last_modified".to_string(), or_empty(&t.last_modified)],
            vec!["expires".to_string(), or_empty(&t.expires)],
            vec!["num_rows".to_string(), or_empty(&t.num_rows)],
            vec!["num_bytes".to_string(), or_empty(&t.num_bytes)],
            vec!["description".to_string(), or_empty(&t.description)],
        ]
    }
}

// ============================================================================
// Listings
// ============================================================================

/// Datasets of a project with their full metadata, one row each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DatasetListing {
    pub datasets: Vec<DatasetMetadata>,
}

impl DatasetListing {
    pub fn new(datasets: Vec<DatasetMetadata>) -> Self {
        Self { datasets }
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

impl Tabular for DatasetListing {
    fn columns(&self) -> &'static [&'static str] {
        &[
            "dataset_id",
            "friendly_name",
            "created",
            "last_modified",
            "default_table_expiration",
            "data_location",
            "description",
        ]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.datasets
            .iter()
            .map(|d| {
                vec![
                    d.dataset_id.clone(),
                    or_empty(&d.friendly_name),
                    or_empty(&d.created),
                    or_empty(&d.last_modified),
                    or_empty(&d.default_table_expiration_ms),
                    or_empty(&d.location),
                    or_empty(&d.description),
                ]
            })
            .collect()
    }

    fn empty_message(&self) -> &'static str {
        "No datasets found"
    }
}

/// Tables of the selected dataset, one row each.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TableListing {
    pub tables: Vec<TableSummary>,
}

impl Tabular for TableListing {
    fn columns(&self) -> &'static [&'static str] {
        &["table_id", "type", "friendly_name"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.tables
            .iter()
            .map(|t| {
                vec![
                    t.table_id.clone(),
                    t.table_type.to_string(),
                    or_empty(&t.friendly_name),
                ]
            })
            .collect()
    }

    fn empty_message(&self) -> &'static str {
        "No tables found"
    }
}

/// Top-level fields of a table schema, one row each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaListing {
    pub table_id: String,
    pub fields: Vec<SchemaField>,
}

impl SchemaListing {
    pub fn new(table_id: impl Into<String>, fields: Vec<SchemaField>) -> Self {
        Self {
            table_id: table_id.into(),
            fields,
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// `name:TYPE` list of sub-fields; deeper levels in angle brackets.
pub fn summarize_fields(fields: &[SchemaField]) -> String {
    fields
        .iter()
        .map(|f| {
            if f.is_nested() {
                format!("{}:{}<{}>", f.name, f.field_type, summarize_fields(&f.fields))
            } else {
                format!("{}:{}", f.name, f.field_type)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl Tabular for SchemaListing {
    fn columns(&self) -> &'static [&'static str] {
        &["field_name", "type", "mode", "description", "fields"]
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.fields
            .iter()
            .map(|f| {
                vec![
                    f.name.clone(),
                    f.field_type.clone(),
                    f.mode.to_string(),
                    or_empty(&f.description),
                    summarize_fields(&f.fields),
                ]
            })
            .collect()
    }

    fn empty_message(&self) -> &'static str {
        "No fields found"
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Renders report values in a chosen output format.
pub struct ResultFormatter;

impl ResultFormatter {
    /// Format a single-entity report. `Table` uses the report's text layout.
    pub fn format_report<R>(report: &R, format: OutputFormat) -> String
    where
        R: fmt::Display + Tabular + Serialize,
    {
        match format {
            OutputFormat::Table => report.to_string(),
            OutputFormat::Json => Self::format_json(report),
            OutputFormat::Csv => Self::format_csv(report),
        }
    }

    /// Format a multi-row listing.
    pub fn format_listing<T>(listing: &T, format: OutputFormat) -> String
    where
        T: Tabular + Serialize,
    {
        match format {
            OutputFormat::Table => Self::format_table(listing),
            OutputFormat::Json => Self::format_json(listing),
            OutputFormat::Csv => Self::format_csv(listing),
        }
    }

    /// Format rows as a bordered table using comfy-table.
    pub fn format_table<T: Tabular>(value: &T) -> String {
        let rows = value.rows();
        if rows.is_empty() {
            return format!("{}\n", value.empty_message());
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(value.columns().to_vec());
        for row in rows {
            table.add_row(row);
        }

        format!("{}\n", table)
    }

    /// Format as pretty-printed JSON.
    pub fn format_json<T: Serialize>(value: &T) -> String {
        match serde_json::to_string_pretty(value) {
            Ok(json) => format!("{}\n", json),
            Err(e) => {
                log::error!("Could not serialize results to JSON: {}", e);
                "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}\n"
                    .to_string()
            }
        }
    }

    /// Format as CSV with a header row.
    pub fn format_csv<T: Tabular>(value: &T) -> String {
        let mut output = String::new();
        output.push_str(&value.columns().join(","));
        output.push('\n');

        for row in value.rows() {
            let cells: Vec<String> = row.iter().map(|c| Self::csv_escape(c)).collect();
            output.push_str(&cells.join(","));
            output.push('\n');
        }

        output
    }

    fn csv_escape(cell: &str) -> String {
        if cell.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", cell.replace('"', "\"\""))
        } else {
            cell.to_string()
        }
    }
}
