use chrono::{TimeZone, Utc};

use bqcat::catalog::{
    DatasetMetadata, FieldMode, SchemaField, TableMetadata, TableSummary, TableType,
};
use bqcat::report::{
    DatasetListing, DatasetReport, OutputFormat, ResultFormatter, SchemaListing, TableListing,
    TableReport,
};

fn orders() -> DatasetMetadata {
    let mut dataset = DatasetMetadata::new("acme", "orders");
    dataset.friendly_name = Some("Orders".to_string());
    dataset.created = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    dataset.last_modified = Some(Utc.with_ymd_and_hms(2024, 1, 2, 12, 30, 0).unwrap());
    dataset.default_table_expiration_ms = Some(86_400_000);
    dataset.location = Some("EU".to_string());
    dataset.description = Some("Order facts".to_string());
    dataset
}

fn summaries(ids: &[&str]) -> Vec<TableSummary> {
    ids.iter()
        .map(|id| TableMetadata::new("acme", "orders", *id).summary())
        .collect()
}

fn events_schema() -> Vec<SchemaField> {
    vec![
        SchemaField::new("id", "INTEGER").with_mode(FieldMode::Required),
        SchemaField::new("payload", "RECORD")
            .with_description("Raw event, as received")
            .with_fields(vec![
                SchemaField::new("nested", "STRING"),
                SchemaField::new("inner", "RECORD")
                    .with_mode(FieldMode::Repeated)
                    .with_fields(vec![SchemaField::new("x", "INTEGER")]),
            ]),
    ]
}

#[test]
fn test_dataset_report_text_layout() {
    let report = DatasetReport::new(orders(), &summaries(&["events", "items"]));

    let expected = "\
Dataset ID:               orders
Friendly Name:            Orders
Created:                  2024-01-01 00:00:00 UTC
Last Modified:            2024-01-02 12:30:00 UTC
Default Table Expiration: 86400000
Location:                 EU

Dataset Description: Order facts

Tables found in orders: 2

\t- events
\t- items
";
    assert_eq!(report.to_string(), expected);
    assert_eq!(
        ResultFormatter::format_report(&report, OutputFormat::Table),
        expected
    );
}

#[test]
fn test_dataset_report_absent_values() {
    let report = DatasetReport::new(DatasetMetadata::new("acme", "bare"), &[]);

    let expected = "\
Dataset ID:               bare
Friendly Name:            None
Created:                  None
Last Modified:            None
Default Table Expiration: None
Location:                 None

Dataset Description: None
Dataset 'bare' does not have any tables.
";
    assert_eq!(report.to_string(), expected);
}

#[test]
fn test_table_report_text_layout() {
    let mut table = TableMetadata::new("acme", "orders", "events");
    table.created = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    table.num_rows = Some(1200);
    table.num_bytes = Some(65536);
    table.description = Some("Clickstream".to_string());

    let expected = "\
Table ID:         events
Friendly Name:    None
Created:          2024-01-01 00:00:00 UTC
Last Modified:    None
Table Expiration: None
Number of Rows:   1200
Number of Bytes:  65536

Table Description: Clickstream
";
    assert_eq!(TableReport::new(table).to_string(), expected);
}

#[test]
fn test_table_report_csv_is_field_value_pairs() {
    let mut table = TableMetadata::new("acme", "orders", "events");
    table.num_rows = Some(3);
    table.description = Some("a, b".to_string());

    let csv = ResultFormatter::format_report(&TableReport::new(table), OutputFormat::Csv);
    let lines: Vec<_> = csv.lines().collect();

    assert_eq!(lines[0], "field,value");
    assert_eq!(lines[1], "table_id,events");
    assert!(lines.contains(&"num_rows,3"));
    assert!(lines.contains(&"expires,"));
    assert!(lines.contains(&"description,\"a, b\""));
}

#[test]
fn test_dataset_listing_csv() {
    let listing = DatasetListing::new(vec![orders(), DatasetMetadata::new("acme", "staging")]);

    let csv = ResultFormatter::format_listing(&listing, OutputFormat::Csv);

    assert_eq!(
        csv,
        "dataset_id,friendly_name,created,last_modified,default_table_expiration,data_location,description\n\
         orders,Orders,2024-01-01 00:00:00 UTC,2024-01-02 12:30:00 UTC,86400000,EU,Order facts\n\
         staging,,,,,,\n"
    );
}

#[test]
fn test_dataset_listing_table_has_every_column() {
    let listing = DatasetListing::new(vec![orders()]);

    let table = ResultFormatter::format_listing(&listing, OutputFormat::Table);

    for column in [
        "dataset_id",
        "friendly_name",
        "created",
        "last_modified",
        "default_table_expiration",
        "data_location",
        "description",
    ] {
        assert!(table.contains(column), "missing column {}", column);
    }
    assert!(table.contains("Order facts"));
}

#[test]
fn test_dataset_listing_json_is_an_array() {
    let listing = DatasetListing::new(vec![orders()]);

    let json = ResultFormatter::format_listing(&listing, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["dataset_id"], "orders");
    assert_eq!(rows[0]["default_table_expiration_ms"], 86_400_000);
}

#[test]
fn test_schema_listing_summarizes_nested_fields() {
    let listing = SchemaListing::new("events", events_schema());

    let csv = ResultFormatter::format_listing(&listing, OutputFormat::Csv);

    assert_eq!(
        csv,
        "field_name,type,mode,description,fields\n\
         id,INTEGER,REQUIRED,,\n\
         payload,RECORD,NULLABLE,\"Raw event, as received\",\"nested:STRING, inner:RECORD<x:INTEGER>\"\n"
    );
}

#[test]
fn test_schema_listing_json_keeps_structure() {
    let listing = SchemaListing::new(
        "events",
        vec![SchemaField::new("id", "INTEGER").with_mode(FieldMode::Required)],
    );

    let json = ResultFormatter::format_listing(&listing, OutputFormat::Json);

    insta::assert_snapshot!(json.trim_end(), @r#"
    {
      "table_id": "events",
      "fields": [
        {
          "name": "id",
          "type": "INTEGER",
          "mode": "REQUIRED",
          "description": null,
          "fields": []
        }
      ]
    }
    "#);
}

#[test]
fn test_schema_listing_json_nested_fields() {
    let listing = SchemaListing::new("events", events_schema());

    let json = ResultFormatter::format_listing(&listing, OutputFormat::Json);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let inner = &value["fields"][1]["fields"][1];
    assert_eq!(inner["name"], "inner");
    assert_eq!(inner["mode"], "REPEATED");
    assert_eq!(inner["fields"][0]["type"], "INTEGER");
}

#[test]
fn test_table_listing_rows() {
    let mut view = TableMetadata::new("acme", "orders", "daily").summary();
    view.table_type = TableType::View;
    let listing = TableListing {
        tables: vec![TableMetadata::new("acme", "orders", "events").summary(), view],
    };

    let csv = ResultFormatter::format_listing(&listing, OutputFormat::Csv);

    assert_eq!(csv, "table_id,type,friendly_name\nevents,TABLE,\ndaily,VIEW,\n");
}

#[test]
fn test_empty_schema_table_message() {
    let listing = SchemaListing::new("events", Vec::new());
    assert_eq!(
        ResultFormatter::format_listing(&listing, OutputFormat::Table),
        "No fields found\n"
    );
}
