use std::sync::Arc;

use bqcat::catalog::{DatasetMetadata, FieldMode, InMemoryCatalog, SchemaField, TableMetadata};
use bqcat::client::CatalogClient;
use bqcat::error::CatalogError;

fn catalog() -> Arc<InMemoryCatalog> {
    let mut orders = DatasetMetadata::new("acme", "orders");
    orders.friendly_name = Some("Orders".to_string());
    orders.location = Some("EU".to_string());

    let mut events = TableMetadata::new("acme", "orders", "events").with_schema(vec![
        SchemaField::new("id", "INTEGER").with_mode(FieldMode::Required),
        SchemaField::new("payload", "RECORD").with_fields(vec![
            SchemaField::new("nested", "STRING"),
            SchemaField::new("inner", "RECORD")
                .with_mode(FieldMode::Repeated)
                .with_fields(vec![SchemaField::new("x", "INTEGER")]),
        ]),
    ]);
    events.num_rows = Some(42);

    Arc::new(
        InMemoryCatalog::new()
            .with_dataset(orders)
            .with_table(events)
            .with_table(TableMetadata::new("acme", "orders", "items"))
            .with_dataset(DatasetMetadata::new("acme", "empty"))
            .with_table(TableMetadata::new("other", "archive", "old")),
    )
}

#[tokio::test]
async fn test_connect_without_dataset() {
    let client = CatalogClient::with_service(catalog(), "acme", None)
        .await
        .unwrap();

    assert_eq!(client.project_id(), "acme");
    assert_eq!(client.dataset_id(), None);
    assert!(client.dataset().is_none());
    assert!(client.tables().is_empty());
}

#[tokio::test]
async fn test_connect_with_dataset_caches_tables() {
    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    assert_eq!(client.dataset_id(), Some("orders"));
    assert_eq!(
        client.dataset().and_then(|d| d.friendly_name.as_deref()),
        Some("Orders")
    );
    let tables: Vec<_> = client.tables().iter().map(|t| t.table_id.as_str()).collect();
    assert_eq!(tables, vec!["events", "items"]);
}

#[tokio::test]
async fn test_connect_with_missing_dataset_fails() {
    let err = CatalogClient::with_service(catalog(), "acme", Some("nope"))
        .await
        .unwrap_err();

    assert!(matches!(err, CatalogError::DatasetNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Dataset 'nope' does not exist in project 'acme'."
    );
}

#[tokio::test]
async fn test_select_dataset_replaces_context() {
    let mut client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    client.select_dataset("empty").await.unwrap();

    assert_eq!(client.dataset_id(), Some("empty"));
    assert!(client.tables().is_empty());
}

#[tokio::test]
async fn test_describe_dataset_defaults_to_selection() {
    let mut client = CatalogClient::with_service(catalog(), "acme", None)
        .await
        .unwrap();

    client.select_dataset("orders").await.unwrap();
    let report = client.describe_dataset(None).await.unwrap();

    assert_eq!(report.dataset_id(), "orders");
    assert_eq!(report.tables, vec!["events", "items"]);
}

#[tokio::test]
async fn test_select_project_then_dataset() {
    let mut client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    client.select_project("other");
    assert_eq!(client.project_id(), "other");
    // The old selection stays usable until replaced.
    assert_eq!(client.dataset_id(), Some("orders"));
    assert!(client.describe_table("events").await.is_ok());

    client.select_dataset("archive").await.unwrap();
    assert_eq!(client.tables().len(), 1);
    assert!(client.describe_table("old").await.is_ok());
}

#[tokio::test]
async fn test_describe_dataset_requires_selection() {
    let client = CatalogClient::with_service(catalog(), "acme", None)
        .await
        .unwrap();

    let err = client.describe_dataset(None).await.unwrap_err();
    assert!(matches!(err, CatalogError::MissingSelection));
    assert_eq!(
        err.to_string(),
        "No dataset ID provided and no dataset is selected."
    );
}

#[tokio::test]
async fn test_describe_other_dataset_keeps_selection() {
    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    let report = client.describe_dataset(Some("empty")).await.unwrap();
    assert_eq!(report.dataset_id(), "empty");
    assert_eq!(report.table_count(), 0);
    assert_eq!(client.dataset_id(), Some("orders"));

    let err = client.describe_dataset(Some("nope")).await.unwrap_err();
    assert!(matches!(err, CatalogError::DatasetNotFound { .. }));
}

#[tokio::test]
async fn test_describe_dataset_without_selection_by_id() {
    let client = CatalogClient::with_service(catalog(), "acme", None)
        .await
        .unwrap();

    let report = client.describe_dataset(Some("orders")).await.unwrap();
    assert_eq!(report.tables, vec!["events", "items"]);
    assert_eq!(client.dataset_id(), None);
}

#[tokio::test]
async fn test_describe_table() {
    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    let report = client.describe_table("events").await.unwrap();
    assert_eq!(report.table_id(), "events");
    assert_eq!(report.table.num_rows, Some(42));
}

#[tokio::test]
async fn test_describe_table_errors() {
    let client = CatalogClient::with_service(catalog(), "acme", None)
        .await
        .unwrap();
    assert!(matches!(
        client.describe_table("events").await,
        Err(CatalogError::MissingSelection)
    ));

    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();
    let err = client.describe_table("nope").await.unwrap_err();
    assert!(matches!(err, CatalogError::TableNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Table 'nope' does not exist in dataset 'orders'."
    );
}

#[tokio::test]
async fn test_table_schema_lists_top_level_fields() {
    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    let schema = client.get_table_schema("events").await.unwrap();
    assert_eq!(schema.table_id, "events");
    assert_eq!(schema.len(), 2);
    assert_eq!(schema.fields[0].name, "id");
    assert_eq!(schema.fields[0].mode, FieldMode::Required);
    assert_eq!(schema.fields[1].fields.len(), 2);

    let empty = client.get_table_schema("items").await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_list_tables_of_selection() {
    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    let listing = client.list_tables().unwrap();
    assert_eq!(listing.tables.len(), 2);
}

#[tokio::test]
async fn test_every_listed_table_describes() {
    let client = CatalogClient::with_service(catalog(), "acme", Some("orders"))
        .await
        .unwrap();

    for summary in client.tables() {
        let report = client.describe_table(&summary.table_id).await.unwrap();
        assert_eq!(report.table_id(), summary.table_id);
    }
}
