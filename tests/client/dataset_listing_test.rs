use std::sync::Arc;

use bqcat::catalog::{DatasetMetadata, InMemoryCatalog, TableMetadata};
use bqcat::client::CatalogClient;
use bqcat::error::CatalogError;

fn dataset(id: &str, description: &str) -> DatasetMetadata {
    let mut dataset = DatasetMetadata::new("acme", id);
    dataset.description = Some(description.to_string());
    dataset
}

#[tokio::test]
async fn test_lists_full_metadata_in_service_order() {
    let catalog = InMemoryCatalog::new()
        .with_dataset(dataset("zeta", "last alphabetically"))
        .with_dataset(dataset("alpha", "first alphabetically"))
        .with_table(TableMetadata::new("acme", "alpha", "t"));
    let client = CatalogClient::with_service(Arc::new(catalog), "acme", None)
        .await
        .unwrap();

    let listing = client.list_datasets().await;

    let ids: Vec<_> = listing.datasets.iter().map(|d| d.dataset_id.as_str()).collect();
    assert_eq!(ids, vec!["zeta", "alpha"]);
    assert_eq!(
        listing.datasets[1].description.as_deref(),
        Some("first alphabetically")
    );
}

#[tokio::test]
async fn test_empty_project_yields_empty_listing() {
    let client = CatalogClient::with_service(Arc::new(InMemoryCatalog::new()), "acme", None)
        .await
        .unwrap();

    assert!(client.list_datasets().await.is_empty());
    assert!(client.try_list_datasets().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_swallowed() {
    let catalog = InMemoryCatalog::new()
        .with_dataset(dataset("orders", "o"))
        .failing_list("acme", "quota exceeded");
    let client = CatalogClient::with_service(Arc::new(catalog), "acme", None)
        .await
        .unwrap();

    let listing = client.list_datasets().await;
    assert!(listing.is_empty());

    let err = client.try_list_datasets().await.unwrap_err();
    assert!(matches!(err, CatalogError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_listing_follows_selected_project() {
    let catalog = InMemoryCatalog::new()
        .with_dataset(dataset("orders", "o"))
        .with_dataset(DatasetMetadata::new("other", "archive"));
    let mut client = CatalogClient::with_service(Arc::new(catalog), "acme", None)
        .await
        .unwrap();

    client.select_project("other");
    let listing = client.list_datasets().await;

    assert_eq!(listing.len(), 1);
    assert_eq!(listing.datasets[0].project_id, "other");
}

#[tokio::test]
async fn test_listing_fetches_each_dataset() {
    let catalog = Arc::new(
        InMemoryCatalog::new()
            .with_dataset(dataset("a", "a"))
            .with_dataset(dataset("b", "b"))
            .with_dataset(dataset("c", "c")),
    );
    let client = CatalogClient::with_service(catalog.clone(), "acme", None)
        .await
        .unwrap();

    client.list_datasets().await;

    // One enumeration plus one fetch per dataset.
    assert_eq!(catalog.calls(), 4);
}
