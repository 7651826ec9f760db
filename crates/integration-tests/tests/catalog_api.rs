//! Integration tests for the catalog HTTP client.
//!
//! These run `ApiClient` against the in-process fake catalog and check that
//! a missing product is told apart from zero stock, and that only product
//! metadata is cached.

#![allow(clippy::unwrap_used)]

use rocketshoes_core::ProductId;
use rocketshoes_integration_tests::FakeCatalog;
use rocketshoes_storefront::catalog::{ApiClient, CatalogError, ProductService, StockService};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_fetch_product_metadata() {
    let catalog = FakeCatalog::start().await;
    catalog.add_product(1, "Tênis de Caminhada Leve Confortável", 17_990, 3);
    let client = ApiClient::new(&catalog.api_config()).unwrap();

    let product = client.product(ProductId::new(1)).await.unwrap();
    assert_eq!(product.id, ProductId::new(1));
    assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
    assert_eq!(product.price, Decimal::new(17_990, 2));
    assert!(product.image_url.ends_with("/images/1.jpg"));
}

#[tokio::test]
async fn test_zero_stock_is_not_not_found() {
    let catalog = FakeCatalog::start().await;
    catalog.add_product(1, "Tênis", 10_000, 0);
    let client = ApiClient::new(&catalog.api_config()).unwrap();

    let stock = client.stock(ProductId::new(1)).await.unwrap();
    assert_eq!(stock.amount, 0);

    let err = client.stock(ProductId::new(2)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(id) if id == ProductId::new(2)));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let catalog = FakeCatalog::start().await;
    let client = ApiClient::new(&catalog.api_config()).unwrap();

    let err = client.product(ProductId::new(5)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let catalog = FakeCatalog::start().await;
    catalog.add_product(1, "Tênis", 10_000, 4);
    catalog.fail(1);
    let client = ApiClient::new(&catalog.api_config()).unwrap();

    let err = client.stock(ProductId::new(1)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Api { status: 500, .. }));
}

#[tokio::test]
async fn test_products_cached_stock_not() {
    let catalog = FakeCatalog::start().await;
    catalog.add_product(1, "Tênis", 10_000, 4);
    let client = ApiClient::new(&catalog.api_config()).unwrap();

    for _ in 0..3 {
        client.product(ProductId::new(1)).await.unwrap();
        client.stock(ProductId::new(1)).await.unwrap();
    }

    assert_eq!(catalog.product_hits(), 1);
    assert_eq!(catalog.stock_hits(), 3);
}

#[tokio::test]
async fn test_stock_changes_are_seen_immediately() {
    let catalog = FakeCatalog::start().await;
    catalog.add_product(1, "Tênis", 10_000, 4);
    let client = ApiClient::new(&catalog.api_config()).unwrap();

    assert_eq!(client.stock(ProductId::new(1)).await.unwrap().amount, 4);
    catalog.set_stock(1, 1);
    assert_eq!(client.stock(ProductId::new(1)).await.unwrap().amount, 1);
}
