//! Catalog API: product metadata and stock levels.
//!
//! # Architecture
//!
//! - [`StockService`] and [`ProductService`] are the seams the cart store
//!   depends on; tests substitute in-memory fakes
//! - [`ApiClient`] implements both over HTTP with `reqwest`
//! - Product metadata is cached via `moka` (5 minute TTL); stock never is
//!
//! # Endpoints
//!
//! - `GET {base}/products/{id}` → `{ id, title, price, image }`
//! - `GET {base}/stock/{id}` → `{ id, amount }`
//!
//! A 404 from either endpoint surfaces as [`CatalogError::NotFound`], which
//! callers can tell apart from a stock record whose amount is zero.

mod api;
mod cache;

pub use api::ApiClient;

use async_trait::async_trait;
use rocketshoes_core::{Product, ProductId, Stock};
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status other than 404.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The catalog has no record for this product.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// Response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Source of current stock levels.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Fetch the stock record for a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the product is unknown.
    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError>;
}

/// Source of product metadata.
#[async_trait]
pub trait ProductService: Send + Sync {
    /// Fetch title, price and image for a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when the product is unknown.
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError>;
}
