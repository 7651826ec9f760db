//! Integration tests for RocketShoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! No external services are needed: [`FakeCatalog`] serves the catalog API
//! in-process on an ephemeral port, and carts are persisted to temporary
//! directories.
//!
//! # Test Categories
//!
//! - `catalog_api` - HTTP client against the fake catalog
//! - `cart_flow` - Cart store end to end: HTTP catalog, file storage, reloads

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use rocketshoes_storefront::config::{CatalogApiConfig, parse_base_url};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

/// Shared state behind the fake catalog routes.
#[derive(Default)]
struct CatalogData {
    products: Mutex<HashMap<i32, serde_json::Value>>,
    stock: Mutex<HashMap<i32, u32>>,
    failing: Mutex<HashSet<i32>>,
    product_hits: AtomicUsize,
    stock_hits: AtomicUsize,
}

/// In-process stand-in for the catalog REST API.
///
/// Serves `GET /products/{id}` and `GET /stock/{id}`, answering 404 with an
/// empty object for unknown IDs like a json-server backend does.
pub struct FakeCatalog {
    addr: SocketAddr,
    data: Arc<CatalogData>,
}

impl FakeCatalog {
    /// Bind to an ephemeral port and start serving.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::unwrap_used)]
    pub async fn start() -> Self {
        let data = Arc::new(CatalogData::default());

        let app = Router::new()
            .route("/products/{id}", get(product))
            .route("/stock/{id}", get(stock))
            .with_state(Arc::clone(&data));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, data }
    }

    /// Register a product with its price (in cents) and stock level.
    pub fn add_product(&self, id: i32, title: &str, price_cents: i64, stock: u32) {
        let price = Decimal::new(price_cents, 2).to_f64().unwrap_or_default();
        lock(&self.data.products).insert(
            id,
            json!({
                "id": id,
                "title": title,
                "price": price,
                "image": format!("https://rocketshoes.example.com/images/{id}.jpg"),
            }),
        );
        self.set_stock(id, stock);
    }

    /// Change the stock level of a product.
    pub fn set_stock(&self, id: i32, amount: u32) {
        lock(&self.data.stock).insert(id, amount);
    }

    /// Make both endpoints answer 500 for this product.
    pub fn fail(&self, id: i32) {
        lock(&self.data.failing).insert(id);
    }

    /// Number of `/products/{id}` requests served.
    pub fn product_hits(&self) -> usize {
        self.data.product_hits.load(Ordering::SeqCst)
    }

    /// Number of `/stock/{id}` requests served.
    pub fn stock_hits(&self) -> usize {
        self.data.stock_hits.load(Ordering::SeqCst)
    }

    /// Client configuration pointing at this server.
    ///
    /// # Panics
    ///
    /// Never in practice: the bound address always forms a valid URL.
    #[allow(clippy::unwrap_used)]
    pub fn api_config(&self) -> CatalogApiConfig {
        CatalogApiConfig {
            base_url: parse_base_url(&format!("http://{}", self.addr)).unwrap(),
            timeout: Some(std::time::Duration::from_secs(5)),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({}))).into_response()
}

fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response()
}

async fn product(State(data): State<Arc<CatalogData>>, Path(id): Path<i32>) -> Response {
    data.product_hits.fetch_add(1, Ordering::SeqCst);
    if lock(&data.failing).contains(&id) {
        return server_error();
    }
    let record = lock(&data.products).get(&id).cloned();
    record.map_or_else(not_found, |record| Json(record).into_response())
}

async fn stock(State(data): State<Arc<CatalogData>>, Path(id): Path<i32>) -> Response {
    data.stock_hits.fetch_add(1, Ordering::SeqCst);
    if lock(&data.failing).contains(&id) {
        return server_error();
    }
    let amount = lock(&data.stock).get(&id).copied();
    amount.map_or_else(not_found, |amount| {
        Json(json!({ "id": id, "amount": amount })).into_response()
    })
}
