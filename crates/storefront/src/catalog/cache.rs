//! Cache for catalog product metadata.

use std::time::Duration;

use moka::future::Cache;
use rocketshoes_core::{Product, ProductId};

const MAX_CAPACITY: u64 = 1000;
const TIME_TO_LIVE: Duration = Duration::from_secs(300);

/// Product metadata keyed by product ID.
///
/// Stock levels must never go through here: they are authoritative and
/// fetched fresh on every cart mutation.
#[derive(Clone)]
pub struct ProductCache {
    inner: Cache<ProductId, Product>,
}

impl ProductCache {
    pub fn new() -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(MAX_CAPACITY)
                .time_to_live(TIME_TO_LIVE)
                .build(),
        }
    }

    pub async fn get(&self, id: ProductId) -> Option<Product> {
        self.inner.get(&id).await
    }

    pub async fn insert(&self, product: Product) {
        self.inner.insert(product.id, product).await;
    }
}
