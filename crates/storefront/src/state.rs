//! Application state shared across the storefront.

use std::sync::Arc;

use crate::cart::{CartServices, CartStore};
use crate::catalog::{ApiClient, CatalogError};
use crate::config::StorefrontConfig;
use crate::notify::Notifier;
use crate::storage::{FileKv, StorageError, StorageKey};

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("catalog client: {0}")]
    Catalog(#[from] CatalogError),
    #[error("cart storage: {0}")]
    Storage(#[from] StorageError),
}

/// Application state handed to whatever drives the cart.
///
/// This struct is cheaply cloneable via `Arc`; every clone refers to the same
/// cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: ApiClient,
    cart: CartStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Wires the catalog API client and the file-backed storage from
    /// `config`, then loads the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the stored
    /// cart cannot be read.
    pub fn new(config: StorefrontConfig, notifier: Arc<dyn Notifier>) -> Result<Self, StateError> {
        let catalog = ApiClient::new(&config.api)?;
        let storage = Arc::new(FileKv::new(config.storage.dir.clone()));

        let cart = CartStore::open(
            StorageKey::cart(config.storage.namespace.clone()),
            CartServices {
                stock: Arc::new(catalog.clone()),
                products: Arc::new(catalog.clone()),
                storage,
                notifier,
            },
        )?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &ApiClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }
}
