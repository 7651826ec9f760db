//! Cart state container.

use std::sync::Arc;

use rocketshoes_core::{Cart, CartItem, ProductId, Quantity};
use tokio::sync::Mutex;
use tracing::instrument;

use super::{Operation, Outcome, messages};
use crate::catalog::{ProductService, StockService};
use crate::error::{CartError, Result};
use crate::notify::{Notification, Notifier};
use crate::storage::{PersistentKv, StorageError, StorageKey};

/// Collaborators a [`CartStore`] is built from.
#[derive(Clone)]
pub struct CartServices {
    pub stock: Arc<dyn StockService>,
    pub products: Arc<dyn ProductService>,
    pub storage: Arc<dyn PersistentKv>,
    pub notifier: Arc<dyn Notifier>,
}

/// The shopper's cart, kept in sync with persistent storage.
///
/// Mutations are serialized: each one holds the cart lock from the first
/// stock lookup until the new snapshot is committed, so overlapping calls
/// never compute their change from the same stale cart.
///
/// A new snapshot is written to storage before it replaces the in-memory
/// cart. If the write fails the in-memory cart stays as it was.
pub struct CartStore {
    cart: Mutex<Cart>,
    key: StorageKey,
    services: CartServices,
}

impl CartStore {
    /// Load the cart stored under `key`.
    ///
    /// An absent or blank value yields an empty cart. A value that does not
    /// decode is copied to the key's `.corrupt` backup and the cart starts
    /// empty; the original value stays in place until the next mutation.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read, or if a corrupt value
    /// cannot be backed up.
    pub fn open(
        key: StorageKey,
        services: CartServices,
    ) -> std::result::Result<Self, StorageError> {
        let cart = match services.storage.load(&key)? {
            Some(raw) if !raw.trim().is_empty() => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => cart,
                Err(error) => {
                    let backup = key.corrupt_backup();
                    tracing::warn!(
                        key = %key,
                        backup = %backup,
                        error = %error,
                        "Stored cart is corrupt, starting empty"
                    );
                    services.storage.save(&backup, &raw)?;
                    Cart::new()
                }
            },
            _ => Cart::new(),
        };

        tracing::info!(key = %key, items = cart.len(), "Cart loaded");

        Ok(Self {
            cart: Mutex::new(cart),
            key,
            services,
        })
    }

    /// Storage key the cart is persisted under.
    #[must_use]
    pub const fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Current cart snapshot.
    ///
    /// Waits for an in-flight mutation to finish.
    pub async fn cart(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart is incremented if stock allows; a new
    /// product is appended with amount 1 after fetching its metadata and
    /// stock concurrently.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Outcome {
        let mut cart = self.cart.lock().await;
        let result = self.try_add_product(&mut cart, product_id).await;
        drop(cart);
        self.report(Operation::Add, result)
    }

    /// Remove a product's line.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Outcome {
        let mut cart = self.cart.lock().await;
        let result = self.try_remove_product(&mut cart, product_id);
        drop(cart);
        self.report(Operation::Remove, result)
    }

    /// Set a product's amount to exactly `amount`.
    ///
    /// Amounts of zero or less, and amounts above the available stock, are
    /// reported as a stock shortage.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) -> Outcome {
        let mut cart = self.cart.lock().await;
        let result = self
            .try_update_product_amount(&mut cart, product_id, amount)
            .await;
        drop(cart);
        self.report(Operation::UpdateAmount, result)
    }

    async fn try_add_product(&self, cart: &mut Cart, id: ProductId) -> Result<()> {
        let mut next = cart.clone();

        if let Some(existing) = cart.find(id) {
            let stock = self.services.stock.stock(id).await?;
            let amount = existing
                .amount
                .incremented()
                .filter(|amount| stock.covers(*amount))
                .ok_or(CartError::InsufficientStock {
                    id,
                    requested: u64::from(existing.amount.get()) + 1,
                    available: stock.amount,
                })?;
            next.set_amount(id, amount);
        } else {
            let (product, stock) = tokio::try_join!(
                self.services.products.product(id),
                self.services.stock.stock(id)
            )?;
            if stock.amount == 0 {
                return Err(CartError::InsufficientStock {
                    id,
                    requested: 1,
                    available: 0,
                });
            }
            next.push(CartItem {
                id,
                ..CartItem::from_product(product)
            });
        }

        self.commit(cart, next)
    }

    fn try_remove_product(&self, cart: &mut Cart, id: ProductId) -> Result<()> {
        let mut next = cart.clone();
        if next.remove(id).is_none() {
            return Err(CartError::NotInCart(id));
        }
        self.commit(cart, next)
    }

    async fn try_update_product_amount(
        &self,
        cart: &mut Cart,
        id: ProductId,
        amount: i64,
    ) -> Result<()> {
        let stock = self.services.stock.stock(id).await;

        if !cart.contains(id) {
            return Err(CartError::NotInCart(id));
        }
        let stock = stock?;

        let quantity = Quantity::try_from(amount)?;
        if !stock.covers(quantity) {
            return Err(CartError::InsufficientStock {
                id,
                requested: u64::from(quantity.get()),
                available: stock.amount,
            });
        }

        let mut next = cart.clone();
        next.set_amount(id, quantity);
        self.commit(cart, next)
    }

    /// Persist `next`, then make it the current cart.
    fn commit(&self, cart: &mut Cart, next: Cart) -> Result<()> {
        let snapshot = serde_json::to_string(&next).map_err(StorageError::Serialize)?;
        self.services.storage.save(&self.key, &snapshot)?;
        *cart = next;
        Ok(())
    }

    /// Turn a result into the call's single notification and its outcome.
    fn report(&self, operation: Operation, result: Result<()>) -> Outcome {
        let (outcome, notification) = match result {
            Ok(()) => {
                tracing::info!(?operation, "Cart updated");
                (
                    Outcome::Success,
                    Notification::success(operation.success_message()),
                )
            }
            Err(err) if err.is_stock_shortage() => {
                tracing::info!(?operation, error = %err, "Cart change refused");
                (
                    Outcome::OutOfStock,
                    Notification::error(messages::OUT_OF_STOCK),
                )
            }
            Err(err) => {
                match &err {
                    CartError::Catalog(_) | CartError::Persistence(_) => {
                        tracing::error!(?operation, error = %err, "Cart operation failed");
                    }
                    _ => tracing::warn!(?operation, error = %err, "Cart operation failed"),
                }
                (
                    Outcome::Failed,
                    Notification::error(operation.failure_message()),
                )
            }
        };

        self.services.notifier.notify(notification);
        outcome
    }
}
