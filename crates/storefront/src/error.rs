//! Cart error taxonomy.
//!
//! Errors never leave a cart operation: the store converts each one into a
//! single notification and an [`Outcome`](crate::cart::Outcome). `CartError`
//! exists so that conversion happens in exactly one place.

use rocketshoes_core::{ProductId, QuantityError};
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::storage::StorageError;

/// Why a cart operation did not apply.
#[derive(Debug, Error)]
pub enum CartError {
    /// The catalog does not know the product.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// The product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Stock cannot cover the requested amount.
    #[error("Insufficient stock for product {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: ProductId,
        requested: u64,
        available: u32,
    },

    /// Requested amount is not a valid line quantity.
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] QuantityError),

    /// Catalog API failed for a reason other than a missing product.
    #[error("Catalog error: {0}")]
    Catalog(CatalogError),

    /// The new snapshot could not be persisted.
    #[error("Storage error: {0}")]
    Persistence(#[from] StorageError),
}

impl CartError {
    /// Whether the shopper should be told the stock ran out, rather than
    /// that the operation failed.
    #[must_use]
    pub const fn is_stock_shortage(&self) -> bool {
        matches!(self, Self::InsufficientStock { .. } | Self::InvalidAmount(_))
    }
}

impl From<CatalogError> for CartError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => Self::NotFound(id),
            other => Self::Catalog(other),
        }
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_not_found_maps_to_not_found() {
        let err = CartError::from(CatalogError::NotFound(ProductId::new(2)));
        assert!(matches!(err, CartError::NotFound(id) if id == ProductId::new(2)));
    }

    #[test]
    fn test_other_catalog_errors_wrap() {
        let err = CartError::from(CatalogError::Parse("bad".to_string()));
        assert!(matches!(err, CartError::Catalog(_)));
        assert!(!err.is_stock_shortage());
    }

    #[test]
    fn test_stock_shortage_classification() {
        let shortage = CartError::InsufficientStock {
            id: ProductId::new(1),
            requested: 4,
            available: 3,
        };
        assert!(shortage.is_stock_shortage());
        let invalid = CartError::InvalidAmount(QuantityError::NotPositive(0));
        assert!(invalid.is_stock_shortage());
        assert!(!CartError::NotInCart(ProductId::new(1)).is_stock_shortage());
        assert!(!CartError::NotFound(ProductId::new(1)).is_stock_shortage());
    }

    #[test]
    fn test_display() {
        let err = CartError::InsufficientStock {
            id: ProductId::new(1),
            requested: 4,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 1: requested 4, available 3"
        );
    }
}
