//! Cart line quantity type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The requested amount is zero or negative.
    #[error("quantity must be at least 1 (got {0})")]
    NotPositive(i64),
    /// The requested amount does not fit in a cart line.
    #[error("quantity must be at most {max} (got {got})")]
    TooLarge {
        /// Maximum allowed quantity.
        max: u32,
        /// Requested quantity.
        got: i64,
    },
}

/// The number of units of one product held in the cart.
///
/// ## Constraints
///
/// - Always at least 1; a line with no units is removed, never stored.
///
/// ## Examples
///
/// ```
/// use rocketshoes_core::Quantity;
///
/// assert!(Quantity::try_from(3_i64).is_ok());
/// assert!(Quantity::try_from(0_i64).is_err());
/// assert!(Quantity::try_from(-2_i64).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more unit, or `None` on overflow.
    #[must_use]
    pub fn incremented(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(QuantityError::NotPositive(value));
        }
        u32::try_from(value).map(Self).map_err(|_| QuantityError::TooLarge {
            max: u32::MAX,
            got: value,
        })
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_try_from_positive() {
        assert_eq!(Quantity::try_from(5_i64).unwrap().get(), 5);
    }

    #[test]
    fn test_try_from_zero_and_negative() {
        assert_eq!(
            Quantity::try_from(0_i64),
            Err(QuantityError::NotPositive(0))
        );
        assert_eq!(
            Quantity::try_from(-1_i64),
            Err(QuantityError::NotPositive(-1))
        );
    }

    #[test]
    fn test_try_from_too_large() {
        let too_big = i64::from(u32::MAX) + 1;
        assert!(matches!(
            Quantity::try_from(too_big),
            Err(QuantityError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_incremented() {
        assert_eq!(Quantity::ONE.incremented().unwrap().get(), 2);
        assert!(Quantity(u32::MAX).incremented().is_none());
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("2").unwrap().get(), 2);
    }

    #[test]
    fn test_serialize_as_number() {
        assert_eq!(serde_json::to_string(&Quantity::ONE).unwrap(), "1");
    }
}
