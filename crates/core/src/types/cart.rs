//! Cart, cart item, and the catalog records they are built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ProductId, Quantity};

/// Product metadata as served by the catalog API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
}

/// Available stock for a product.
///
/// Authoritative maximum purchasable quantity; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    /// Whether `requested` units can be held in the cart.
    #[must_use]
    pub const fn covers(&self, requested: Quantity) -> bool {
        requested.get() <= self.amount
    }
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(rename = "image", alias = "imageUrl")]
    pub image_url: String,
    pub amount: Quantity,
}

impl CartItem {
    /// Build a single-unit line from catalog metadata.
    #[must_use]
    pub fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            price: product.price,
            image_url: product.image_url,
            amount: Quantity::ONE,
        }
    }

    /// Unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.amount.get())
    }
}

/// A stored cart held the same product on two lines.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cart holds product {0} more than once")]
pub struct DuplicateCartItem(pub ProductId);

/// The shopper's cart.
///
/// Lines keep insertion order and each product appears at most once.
/// Serializes as a plain JSON array of [`CartItem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.items.iter()
    }

    /// Number of distinct products (the cart badge count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.find(id).is_some()
    }

    /// Sum of amounts across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.amount.get()))
            .sum()
    }

    /// Sum of line subtotals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Append a new line. Returns `false` (and changes nothing) when the
    /// product already has a line.
    pub fn push(&mut self, item: CartItem) -> bool {
        if self.contains(item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Replace the amount of an existing line. Returns `false` when the
    /// product has no line.
    pub fn set_amount(&mut self, id: ProductId, amount: Quantity) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    /// Remove a line, keeping the order of the others.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }
}

impl TryFrom<Vec<CartItem>> for Cart {
    type Error = DuplicateCartItem;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        let mut cart = Self::new();
        for item in items {
            let id = item.id;
            if !cart.push(item) {
                return Err(DuplicateCartItem(id));
            }
        }
        Ok(cart)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: i32, price_cents: i64, amount: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            title: format!("Tênis {id}"),
            price: Decimal::new(price_cents, 2),
            image_url: format!("https://cdn.example.com/{id}.jpg"),
            amount: Quantity::try_from(amount).unwrap(),
        }
    }

    #[test]
    fn test_push_rejects_duplicate() {
        let mut cart = Cart::new();
        assert!(cart.push(item(1, 100, 1)));
        assert!(!cart.push(item(1, 100, 3)));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount.get(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut cart = Cart::new();
        cart.push(item(1, 100, 1));
        cart.push(item(2, 100, 1));
        cart.push(item(3, 100, 1));

        let removed = cart.remove(ProductId::new(2)).unwrap();
        assert_eq!(removed.id, ProductId::new(2));

        let ids: Vec<i32> = cart.iter().map(|i| i.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(cart.remove(ProductId::new(2)).is_none());
    }

    #[test]
    fn test_set_amount_replaces() {
        let mut cart = Cart::new();
        cart.push(item(1, 100, 2));
        assert!(cart.set_amount(
            ProductId::new(1),
            Quantity::try_from(5_i64).unwrap()
        ));
        assert_eq!(cart.find(ProductId::new(1)).unwrap().amount.get(), 5);
        assert!(!cart.set_amount(ProductId::new(9), Quantity::ONE));
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.push(item(1, 17_990, 2));
        cart.push(item(2, 13_990, 1));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(cart.total(), Decimal::new(49_970, 2));
    }

    #[test]
    fn test_json_shape() {
        let mut cart = Cart::new();
        cart.push(item(1, 17_990, 2));

        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "id": 1,
                "title": "Tênis 1",
                "price": 179.9,
                "image": "https://cdn.example.com/1.jpg",
                "amount": 2
            }])
        );
    }

    #[test]
    fn test_deserialize_accepts_image_url_alias() {
        let json = r#"[{"id":4,"title":"Tênis","price":99.5,"imageUrl":"x.jpg","amount":1}]"#;
        let cart: Cart = serde_json::from_str(json).unwrap();
        assert_eq!(cart.find(ProductId::new(4)).unwrap().image_url, "x.jpg");
    }

    #[test]
    fn test_deserialize_rejects_duplicates() {
        let json = r#"[
            {"id":1,"title":"a","price":1,"image":"a","amount":1},
            {"id":1,"title":"a","price":1,"image":"a","amount":2}
        ]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_zero_amount() {
        let json = r#"[{"id":1,"title":"a","price":1,"image":"a","amount":0}]"#;
        assert!(serde_json::from_str::<Cart>(json).is_err());
    }

    #[test]
    fn test_stock_covers() {
        let stock = Stock {
            id: ProductId::new(1),
            amount: 3,
        };
        assert!(stock.covers(Quantity::try_from(3_i64).unwrap()));
        assert!(!stock.covers(Quantity::try_from(4_i64).unwrap()));
    }
}
