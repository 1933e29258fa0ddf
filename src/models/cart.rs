use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::product::Product;

/// A product in the cart together with how many units were ordered.
/// A line never holds a quantity of zero; it is removed instead.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        Self {
            product: product.clone(),
            quantity: 1,
        }
    }

    pub fn id(&self) -> u32 {
        self.product.id
    }

    pub fn subtotal(&self) -> u64 {
        self.product
            .price_preorder
            .saturating_mul(u64::from(self.quantity))
    }

    pub fn savings(&self) -> u64 {
        self.product
            .saving_per_unit()
            .saturating_mul(u64::from(self.quantity))
    }
}

/// Outcome of [`Cart::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated { previous: u32, current: u32 },
    Removed { previous: u32 },
    NotInCart,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart line for product {id} has quantity 0")]
    ZeroQuantity { id: u32 },
    #[error("Cart has more than one line for product {id}")]
    DuplicateLine { id: u32 },
}

/// Ordered cart lines, at most one per product id. Lines keep the position
/// of their first insertion.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(try_from = "CartLines")]
pub struct Cart {
    lines: Vec<CartLine>,
}

// Unchecked wire form of a cart
#[derive(Deserialize)]
struct CartLines {
    lines: Vec<CartLine>,
}

impl TryFrom<CartLines> for Cart {
    type Error = CartError;

    fn try_from(raw: CartLines) -> Result<Self, Self::Error> {
        let mut seen = HashSet::with_capacity(raw.lines.len());
        for line in &raw.lines {
            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity { id: line.id() });
            }
            if !seen.insert(line.id()) {
                return Err(CartError::DuplicateLine { id: line.id() });
            }
        }
        Ok(Self { lines: raw.lines })
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`. An existing line for the same id is
    /// incremented in place, otherwise a new line is appended.
    /// Returns the line's quantity after the add.
    pub fn add_item(&mut self, product: &Product) -> u32 {
        if let Some(line) = self.lines.iter_mut().find(|line| line.id() == product.id) {
            line.quantity = line.quantity.saturating_add(1);
            return line.quantity;
        }

        self.lines.push(CartLine::new(product));
        1
    }

    /**
     * Replace the quantity of the line for `product_id`.
     * Anything below 1 removes the line; values past u32::MAX saturate.
     * An id with no line leaves the cart untouched.
     */
    pub fn set_quantity(&mut self, product_id: u32, quantity: i64) -> QuantityChange {
        let Some(index) = self.position(product_id) else {
            return QuantityChange::NotInCart;
        };

        if quantity < 1 {
            let removed = self.lines.remove(index);
            return QuantityChange::Removed {
                previous: removed.quantity,
            };
        }

        let current = u32::try_from(quantity).unwrap_or(u32::MAX);
        let line = &mut self.lines[index];
        let previous = line.quantity;
        line.quantity = current;

        QuantityChange::Updated { previous, current }
    }

    /// Sum of preorder price times quantity over all lines.
    pub fn total(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |sum, line| sum.saturating_add(line.subtotal()))
    }

    /// Number of distinct lines, not units. This is the cart badge count.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn unit_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn savings(&self) -> u64 {
        self.lines
            .iter()
            .fold(0u64, |sum, line| sum.saturating_add(line.savings()))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn get(&self, product_id: u32) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == product_id)
    }

    pub fn quantity_of(&self, product_id: u32) -> Option<u32> {
        self.get(product_id).map(|line| line.quantity)
    }

    fn position(&self, product_id: u32) -> Option<usize> {
        self.lines.iter().position(|line| line.id() == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32, price_regular: u64, price_preorder: u64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            category: "Test".to_string(),
            price_regular,
            price_preorder,
            unit: "кг".to_string(),
            image: String::new(),
            discount: 30,
        }
    }

    fn ids(cart: &Cart) -> Vec<(u32, u32)> {
        cart.lines().iter().map(|l| (l.id(), l.quantity)).collect()
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::new();
        assert_eq!(cart.total(), 0);
        assert_eq!(cart.line_count(), 0);
        assert_eq!(cart.unit_count(), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_same_product_merges_in_place() {
        let mut cart = Cart::new();
        let veg = product(1, 800, 480);
        let milk = product(2, 150, 105);

        assert_eq!(cart.add_item(&veg), 1);
        cart.add_item(&milk);
        assert_eq!(cart.add_item(&veg), 2);

        assert_eq!(ids(&cart), vec![(1, 2), (2, 1)]);
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.unit_count(), 3);
        assert_eq!(cart.total(), 480 * 2 + 105);
    }

    #[test]
    fn test_add_keeps_original_fields() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));
        // A later add with different data only bumps the quantity.
        cart.add_item(&product(1, 900, 500));

        let line = cart.get(1).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.product.price_preorder, 480);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));
        cart.add_item(&product(2, 150, 105));
        cart.add_item(&product(1, 800, 480));

        let change = cart.set_quantity(1, 0);

        assert_eq!(change, QuantityChange::Removed { previous: 2 });
        assert_eq!(ids(&cart), vec![(2, 1)]);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total(), 105);
    }

    #[test]
    fn test_set_negative_quantity_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(&product(3, 200, 140));

        assert_eq!(
            cart.set_quantity(3, -5),
            QuantityChange::Removed { previous: 1 }
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_preserves_position() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));
        cart.add_item(&product(2, 150, 105));
        cart.add_item(&product(3, 200, 140));

        let change = cart.set_quantity(2, 4);

        assert_eq!(
            change,
            QuantityChange::Updated {
                previous: 1,
                current: 4
            }
        );
        assert_eq!(ids(&cart), vec![(1, 1), (2, 4), (3, 1)]);
        assert_eq!(cart.total(), 480 + 105 * 4 + 140);
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));
        let before = cart.clone();

        assert_eq!(cart.set_quantity(42, 3), QuantityChange::NotInCart);
        assert_eq!(cart.set_quantity(42, 0), QuantityChange::NotInCart);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_set_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));

        cart.set_quantity(1, i64::MAX);
        assert_eq!(cart.quantity_of(1), Some(u32::MAX));
    }

    #[test]
    fn test_savings() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));
        cart.add_item(&product(1, 800, 480));
        cart.add_item(&product(2, 150, 105));

        assert_eq!(cart.get(1).unwrap().savings(), 640);
        assert_eq!(cart.savings(), 640 + 45);
    }

    #[test]
    fn test_restore_round_trips_valid_cart() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));
        cart.add_item(&product(2, 150, 105));
        cart.set_quantity(2, 3);

        let json = serde_json::to_string(&cart).unwrap();
        let restored: Cart = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, cart);
    }

    #[test]
    fn test_restore_rejects_zero_quantity_line() {
        let mut line = serde_json::to_value(CartLine::new(&product(1, 800, 480))).unwrap();
        line["quantity"] = serde_json::json!(0);
        let json = serde_json::json!({ "lines": [line] });

        let result = serde_json::from_value::<Cart>(json);

        let message = result.unwrap_err().to_string();
        assert!(message.contains(&CartError::ZeroQuantity { id: 1 }.to_string()));
    }

    #[test]
    fn test_restore_rejects_duplicate_ids() {
        let line = serde_json::to_value(CartLine::new(&product(1, 800, 480))).unwrap();
        let json = serde_json::json!({ "lines": [line.clone(), line] });

        let result = serde_json::from_value::<Cart>(json);

        let message = result.unwrap_err().to_string();
        assert!(message.contains(&CartError::DuplicateLine { id: 1 }.to_string()));
    }

    #[test]
    fn test_line_serializes_flat() {
        let mut cart = Cart::new();
        cart.add_item(&product(1, 800, 480));

        let json = serde_json::to_value(&cart.lines()[0]).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["pricePreorder"], 480);
        assert_eq!(json["quantity"], 1);
    }
}
