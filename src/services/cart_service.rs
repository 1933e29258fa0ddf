use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::{
    catalog::Catalog,
    models::cart::{Cart, QuantityChange},
    services::checkout_service::{Checkout, CheckoutError, CheckoutReceipt, CheckoutRequest},
};

#[derive(Error, Debug)]
pub enum CartServiceError {
    #[error("Product {id} is not in the catalog")]
    ProductNotFound { id: u32 },

    #[error("Cart is empty")]
    EmptyCart,

    #[error("Checkout failed: {0}")]
    CheckoutFailed(#[from] CheckoutError),
}

/// Figures shown next to the cart after every change
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct CartSummary {
    pub line_count: usize,
    pub unit_count: u64,
    pub total: u64,
    pub savings: u64,
}

/// One shopping session: a read-only catalog and the cart being filled
/// from it.
pub struct CartService {
    catalog: Catalog,
    cart: Cart,
}

impl CartService {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
        }
    }

    /// Add one unit of a catalog product, returning the line's new quantity.
    pub fn add_product(&mut self, product_id: u32) -> Result<u32, CartServiceError> {
        let product = self
            .catalog
            .find(product_id)
            .ok_or(CartServiceError::ProductNotFound { id: product_id })?;

        let quantity = self.cart.add_item(product);
        info!(
            "Added '{}' to cart (quantity {}, {} lines)",
            product.name,
            quantity,
            self.cart.line_count()
        );
        Ok(quantity)
    }

    pub fn increment(&mut self, product_id: u32) -> QuantityChange {
        match self.cart.quantity_of(product_id) {
            Some(quantity) => self.set_quantity(product_id, i64::from(quantity) + 1),
            None => self.set_quantity(product_id, 1),
        }
    }

    /// Decrementing a line at quantity 1 removes it.
    pub fn decrement(&mut self, product_id: u32) -> QuantityChange {
        match self.cart.quantity_of(product_id) {
            Some(quantity) => self.set_quantity(product_id, i64::from(quantity) - 1),
            None => self.set_quantity(product_id, 0),
        }
    }

    pub fn set_quantity(&mut self, product_id: u32, quantity: i64) -> QuantityChange {
        let change = self.cart.set_quantity(product_id, quantity);
        match change {
            QuantityChange::Updated { previous, current } => {
                info!(
                    "Quantity of product {} changed {} -> {}",
                    product_id, previous, current
                );
            }
            QuantityChange::Removed { previous } => {
                info!(
                    "Removed product {} from cart (had quantity {})",
                    product_id, previous
                );
            }
            QuantityChange::NotInCart => {
                debug!(
                    "Ignoring quantity {} for product {}: not in cart",
                    quantity, product_id
                );
            }
        }
        change
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_count: self.cart.line_count(),
            unit_count: self.cart.unit_count(),
            total: self.cart.total(),
            savings: self.cart.savings(),
        }
    }

    /// Hand the current cart to `checkout`. The cart is left as is.
    pub fn checkout(&self, checkout: &dyn Checkout) -> Result<CheckoutReceipt, CartServiceError> {
        if self.cart.is_empty() {
            return Err(CartServiceError::EmptyCart);
        }

        let request = CheckoutRequest::from_cart(&self.cart);
        info!(
            "Submitting order {} with {} lines, total {}",
            request.id,
            request.lines.len(),
            request.total
        );

        checkout.submit(&request).map_err(|e| {
            error!("Checkout of order {} failed: {}", request.id, e);
            CartServiceError::CheckoutFailed(e)
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}
