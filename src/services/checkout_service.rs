use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::cart::{Cart, CartLine};

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Checkout is not available yet")]
    Unavailable,
    #[error("Checkout rejected order {order_id}: {reason}")]
    Rejected { order_id: Uuid, reason: String },
}

/// Snapshot of a cart handed over to checkout.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckoutRequest {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub total: u64,
    pub savings: u64,
}

impl CheckoutRequest {
    pub fn from_cart(cart: &Cart) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            lines: cart.lines().to_vec(),
            total: cart.total(),
            savings: cart.savings(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CheckoutReceipt {
    pub order_id: Uuid,
    pub accepted_at: DateTime<Utc>,
}

/// Receiver of a finished cart. Payment and pickup-point selection live
/// behind this boundary.
pub trait Checkout {
    fn submit(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError>;
}

/// Stand-in for the checkout flow, which does not exist yet.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableCheckout;

impl Checkout for UnavailableCheckout {
    fn submit(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError> {
        tracing::warn!(
            "Checkout requested for order {} ({} lines) but no checkout is configured",
            request.id,
            request.lines.len()
        );
        Err(CheckoutError::Unavailable)
    }
}
