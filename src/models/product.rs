use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// A catalog entry. Prices are whole currency units.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_prices"))]
pub struct Product {
    pub id: u32,

    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[validate(length(min = 1, max = 100, message = "Category must be 1-100 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub category: String,

    pub price_regular: u64,

    pub price_preorder: u64,

    #[validate(length(min = 1, max = 32, message = "Unit must be 1-32 characters"))]
    pub unit: String,

    #[serde(default)]
    pub image: String,

    #[validate(range(max = 100, message = "Discount must be between 0 and 100 percent"))]
    pub discount: u8,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

fn validate_prices(product: &Product) -> Result<(), ValidationError> {
    if product.price_preorder > product.price_regular {
        return Err(ValidationError::new("preorder_price_above_regular"));
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    #[error("Invalid product {id}: {source}")]
    ValidationError {
        id: u32,
        #[source]
        source: validator::ValidationErrors,
    },
}

impl Product {
    /// Checks a catalog entry before it is accepted into a catalog.
    /// The cart itself never calls this.
    pub fn check(&self) -> Result<(), ProductError> {
        self.validate().map_err(|source| ProductError::ValidationError {
            id: self.id,
            source,
        })
    }

    pub fn saving_per_unit(&self) -> u64 {
        self.price_regular.saturating_sub(self.price_preorder)
    }
}
