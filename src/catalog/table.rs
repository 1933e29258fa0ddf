use std::collections::HashSet;

use thiserror::Error;

use crate::models::product::{Product, ProductError};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog contains no products")]
    Empty,
    #[error("Duplicate product id {id} in catalog")]
    DuplicateId { id: u32 },
    #[error(transparent)]
    InvalidProduct(#[from] ProductError),
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-only product table for one session, in catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        if products.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            product.check()?;
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId { id: product.id });
            }
        }

        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn find(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
