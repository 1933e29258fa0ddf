use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::catalog::table::{Catalog, CatalogError};
use crate::models::product::Product;

/// Source of the product catalog the cart is filled from
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    fn name(&self) -> String;
    async fn load(&self) -> Result<Catalog, CatalogError>;
}

/// The four products listed on the landing page.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    pub fn products() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Свежие овощи".to_string(),
                category: "Овощи".to_string(),
                price_regular: 800,
                price_preorder: 480,
                unit: "кг".to_string(),
                image: format!("{}/f6c5de3c-c2fc-4cea-a704-fe80346950f9.jpg", IMAGE_BASE),
                discount: 40,
            },
            Product {
                id: 2,
                name: "Фермерское молоко".to_string(),
                category: "Молочка".to_string(),
                price_regular: 150,
                price_preorder: 105,
                unit: "л".to_string(),
                image: format!("{}/25b0ee6e-7233-4cb6-9999-607d3bff26a4.jpg", IMAGE_BASE),
                discount: 30,
            },
            Product {
                id: 3,
                name: "Домашние яйца".to_string(),
                category: "Яйца".to_string(),
                price_regular: 200,
                price_preorder: 140,
                unit: "10 шт".to_string(),
                image: format!("{}/25b0ee6e-7233-4cb6-9999-607d3bff26a4.jpg", IMAGE_BASE),
                discount: 30,
            },
            Product {
                id: 4,
                name: "Фермерское мясо".to_string(),
                category: "Мясо".to_string(),
                price_regular: 1200,
                price_preorder: 840,
                unit: "кг".to_string(),
                image: format!("{}/3a2ff569-7be7-4724-aea3-1746cff136b0.jpg", IMAGE_BASE),
                discount: 30,
            },
        ]
    }
}

const IMAGE_BASE: &str =
    "https://cdn.poehali.dev/projects/fa62f71d-50ca-42ff-abc6-043c2f78f158/files";

#[async_trait]
impl CatalogProvider for BuiltinCatalog {
    fn name(&self) -> String {
        "built-in".to_string()
    }

    async fn load(&self) -> Result<Catalog, CatalogError> {
        Catalog::new(Self::products())
    }
}

/// Catalog read from a JSON array of products.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Catalog, CatalogError> {
        let path = self.name();
        debug!("Reading catalog from {}", path);

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;

        let products: Vec<Product> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: path.clone(),
                source,
            })?;

        let catalog = Catalog::new(products)?;
        info!("Loaded {} products from {}", catalog.len(), path);
        Ok(catalog)
    }
}
