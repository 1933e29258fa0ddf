use std::io::Write;

use preorder_cart::catalog::{
    BuiltinCatalog, Catalog, CatalogError, CatalogProvider, JsonFileCatalog,
};
use preorder_cart::models::product::Product;
use tempfile::NamedTempFile;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_builtin_catalog_loads() {
    let catalog = tokio_test::block_on(BuiltinCatalog::new().load()).unwrap();

    assert_eq!(catalog.len(), 4);
    let meat = catalog.find(4).unwrap();
    assert_eq!(meat.price_preorder, 840);
    assert_eq!(meat.price_regular, 1200);
    assert!(catalog.find(5).is_none());
}

#[tokio::test]
async fn test_json_catalog_matches_builtin() {
    let json = serde_json::to_string_pretty(&BuiltinCatalog::products()).unwrap();
    let file = write_catalog(&json);

    let catalog = JsonFileCatalog::new(file.path()).load().await.unwrap();

    assert_eq!(catalog.products(), BuiltinCatalog::products().as_slice());
}

#[tokio::test]
async fn test_json_catalog_camel_case_fields() {
    let file = write_catalog(
        r#"[
            {"id": 7, "name": "Мёд", "category": "Пасека", "priceRegular": 900,
             "pricePreorder": 630, "unit": "кг", "discount": 30}
        ]"#,
    );

    let catalog = JsonFileCatalog::new(file.path()).load().await.unwrap();
    let honey = catalog.find(7).unwrap();

    assert_eq!(honey.price_preorder, 630);
    assert!(honey.image.is_empty());
}

#[tokio::test]
async fn test_missing_file() {
    let result = JsonFileCatalog::new("/nonexistent/catalog.json").load().await;
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[tokio::test]
async fn test_malformed_json() {
    let file = write_catalog("{ not json");
    let result = JsonFileCatalog::new(file.path()).load().await;
    assert!(matches!(result, Err(CatalogError::Parse { .. })));
}

#[test]
fn test_duplicate_ids_rejected() {
    let mut products = BuiltinCatalog::products();
    products[1].id = products[0].id;

    assert!(matches!(
        Catalog::new(products),
        Err(CatalogError::DuplicateId { id: 1 })
    ));
}

#[test]
fn test_invalid_product_rejected() {
    let mut products = BuiltinCatalog::products();
    products[2] = Product {
        price_preorder: 500,
        ..products[2].clone()
    };

    assert!(matches!(
        Catalog::new(products),
        Err(CatalogError::InvalidProduct(_))
    ));
}

#[test]
fn test_empty_catalog_rejected() {
    assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
}
