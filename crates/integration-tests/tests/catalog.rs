//! Integration tests for product editing, search and the on-disk format.

#![allow(clippy::unwrap_used)]

use std::fs;

use serde_json::Value;
use wardrobe_integration_tests::{TestContext, draft};
use wardrobe_inventory::InventoryError;

#[test]
fn test_create_appends_exactly_one() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();

    catalog
        .create(&admin, &draft("Áo thun", "Áo", "150000", "10"))
        .unwrap();

    let products = catalog.list(&admin);
    assert_eq!(products.len(), 1);
    assert!((products[0].price.amount() - 150_000.0).abs() < f64::EPSILON);
    assert_eq!(products[0].quantity, 10);
    assert_eq!(products[0].created_by, "admin");
}

#[test]
fn test_invalid_create_leaves_list_unchanged() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();
    catalog.create(&admin, &draft("a", "b", "1", "1")).unwrap();

    for bad in [
        draft("Áo thun", "Áo", "abc", "10"),
        draft("Áo thun", "Áo", "-5", "10"),
        draft("Áo thun", "Áo", "100", "ten"),
        draft("", "Áo", "100", "1"),
    ] {
        assert!(matches!(
            catalog.create(&admin, &bad),
            Err(InventoryError::Validation(_))
        ));
    }
    assert_eq!(catalog.list(&admin).len(), 1);
}

#[test]
fn test_update_at_out_of_range_keeps_file_bytes() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();
    catalog.create(&admin, &draft("a", "b", "1", "1")).unwrap();
    let path = ctx.dir().join("products.json");
    let before = fs::read(&path).unwrap();

    assert!(matches!(
        catalog.update_at(&admin, 1, &draft("c", "d", "2", "2")),
        Err(InventoryError::OutOfRange { index: 1, len: 1 })
    ));
    assert!(matches!(
        catalog.delete_at(&admin, 7),
        Err(InventoryError::OutOfRange { .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_update_at_merges_fields() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();
    let original = catalog.create(&admin, &draft("a", "b", "1", "1")).unwrap();

    let updated = catalog
        .update_at(&admin, 0, &draft("Quần jean", "Quần", "350000", "4"))
        .unwrap();
    assert_eq!(updated.id, original.id);
    assert_eq!(updated.created_at, original.created_at);
    assert_eq!(updated.name, "Quần jean");
    assert_eq!(updated.updated_by.as_deref(), Some("admin"));
}

#[test]
fn test_search_semantics() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();
    catalog.create(&admin, &draft("Áo thun", "Áo", "1", "1")).unwrap();
    catalog.create(&admin, &draft("Quần jean", "Quần", "1", "1")).unwrap();
    catalog.create(&admin, &draft("Áo khoác", "Áo", "1", "1")).unwrap();

    let hits: Vec<_> = catalog
        .search(&admin, "áo")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(hits, ["Áo thun", "Áo khoác"]);

    let all: Vec<_> = catalog
        .search(&admin, "")
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(all, ["Áo thun", "Quần jean", "Áo khoác"]);
}

#[test]
fn test_user_role_cannot_write() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let user = ctx.user();
    let catalog = ctx.inventory.catalog();
    let product = catalog.create(&admin, &draft("a", "b", "1", "1")).unwrap();
    let path = ctx.dir().join("products.json");
    let before = fs::read(&path).unwrap();

    assert!(matches!(
        catalog.create(&user, &draft("x", "y", "1", "1")),
        Err(InventoryError::Permission { .. })
    ));
    assert!(matches!(
        catalog.update(&user, product.id, &draft("x", "y", "1", "1")),
        Err(InventoryError::Permission { .. })
    ));
    assert!(matches!(
        catalog.delete(&user, product.id),
        Err(InventoryError::Permission { .. })
    ));
    assert!(matches!(
        catalog.import_file(&user, &ctx.dir().join("missing.json")),
        Err(InventoryError::Permission { .. })
    ));
    assert_eq!(fs::read(&path).unwrap(), before);

    assert_eq!(catalog.search(&user, "a").len(), 1);
    assert_eq!(catalog.get(&user, product.id).unwrap().name, "a");
}

#[test]
fn test_unknown_keys_survive_rewrite() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let path = ctx.dir().join("products.json");
    fs::write(
        &path,
        r#"[
  {
    "name": "Áo thun",
    "category": "Áo",
    "price": 150000,
    "quantity": 10,
    "description": "",
    "created_at": "01/02/2024",
    "created_by": "admin",
    "warehouse": {"shelf": "A3"}
  }
]"#,
    )
    .unwrap();

    let catalog = ctx.inventory.catalog();
    let legacy = catalog.list(&admin);
    assert_eq!(legacy.len(), 1);
    catalog.create(&admin, &draft("b", "c", "1", "1")).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let records: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(records[0]["warehouse"]["shelf"], "A3");
    assert_eq!(records[0]["created_at"], "01/02/2024");
    assert_eq!(records[0]["id"], legacy[0].id.to_string());
    assert!(text.contains("Áo thun"));
}

#[test]
fn test_undecodable_collection_is_not_overwritten() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let path = ctx.dir().join("products.json");
    fs::write(
        &path,
        r#"[
  {"name": "Áo A", "category": "Áo", "price": 150000, "quantity": 3},
  {"name": "Áo B", "category": "Áo", "price": "120000", "quantity": 2}
]"#,
    )
    .unwrap();
    let before = fs::read(&path).unwrap();

    let catalog = ctx.inventory.catalog();
    assert!(catalog.list(&admin).is_empty());
    assert!(matches!(
        catalog.create(&admin, &draft("Áo C", "Áo", "1000", "1")),
        Err(InventoryError::Storage(_))
    ));
    assert!(matches!(
        catalog.delete_at(&admin, 0),
        Err(InventoryError::Storage(_))
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_save_of_loaded_collection_is_equivalent() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let path = ctx.dir().join("products.json");
    fs::write(
        &path,
        r#"[
  {"id": "7f1c2a8e-1d2b-4c3d-9e4f-5a6b7c8d9e0f", "name": "Váy midi", "category": "Váy", "price": 420000.0, "quantity": 6, "description": "", "created_at": "t", "created_by": "admin", "warehouse": "HN-2"}
]"#,
    )
    .unwrap();
    let before: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();

    let products = ctx.inventory.products();
    products.save_all(&ctx.inventory.catalog().list(&admin)).unwrap();

    let after: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(after, before);
}
