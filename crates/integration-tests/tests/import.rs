//! Integration tests for JSON import.

#![allow(clippy::unwrap_used)]

use std::fs;

use wardrobe_integration_tests::{TestContext, draft};
use wardrobe_inventory::InventoryError;
use wardrobe_inventory::store::StoreError;

#[test]
fn test_import_appends_valid_and_reports_skipped() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();
    catalog
        .create(&admin, &draft("Áo thun", "Áo", "150000", "10"))
        .unwrap();

    let file = ctx.dir().join("products_load.json");
    fs::write(
        &file,
        r#"[
  {"name": "Váy midi", "category": "Váy", "price": 420000, "quantity": 6, "description": "Hoa nhí"},
  {"name": "Quần tây", "category": "Quần", "price": "abc", "quantity": 2},
  {"name": "Áo polo", "category": "Áo", "price": "199000", "quantity": "12", "brand": "Uniqlo"},
  42
]"#,
    )
    .unwrap();

    let report = catalog.import_file(&admin, &file).unwrap();
    assert_eq!(report.imported, 2);
    assert_eq!(report.total, 3);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.skipped[0].0, 2);
    assert!(report.skipped[0].1.contains("price"));
    assert_eq!(report.skipped[1].0, 4);

    let names: Vec<_> = catalog.list(&admin).into_iter().map(|p| p.name).collect();
    assert_eq!(names, ["Áo thun", "Váy midi", "Áo polo"]);
    let polo = &catalog.search(&admin, "polo")[0];
    assert_eq!(polo.brand.as_deref(), Some("Uniqlo"));
    assert_eq!(polo.quantity, 12);
}

#[test]
fn test_import_all_invalid_writes_nothing() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let path = ctx.dir().join("products.json");
    let before = fs::read(&path).unwrap();

    let file = ctx.dir().join("bad_entries.json");
    fs::write(&file, r#"[{"name": ""}, null]"#).unwrap();

    let report = ctx.inventory.catalog().import_file(&admin, &file).unwrap();
    assert_eq!(report.imported, 0);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_import_unreadable_file_is_an_error() {
    let ctx = TestContext::new();
    let admin = ctx.admin();
    let catalog = ctx.inventory.catalog();

    assert!(matches!(
        catalog.import_file(&admin, &ctx.dir().join("absent.json")),
        Err(InventoryError::Storage(StoreError::Io { .. }))
    ));

    let garbage = ctx.dir().join("garbage.json");
    fs::write(&garbage, "[{").unwrap();
    assert!(matches!(
        catalog.import_file(&admin, &garbage),
        Err(InventoryError::Storage(StoreError::Serialization(_)))
    ));
}
