//! Integration tests for default accounts, login and registration.

#![allow(clippy::unwrap_used)]

use std::fs;

use secrecy::SecretString;
use serde_json::Value;
use wardrobe_core::{Role, hash_password};
use wardrobe_integration_tests::TestContext;
use wardrobe_inventory::{InventoryError, ValidationError};

fn secret(s: &str) -> SecretString {
    SecretString::from(s)
}

#[test]
fn test_hash_password_is_deterministic() {
    assert_eq!(hash_password("admin123"), hash_password("admin123"));
    assert_ne!(hash_password("admin123"), hash_password("user123"));
}

#[test]
fn test_default_accounts() {
    let ctx = TestContext::new();
    let auth = ctx.inventory.auth();

    let admin = auth.authenticate("admin", &secret("admin123")).unwrap();
    assert_eq!(admin.role, Role::Admin);
    let user = auth.authenticate("user", &secret("user123")).unwrap();
    assert_eq!(user.role, Role::User);
    assert!(auth.authenticate("admin", &secret("wrong")).is_none());
    assert!(auth.authenticate("Admin", &secret("admin123")).is_none());
}

#[test]
fn test_accounts_file_layout() {
    let ctx = TestContext::new();
    let text = fs::read_to_string(ctx.dir().join("users.json")).unwrap();
    let accounts: Vec<Value> = serde_json::from_str(&text).unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["username"], "admin");
    assert_eq!(accounts[0]["role"], "admin");
    assert_eq!(
        accounts[0]["password"],
        "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9"
    );
    assert_eq!(accounts[1]["role"], "user");
    assert!(accounts[1]["created_at"].is_string());

    let products = fs::read_to_string(ctx.dir().join("products.json")).unwrap();
    assert_eq!(serde_json::from_str::<Vec<Value>>(&products).unwrap().len(), 0);
}

#[test]
fn test_initialize_leaves_existing_file_alone() {
    let ctx = TestContext::new();
    let path = ctx.dir().join("users.json");
    fs::write(&path, "not json").unwrap();

    assert!(!ctx.inventory.initialize().unwrap());
    assert_eq!(fs::read_to_string(&path).unwrap(), "not json");
    // An unreadable collection reads as empty.
    assert!(
        ctx.inventory
            .auth()
            .authenticate("admin", &secret("admin123"))
            .is_none()
    );
}

#[test]
fn test_register_then_login() {
    let ctx = TestContext::new();
    let auth = ctx.inventory.auth();

    auth.register("alice", &secret("secret1"), &secret("secret1"))
        .unwrap();
    let session = ctx.login("alice", "secret1");
    assert_eq!(session.role(), Role::User);

    assert!(matches!(
        auth.register("alice", &secret("secret1"), &secret("secret1")),
        Err(InventoryError::DuplicateUsername(_))
    ));
}

#[test]
fn test_register_rejections_write_nothing() {
    let ctx = TestContext::new();
    let path = ctx.dir().join("users.json");
    let before = fs::read(&path).unwrap();
    let auth = ctx.inventory.auth();

    assert!(matches!(
        auth.register("bob", &secret("ab"), &secret("ab")),
        Err(InventoryError::Validation(ValidationError::PasswordTooShort { .. }))
    ));
    assert!(matches!(
        auth.register("bob", &secret("ab1"), &secret("ab2")),
        Err(InventoryError::Validation(ValidationError::PasswordMismatch))
    ));
    assert!(matches!(
        auth.register("bob", &secret(""), &secret("")),
        Err(InventoryError::Validation(ValidationError::MissingField(_)))
    ));
    assert!(matches!(
        auth.register("admin", &secret("secret1"), &secret("secret1")),
        Err(InventoryError::DuplicateUsername(_))
    ));
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn test_login_errors() {
    let ctx = TestContext::new();
    let auth = ctx.inventory.auth();
    assert!(matches!(
        auth.login("admin", &secret("nope")),
        Err(InventoryError::Authentication)
    ));
    assert!(matches!(
        auth.login("", &secret("admin123")),
        Err(InventoryError::Validation(_))
    ));
}
