//! Integration tests for Wardrobe.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p wardrobe-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `auth_flow` - Default accounts, login and registration
//! - `catalog` - Product editing, search and on-disk format
//! - `bulk_fetch` - Background supplier fetch and its completion channel
//! - `import` - JSON import
//!
//! Every test gets its own temporary data directory through [`TestContext`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;
use tempfile::TempDir;
use wardrobe_inventory::models::ProductDraft;
use wardrobe_inventory::services::Session;
use wardrobe_inventory::{Inventory, InventoryConfig};

/// An initialized inventory in a throwaway directory.
pub struct TestContext {
    dir: TempDir,
    pub inventory: Inventory,
}

impl TestContext {
    /// Create the data directory and the default accounts. Supplier fetches
    /// run without delay.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the data files cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut config = InventoryConfig::for_data_dir(dir.path());
        config.fetch_delay = Duration::ZERO;
        let inventory = Inventory::open(config);
        inventory.initialize().expect("Failed to initialize inventory");
        Self { dir, inventory }
    }

    /// The data directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Log in, panicking on failure.
    ///
    /// # Panics
    ///
    /// Panics if the credentials are rejected.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn login(&self, username: &str, password: &str) -> Session {
        self.inventory
            .auth()
            .login(username, &SecretString::from(password))
            .expect("Login failed")
    }

    /// Session for the seeded admin.
    #[must_use]
    pub fn admin(&self) -> Session {
        self.login("admin", "admin123")
    }

    /// Session for the seeded user.
    #[must_use]
    pub fn user(&self) -> Session {
        self.login("user", "user123")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Form input for a product.
#[must_use]
pub fn draft(name: &str, category: &str, price: &str, quantity: &str) -> ProductDraft {
    ProductDraft {
        name: name.to_string(),
        category: category.to_string(),
        price: price.to_string(),
        quantity: quantity.to_string(),
        description: String::new(),
    }
}
