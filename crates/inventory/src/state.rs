//! Inventory handle shared by every caller.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::InventoryConfig;
use crate::error::InventoryError;
use crate::services::{AuthService, BulkFetcher, Catalog, FetchOutcome};
use crate::store::{AccountStore, ProductStore};

/// Both stores plus the configuration they were opened with.
///
/// This struct is cheaply cloneable via `Arc`. Clones share the stores and
/// therefore their write guards.
#[derive(Debug, Clone)]
pub struct Inventory {
    inner: Arc<InventoryInner>,
}

#[derive(Debug)]
struct InventoryInner {
    config: InventoryConfig,
    accounts: AccountStore,
    products: Arc<ProductStore>,
}

impl Inventory {
    /// Open the collections named by `config`. Nothing is read or written
    /// yet.
    #[must_use]
    pub fn open(config: InventoryConfig) -> Self {
        let accounts = AccountStore::new(config.accounts_path());
        let products = Arc::new(ProductStore::new(config.products_path()));
        Self {
            inner: Arc::new(InventoryInner {
                config,
                accounts,
                products,
            }),
        }
    }

    /// Create missing collections, seeding the default accounts.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Storage` if a write fails.
    pub fn initialize(&self) -> Result<bool, InventoryError> {
        self.auth().initialize_defaults()
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &InventoryConfig {
        &self.inner.config
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn products(&self) -> &ProductStore {
        &self.inner.products
    }

    /// Authentication service over the account store.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.accounts, &self.inner.products)
    }

    /// Catalog service over the product store.
    #[must_use]
    pub fn catalog(&self) -> Catalog<'_> {
        Catalog::new(&self.inner.products)
    }

    /// A supplier fetcher using the configured delay, and the receiver its
    /// outcomes arrive on.
    #[must_use]
    pub fn bulk_fetcher(&self) -> (BulkFetcher, UnboundedReceiver<FetchOutcome>) {
        BulkFetcher::new(Arc::clone(&self.inner.products), self.inner.config.fetch_delay)
    }
}
