//! Product collection.
//!
//! Records are addressed two ways: by [`ProductId`] (what the shell uses)
//! and by 0-based position in the full on-disk collection. Positions shift
//! under insert and delete and are never translated from a filtered view.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use wardrobe_core::ProductId;

use super::{JsonFile, StoreError};
use crate::models::{Product, ProductFields};

/// Store for the product collection.
#[derive(Debug)]
pub struct ProductStore {
    file: JsonFile<Product>,
}

impl ProductStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Create an empty collection if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn create_if_missing(&self) -> Result<bool, StoreError> {
        let created = self.file.create_if_missing(Vec::new)?;
        if created {
            info!(path = %self.path().display(), "Created product collection");
        }
        Ok(created)
    }

    /// All products in file order.
    ///
    /// Records without an id are stamped and the collection is written back
    /// once, so ids handed out here stay valid for later calls.
    #[must_use]
    pub fn list(&self) -> Vec<Product> {
        let products = self.file.load();
        if !products.iter().any(|p| p.id.is_unassigned()) {
            return products;
        }

        let stamped = self.file.modify(|products| {
            let count = stamp_missing_ids(products);
            info!(count, "Assigned ids to products that had none");
            Ok::<_, StoreError>(products.clone())
        });
        match stamped {
            Ok(products) => products,
            Err(e) => {
                warn!(error = %e, "Could not persist assigned product ids");
                let mut products = products;
                stamp_missing_ids(&mut products);
                products
            }
        }
    }

    /// Products whose name, category or description contains `term`,
    /// ignoring case, in file order. An empty term returns everything.
    ///
    /// Reads through [`list`](Self::list), so the only write it can cause is
    /// the one-time id stamping of legacy records.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<Product> {
        let needle = term.trim().to_lowercase();
        let products = self.list();
        if needle.is_empty() {
            return products;
        }
        products.into_iter().filter(|p| p.matches(&needle)).collect()
    }

    /// Look up one product. Like [`search`](Self::search), reads through
    /// [`list`](Self::list).
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<Product> {
        self.list().into_iter().find(|p| p.id == id)
    }

    /// Append one product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn insert(&self, product: Product) -> Result<Product, StoreError> {
        self.file.modify(|products| {
            stamp_missing_ids(products);
            products.push(product.clone());
            Ok(product)
        })
    }

    /// Append several products in one write. Returns the new collection size.
    ///
    /// Incoming records without an id, or whose id is already taken, get a
    /// fresh one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn insert_many(&self, new_products: Vec<Product>) -> Result<usize, StoreError> {
        self.file.modify(|products| {
            stamp_missing_ids(products);
            let mut taken: HashSet<ProductId> = products.iter().map(|p| p.id).collect();
            for mut product in new_products {
                if product.id.is_unassigned() || !taken.insert(product.id) {
                    product.id = ProductId::generate();
                    taken.insert(product.id);
                }
                products.push(product);
            }
            Ok(products.len())
        })
    }

    /// Update the product at `index` in the full collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OutOfRange` if nothing is at `index`, or a write
    /// error.
    pub fn update_at(
        &self,
        index: usize,
        fields: ProductFields,
        updated_by: &str,
    ) -> Result<Product, StoreError> {
        self.file.modify(|products| {
            let len = products.len();
            let product = products
                .get_mut(index)
                .ok_or(StoreError::OutOfRange { index, len })?;
            product.apply(fields, updated_by);
            let updated = product.clone();
            stamp_missing_ids(products);
            Ok(updated)
        })
    }

    /// Update the product carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no product has `id`, or a write
    /// error.
    pub fn update(
        &self,
        id: ProductId,
        fields: ProductFields,
        updated_by: &str,
    ) -> Result<Product, StoreError> {
        self.file.modify(|products| {
            let product = products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(StoreError::NotFound(id))?;
            product.apply(fields, updated_by);
            let updated = product.clone();
            stamp_missing_ids(products);
            Ok(updated)
        })
    }

    /// Remove the product at `index` in the full collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::OutOfRange` if nothing is at `index`, or a write
    /// error.
    pub fn delete_at(&self, index: usize) -> Result<Product, StoreError> {
        self.file.modify(|products| {
            if index >= products.len() {
                return Err(StoreError::OutOfRange {
                    index,
                    len: products.len(),
                });
            }
            let removed = products.remove(index);
            stamp_missing_ids(products);
            Ok(removed)
        })
    }

    /// Remove the product carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no product has `id`, or a write
    /// error.
    pub fn delete(&self, id: ProductId) -> Result<Product, StoreError> {
        self.file.modify(|products| {
            let index = products
                .iter()
                .position(|p| p.id == id)
                .ok_or(StoreError::NotFound(id))?;
            let removed = products.remove(index);
            stamp_missing_ids(products);
            Ok(removed)
        })
    }

    /// Replace the whole collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn save_all(&self, products: &[Product]) -> Result<(), StoreError> {
        self.file.save(products)
    }
}

/// Give every unassigned record a fresh id. Returns how many were stamped.
fn stamp_missing_ids(products: &mut [Product]) -> usize {
    let mut stamped = 0;
    for product in products.iter_mut().filter(|p| p.id.is_unassigned()) {
        product.id = ProductId::generate();
        stamped += 1;
    }
    stamped
}
