//! Product catalog service.
//!
//! Every call takes the caller's [`Session`]. Reads are open to any role;
//! mutations check for the admin role before touching the store.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, instrument, warn};
use wardrobe_core::{ProductId, Timestamp};

use super::auth::Session;
use crate::error::InventoryError;
use crate::models::{Product, ProductDraft, ProductFields};
use crate::store::{ProductStore, StoreError, strip_bom};

/// Result of a JSON import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Records appended.
    pub imported: usize,
    /// Rejected entries as (1-based position in the file, reason).
    pub skipped: Vec<(usize, String)>,
    /// Collection size after the import.
    pub total: usize,
}

/// Product catalog service.
pub struct Catalog<'a> {
    products: &'a ProductStore,
}

impl<'a> Catalog<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(products: &'a ProductStore) -> Self {
        Self { products }
    }

    /// All products in file order.
    #[must_use]
    pub fn list(&self, _session: &Session) -> Vec<Product> {
        self.products.list()
    }

    /// Case-insensitive search over name, category and description.
    #[must_use]
    pub fn search(&self, _session: &Session, term: &str) -> Vec<Product> {
        self.products.search(term)
    }

    /// One product by id.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::NotFound` if no product has `id`.
    pub fn get(&self, _session: &Session, id: ProductId) -> Result<Product, InventoryError> {
        self.products.get(id).ok_or(InventoryError::NotFound(id))
    }

    /// Add a product.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission` for non-admins,
    /// `InventoryError::Validation` for bad input, or a storage error.
    #[instrument(skip_all, fields(user = %session.username()))]
    pub fn create(
        &self,
        session: &Session,
        draft: &ProductDraft,
    ) -> Result<Product, InventoryError> {
        session.require_admin("create product")?;
        let fields = draft.validate()?;
        let product = self
            .products
            .insert(Product::new(fields, session.username()))?;
        info!(id = %product.id, name = %product.name, "Created product");
        Ok(product)
    }

    /// Replace the editable fields of the product carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission`, `InventoryError::Validation`,
    /// `InventoryError::NotFound`, or a storage error.
    #[instrument(skip_all, fields(user = %session.username(), id = %id))]
    pub fn update(
        &self,
        session: &Session,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, InventoryError> {
        session.require_admin("update product")?;
        let fields = draft.validate()?;
        let product = self.products.update(id, fields, session.username())?;
        info!(name = %product.name, "Updated product");
        Ok(product)
    }

    /// Replace the editable fields of the product at `index` (0-based) in
    /// the full collection.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission`, `InventoryError::Validation`,
    /// `InventoryError::OutOfRange`, or a storage error.
    #[instrument(skip_all, fields(user = %session.username(), index = index))]
    pub fn update_at(
        &self,
        session: &Session,
        index: usize,
        draft: &ProductDraft,
    ) -> Result<Product, InventoryError> {
        session.require_admin("update product")?;
        let fields = draft.validate()?;
        let product = self.products.update_at(index, fields, session.username())?;
        info!(id = %product.id, "Updated product");
        Ok(product)
    }

    /// Remove the product carrying `id`.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission`, `InventoryError::NotFound`, or
    /// a storage error.
    #[instrument(skip_all, fields(user = %session.username(), id = %id))]
    pub fn delete(&self, session: &Session, id: ProductId) -> Result<Product, InventoryError> {
        session.require_admin("delete product")?;
        let product = self.products.delete(id)?;
        info!(name = %product.name, "Deleted product");
        Ok(product)
    }

    /// Remove the product at `index` (0-based) in the full collection.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission`, `InventoryError::OutOfRange`,
    /// or a storage error.
    #[instrument(skip_all, fields(user = %session.username(), index = index))]
    pub fn delete_at(&self, session: &Session, index: usize) -> Result<Product, InventoryError> {
        session.require_admin("delete product")?;
        let product = self.products.delete_at(index)?;
        info!(id = %product.id, "Deleted product");
        Ok(product)
    }

    /// Append the products listed in an external JSON file.
    ///
    /// The file must hold a JSON array of objects. Each entry is validated
    /// like [`create`](Self::create); `price` and `quantity` may be numbers or
    /// numeric strings. Valid entries are appended in one write, keeping any
    /// extra keys and stamping id, `created_by` and `created_at` when absent.
    /// Invalid entries are skipped and listed in the report.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission` for non-admins, and
    /// `InventoryError::Storage` if the file is missing, unreadable or not a
    /// JSON array, or if the write fails.
    #[instrument(skip_all, fields(user = %session.username(), path = %path.display()))]
    pub fn import_file(
        &self,
        session: &Session,
        path: &Path,
    ) -> Result<ImportReport, InventoryError> {
        session.require_admin("import products")?;

        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let entries: Vec<Value> =
            serde_json::from_slice(strip_bom(&bytes)).map_err(StoreError::from)?;

        let mut accepted = Vec::with_capacity(entries.len());
        let mut skipped = Vec::new();
        for (i, entry) in entries.into_iter().enumerate() {
            match import_entry(entry, session.username()) {
                Ok(product) => accepted.push(product),
                Err(reason) => {
                    warn!(position = i + 1, %reason, "Skipped import entry");
                    skipped.push((i + 1, reason));
                }
            }
        }

        let imported = accepted.len();
        let total = if accepted.is_empty() {
            self.products.list().len()
        } else {
            self.products.insert_many(accepted)?
        };

        info!(imported, skipped = skipped.len(), total, "Imported products");
        Ok(ImportReport {
            imported,
            skipped,
            total,
        })
    }
}

/// Validate one import entry and turn it into a product.
fn import_entry(entry: Value, actor: &str) -> Result<Product, String> {
    let Value::Object(mut object) = entry else {
        return Err("entry is not a JSON object".to_string());
    };

    let draft = ProductDraft {
        name: field_text(&object, "name"),
        category: field_text(&object, "category"),
        price: field_text(&object, "price"),
        quantity: field_text(&object, "quantity"),
        description: field_text(&object, "description"),
    };
    let fields = draft.validate().map_err(|e| e.to_string())?;
    normalize(&mut object, &fields);

    let mut product: Product =
        serde_json::from_value(Value::Object(object)).map_err(|e| e.to_string())?;
    if product.created_by.is_empty() {
        actor.clone_into(&mut product.created_by);
    }
    if product.created_at.is_empty() {
        product.created_at = Timestamp::now();
    }
    Ok(product)
}

/// Text form of a field as a form would have shown it. Missing and null
/// read as empty.
fn field_text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Write validated values back so the record deserializes with proper types.
fn normalize(object: &mut Map<String, Value>, fields: &ProductFields) {
    object.insert("name".to_string(), Value::from(fields.name.clone()));
    object.insert("category".to_string(), Value::from(fields.category.clone()));
    object.insert("price".to_string(), Value::from(fields.price.amount()));
    object.insert("quantity".to_string(), Value::from(fields.quantity));
    object.insert(
        "description".to_string(),
        Value::from(fields.description.clone()),
    );
}
