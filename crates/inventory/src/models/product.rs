//! Product domain types.
//!
//! [`ProductDraft`] is what a form hands over: every field as text.
//! [`ProductDraft::validate`] turns it into [`ProductFields`], the parsed
//! values that [`Product::new`] and [`Product::apply`] accept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wardrobe_core::{Price, ProductId, Timestamp};

use crate::error::ValidationError;

/// A stored product.
///
/// Keys this type does not know about are kept in [`extra`](Self::extra)
/// and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Surrogate key. Records written before ids existed read as
    /// [`ProductId::unassigned`] until the store stamps them.
    #[serde(default = "ProductId::unassigned")]
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: Price,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
    /// Set on records produced by the supplier feed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Unrecognized keys, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Build a new product from validated fields with a fresh id.
    #[must_use]
    pub fn new(fields: ProductFields, created_by: &str) -> Self {
        Self {
            id: ProductId::generate(),
            name: fields.name,
            category: fields.category,
            price: fields.price,
            quantity: fields.quantity,
            description: fields.description,
            created_at: Timestamp::now(),
            created_by: created_by.to_owned(),
            updated_at: None,
            updated_by: None,
            source: None,
            brand: None,
            color: None,
            sku: None,
            extra: Map::new(),
        }
    }

    /// Overwrite the editable fields and record who changed them.
    ///
    /// Id, creation provenance, feed attributes and unknown keys stay as they
    /// were.
    pub fn apply(&mut self, fields: ProductFields, updated_by: &str) {
        self.name = fields.name;
        self.category = fields.category;
        self.price = fields.price;
        self.quantity = fields.quantity;
        self.description = fields.description;
        self.updated_at = Some(Timestamp::now());
        self.updated_by = Some(updated_by.to_owned());
    }

    /// Whether name, category or description contains `needle`.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        [&self.name, &self.category, &self.description]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Unvalidated product input, one string per form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
}

/// Validated product values.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: String,
    pub category: String,
    pub price: Price,
    pub quantity: u32,
    pub description: String,
}

impl ProductDraft {
    /// Check and parse the draft.
    ///
    /// All fields are trimmed. Name, category, price and quantity must be
    /// non-empty; price must parse as a finite non-negative number and
    /// quantity as a non-negative integer.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        let name = required(&self.name, "name")?;
        let category = required(&self.category, "category")?;
        let price_text = required(&self.price, "price")?;
        let quantity_text = required(&self.quantity, "quantity")?;

        let amount: f64 = price_text
            .parse()
            .map_err(|_| ValidationError::NotANumber {
                field: "price",
                value: price_text.to_owned(),
            })?;
        let quantity: i64 = quantity_text
            .parse()
            .map_err(|_| ValidationError::NotANumber {
                field: "quantity",
                value: quantity_text.to_owned(),
            })?;

        let price = Price::new(amount).ok_or(ValidationError::Negative("price"))?;
        if quantity < 0 {
            return Err(ValidationError::Negative("quantity"));
        }
        let quantity = u32::try_from(quantity).map_err(|_| ValidationError::NotANumber {
            field: "quantity",
            value: quantity_text.to_owned(),
        })?;

        Ok(ProductFields {
            name: name.to_owned(),
            category: category.to_owned(),
            price,
            quantity,
            description: self.description.trim().to_owned(),
        })
    }
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed)
}
