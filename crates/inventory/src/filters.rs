//! Display helpers for product listings.

use wardrobe_core::{Price, Role};

use crate::models::Product;

/// Longest description shown in a listing, in characters.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

/// One row of a product listing, every column already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRow {
    /// 1-based position in the current view.
    pub position: usize,
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: String,
    pub quantity: String,
    pub description: String,
}

/// Format a price as whole dong with thousands separators.
///
/// `150000.0` becomes `"150,000 VNĐ"`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_vnd(price: Price) -> String {
    // Prices read from disk are unchecked; the cast saturates, sending NaN and
    // negatives to 0.
    let amount = price.amount().round() as u64;
    format!("{} VNĐ", group_thousands(amount))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Shorten a description for a listing.
///
/// Text longer than [`DESCRIPTION_PREVIEW_CHARS`] characters is cut there
/// and gets `"..."` appended.
#[must_use]
pub fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", text.get(..cut).unwrap_or(text)),
        None => text.to_string(),
    }
}

/// Human-readable role name for the session banner.
#[must_use]
pub const fn role_label(role: Role) -> &'static str {
    match role {
        Role::Admin => "Administrator",
        Role::User => "User",
    }
}

/// Build the listing row for `product` shown at 1-based `position`.
#[must_use]
pub fn product_row(position: usize, product: &Product) -> ProductRow {
    ProductRow {
        position,
        id: product.id.to_string(),
        name: product.name.clone(),
        category: product.category.clone(),
        price: format_vnd(product.price),
        quantity: product.quantity.to_string(),
        description: truncate_description(&product.description),
    }
}
