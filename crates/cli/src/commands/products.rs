//! Product commands.
//!
//! Each function runs one catalog operation for an already logged-in
//! session and prints the result. The shell reuses them line by line.

use std::path::Path;

use tracing::info;
use wardrobe_inventory::Inventory;
use wardrobe_inventory::models::ProductDraft;
use wardrobe_inventory::services::Session;

use super::{CliError, parse_id};
use crate::output;

/// Print every product.
pub fn list(inventory: &Inventory, session: &Session) {
    output::product_table(&inventory.catalog().list(session));
}

/// Print products matching `term`.
pub fn search(inventory: &Inventory, session: &Session, term: &str) {
    output::product_table(&inventory.catalog().search(session, term));
}

/// Print one product.
///
/// # Errors
///
/// Returns `CliError` if the id is malformed or unknown.
pub fn show(inventory: &Inventory, session: &Session, id: &str) -> Result<(), CliError> {
    let product = inventory.catalog().get(session, parse_id(id)?)?;
    output::product_detail(&product);
    Ok(())
}

/// Add a product.
///
/// # Errors
///
/// Returns `CliError` on permission, validation or write failure.
pub fn add(inventory: &Inventory, session: &Session, draft: &ProductDraft) -> Result<(), CliError> {
    let product = inventory.catalog().create(session, draft)?;
    output::product_changed("Added", &product);
    Ok(())
}

/// Replace a product's fields.
///
/// # Errors
///
/// Returns `CliError` on a bad id, permission, validation or write failure.
pub fn update(
    inventory: &Inventory,
    session: &Session,
    id: &str,
    draft: &ProductDraft,
) -> Result<(), CliError> {
    let product = inventory.catalog().update(session, parse_id(id)?, draft)?;
    output::product_changed("Updated", &product);
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns `CliError` on a bad id, permission or write failure.
pub fn delete(inventory: &Inventory, session: &Session, id: &str) -> Result<(), CliError> {
    let product = inventory.catalog().delete(session, parse_id(id)?)?;
    output::product_changed("Deleted", &product);
    Ok(())
}

/// Run one supplier fetch and wait for it.
///
/// # Errors
///
/// Returns `CliError` if `count` exceeds the fetch limit, on permission
/// failure, a write error reported by the fetch, or if the background task
/// died.
pub async fn generate(
    inventory: &Inventory,
    session: &Session,
    count: usize,
) -> Result<(), CliError> {
    let count = super::check_fetch_count(count)?;
    let (fetcher, mut completions) = inventory.bulk_fetcher();
    let handle = fetcher.spawn(session, count)?;
    // Only the task keeps a sender now, so a dead task closes the channel.
    drop(fetcher);
    info!(count, "Waiting for the supplier feed");

    let outcome = completions.recv().await;
    handle.await?;
    if let Some(outcome) = outcome {
        output::fetch_report(&outcome?);
    }
    Ok(())
}

/// Append products from a JSON file.
///
/// # Errors
///
/// Returns `CliError` on permission failure, an unreadable file, or a write
/// error.
pub fn import(inventory: &Inventory, session: &Session, file: &Path) -> Result<(), CliError> {
    let report = inventory.catalog().import_file(session, file)?;
    output::import_report(&report);
    Ok(())
}
