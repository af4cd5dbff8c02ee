//! First-run setup.

use tracing::info;
use wardrobe_inventory::Inventory;

use super::CliError;

/// Create the data files if missing.
///
/// # Errors
///
/// Returns `CliError::Inventory` if a file cannot be written.
pub fn run(inventory: &Inventory) -> Result<(), CliError> {
    let config = inventory.config();
    if inventory.initialize()? {
        info!(
            accounts = %config.accounts_path().display(),
            products = %config.products_path().display(),
            "Created data files with default accounts admin and user"
        );
    } else {
        info!(
            accounts = %config.accounts_path().display(),
            "Data files already present, nothing to do"
        );
    }
    Ok(())
}
