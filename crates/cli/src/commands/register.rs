//! Account registration.

use secrecy::SecretString;
use tracing::info;
use wardrobe_inventory::Inventory;

use super::CliError;

/// Register a `user` account.
///
/// # Errors
///
/// Returns `CliError::Inventory` on validation failure, a taken username, or
/// a write error.
pub fn run(
    inventory: &Inventory,
    username: &str,
    password: &SecretString,
    confirm: &SecretString,
) -> Result<(), CliError> {
    inventory.initialize()?;
    let account = inventory.auth().register(username, password, confirm)?;
    info!(user = %account.username, "Registration succeeded");
    Ok(())
}
