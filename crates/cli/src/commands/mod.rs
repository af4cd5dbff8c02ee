//! Subcommand implementations.

pub mod init;
pub mod products;
pub mod register;
pub mod shell;

use secrecy::SecretString;
use thiserror::Error;
use wardrobe_core::ProductId;
use wardrobe_inventory::services::Session;
use wardrobe_inventory::{Inventory, InventoryError};

use crate::Credentials;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The inventory rejected the operation.
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Credentials were neither passed nor set in the environment.
    #[error("Missing {0}: pass --{0} or set WARDROBE_{1}")]
    MissingCredential(&'static str, &'static str),

    /// A product id did not parse.
    #[error("Invalid product id: {0}")]
    InvalidId(String),

    /// A shell command was malformed.
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// The shell did not recognize the command.
    #[error("Unknown command `{0}`, type `help` for a list")]
    UnknownCommand(String),

    /// Reading the terminal failed.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A background fetch did not run to completion.
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Log in with flag or environment credentials.
///
/// # Errors
///
/// Returns `CliError::MissingCredential` if either value is absent, or the
/// login error.
pub fn login(inventory: &Inventory, credentials: Credentials) -> Result<Session, CliError> {
    let username = credentials
        .username
        .ok_or(CliError::MissingCredential("username", "USERNAME"))?;
    let password = credentials
        .password
        .map(SecretString::from)
        .ok_or(CliError::MissingCredential("password", "PASSWORD"))?;
    Ok(inventory.auth().login(&username, &password)?)
}

/// Largest supplier fetch a single command may start.
pub const MAX_FETCH_COUNT: usize = 1_000;

const FETCH_COUNT_USAGE: &str = "generate [count], count at most 1000";

/// Check a requested fetch size against [`MAX_FETCH_COUNT`].
///
/// # Errors
///
/// Returns `CliError::Usage` if `count` is larger than the limit.
pub const fn check_fetch_count(count: usize) -> Result<usize, CliError> {
    if count > MAX_FETCH_COUNT {
        return Err(CliError::Usage(FETCH_COUNT_USAGE));
    }
    Ok(count)
}

/// Parse a product id typed by the user.
///
/// # Errors
///
/// Returns `CliError::InvalidId` if `text` is not a product id.
pub fn parse_id(text: &str) -> Result<ProductId, CliError> {
    text.parse()
        .map_err(|_| CliError::InvalidId(text.trim().to_string()))
}
