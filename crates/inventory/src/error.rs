//! Unified error handling for the inventory.

use thiserror::Error;
use wardrobe_core::{ProductId, UsernameError};

use crate::store::StoreError;

/// Application-level error type for account and product operations.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Input failed validation. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Registration collided with an existing account.
    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    /// Username and password did not match any account.
    #[error("Invalid username or password")]
    Authentication,

    /// The session's role may not perform this action.
    #[error("Permission denied: {action} requires the admin role")]
    Permission {
        /// What was attempted.
        action: &'static str,
    },

    /// A position did not address an existing record.
    #[error("Out of range: no product at position {index} (collection has {len})")]
    OutOfRange {
        /// Requested 0-based position.
        index: usize,
        /// Collection length at the time of the request.
        len: usize,
    },

    /// No record carries the requested id.
    #[error("Not found: product {0}")]
    NotFound(ProductId),

    /// Reading or writing a collection failed.
    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<StoreError> for InventoryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(username) => Self::DuplicateUsername(username),
            StoreError::OutOfRange { index, len } => Self::OutOfRange { index, len },
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Reasons user input is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field did not parse.
    #[error("{field} must be a number (got {value:?})")]
    NotANumber {
        /// Field name.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// A numeric field was below zero or not finite.
    #[error("{0} must be zero or greater")]
    Negative(&'static str),

    /// Password and confirmation differ.
    #[error("password confirmation does not match")]
    PasswordMismatch,

    /// Password is shorter than the minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Minimum length in characters.
        min: usize,
    },

    /// The username is not acceptable.
    #[error("invalid username: {0}")]
    Username(#[from] UsernameError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_error_display() {
        let err = InventoryError::Permission {
            action: "delete product",
        };
        assert_eq!(
            err.to_string(),
            "Permission denied: delete product requires the admin role"
        );

        let err = InventoryError::OutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "Out of range: no product at position 7 (collection has 3)"
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = InventoryError::from(ValidationError::MissingField("name"));
        assert_eq!(err.to_string(), "Validation error: name is required");

        let err = ValidationError::PasswordTooShort { min: 6 };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_store_errors_map_to_domain_kinds() {
        assert!(matches!(
            InventoryError::from(StoreError::Conflict("alice".to_string())),
            InventoryError::DuplicateUsername(name) if name == "alice"
        ));
        assert!(matches!(
            InventoryError::from(StoreError::OutOfRange { index: 1, len: 0 }),
            InventoryError::OutOfRange { index: 1, len: 0 }
        ));
        let id = ProductId::generate();
        assert!(matches!(
            InventoryError::from(StoreError::NotFound(id)),
            InventoryError::NotFound(found) if found == id
        ));
        assert!(matches!(
            InventoryError::from(StoreError::Worker("panicked".to_string())),
            InventoryError::Storage(_)
        ));
    }
}
