//! Authentication service.
//!
//! Provides first-run account seeding, password login and self-service
//! registration. Registered accounts always get the `user` role; the only
//! admin is the seeded one.

use secrecy::{ExposeSecret, SecretString};
use tracing::{info, instrument, warn};
use wardrobe_core::{Role, Username, hash_password};

use crate::error::{InventoryError, ValidationError};
use crate::models::Account;
use crate::store::{AccountStore, ProductStore};

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Accounts written on first run: (username, password, role).
pub const DEFAULT_ACCOUNTS: [(&str, &str, Role); 2] = [
    ("admin", "admin123", Role::Admin),
    ("user", "user123", Role::User),
];

/// An authenticated account.
///
/// Catalog operations take a `Session` so role checks cannot be skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    account: Account,
}

impl Session {
    /// Login name.
    #[must_use]
    pub fn username(&self) -> &str {
        self.account.username.as_str()
    }

    /// Permission level.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.account.role
    }

    /// Whether the session holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.account.is_admin()
    }

    /// Fail unless the session is an admin.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Permission` naming `action` for role `user`.
    pub fn require_admin(&self, action: &'static str) -> Result<(), InventoryError> {
        if self.is_admin() {
            Ok(())
        } else {
            warn!(user = %self.username(), action, "Rejected admin-only action");
            Err(InventoryError::Permission { action })
        }
    }
}

impl From<Account> for Session {
    fn from(account: Account) -> Self {
        Self { account }
    }
}

/// Authentication service.
pub struct AuthService<'a> {
    accounts: &'a AccountStore,
    products: &'a ProductStore,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(accounts: &'a AccountStore, products: &'a ProductStore) -> Self {
        Self { accounts, products }
    }

    /// Create the account collection with the default accounts, and an empty
    /// product collection, if either file is missing.
    ///
    /// Returns `true` when the account file was created. A file that exists
    /// is never touched, even if it does not parse.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Storage` if a write fails.
    #[instrument(skip_all)]
    pub fn initialize_defaults(&self) -> Result<bool, InventoryError> {
        let created = self.accounts.create_if_missing(default_accounts)?;
        self.products.create_if_missing()?;
        Ok(created)
    }

    /// Find the account matching `username` and `password` exactly.
    ///
    /// The first match in file order wins.
    #[must_use]
    pub fn authenticate(&self, username: &str, password: &SecretString) -> Option<Account> {
        let digest = hash_password(password.expose_secret());
        self.accounts.find_by_credentials(username, &digest)
    }

    /// Log in from form input.
    ///
    /// Surrounding whitespace is trimmed from both inputs.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Validation` if either input is empty.
    /// Returns `InventoryError::Authentication` if no account matches.
    #[instrument(skip_all)]
    pub fn login(&self, username: &str, password: &SecretString) -> Result<Session, InventoryError> {
        let username = username.trim();
        let password = password.expose_secret().trim();
        if username.is_empty() {
            return Err(ValidationError::MissingField("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }

        let account = self
            .accounts
            .find_by_credentials(username, &hash_password(password))
            .ok_or_else(|| {
                warn!(user = %username, "Login failed");
                InventoryError::Authentication
            })?;

        info!(user = %account.username, role = %account.role, "Logged in");
        Ok(Session::from(account))
    }

    /// Register a new `user` account.
    ///
    /// # Errors
    ///
    /// Returns `InventoryError::Validation` if an input is empty, the
    /// passwords differ, or the password is too short.
    /// Returns `InventoryError::DuplicateUsername` if the name is taken.
    /// Returns `InventoryError::Storage` if the write fails.
    #[instrument(skip_all)]
    pub fn register(
        &self,
        username: &str,
        password: &SecretString,
        confirm: &SecretString,
    ) -> Result<Account, InventoryError> {
        let password = password.expose_secret();
        let confirm = confirm.expose_secret();
        if username.is_empty() {
            return Err(ValidationError::MissingField("username").into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingField("password").into());
        }
        if confirm.is_empty() {
            return Err(ValidationError::MissingField("password confirmation").into());
        }

        let username = Username::parse(username).map_err(ValidationError::from)?;
        validate_password(password, confirm)?;

        let account = self
            .accounts
            .insert_unique(Account::new(username, password, Role::User))?;

        info!(user = %account.username, "Registered account");
        Ok(account)
    }
}

fn validate_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

fn default_accounts() -> Vec<Account> {
    DEFAULT_ACCOUNTS
        .iter()
        .filter_map(|(name, password, role)| {
            Username::parse(name)
                .ok()
                .map(|username| Account::new(username, password, *role))
        })
        .collect()
}
