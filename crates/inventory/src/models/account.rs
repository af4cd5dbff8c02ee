//! Account domain types.

use serde::{Deserialize, Serialize};
use wardrobe_core::{PasswordDigest, Role, Timestamp, Username, hash_password};

/// A stored account.
///
/// On disk: `username`, `password` (hex digest), `role`, `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, case-sensitive login name.
    pub username: Username,
    /// SHA-256 digest of the password.
    #[serde(rename = "password")]
    pub password_digest: PasswordDigest,
    /// Permission level.
    pub role: Role,
    /// When the account was created. Informational only.
    #[serde(default)]
    pub created_at: Timestamp,
}

impl Account {
    /// Build a new account, hashing `password` and stamping the current time.
    #[must_use]
    pub fn new(username: Username, password: &str, role: Role) -> Self {
        Self {
            username,
            password_digest: hash_password(password),
            role,
            created_at: Timestamp::now(),
        }
    }

    /// Whether this account holds the admin role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
