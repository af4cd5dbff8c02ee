//! Password digests.
//!
//! Passwords are never stored. Accounts keep the lowercase hex SHA-256 of the
//! UTF-8 plaintext, and login compares digests for equality.

use core::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest of a password.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Length of a digest in hex characters.
    pub const HEX_LENGTH: usize = 64;

    /// Wrap an already computed digest string.
    #[must_use]
    pub const fn from_hex(hex: String) -> Self {
        Self(hex)
    }

    /// Returns the digest as a hex string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `plaintext` hashes to this digest.
    #[must_use]
    pub fn matches(&self, plaintext: &str) -> bool {
        hash_password(plaintext) == *self
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PasswordDigest").field(&"[REDACTED]").finish()
    }
}

/// Hash a plaintext password.
///
/// Deterministic: the same plaintext always produces the same digest, which
/// is what both registration and login rely on.
#[must_use]
pub fn hash_password(plaintext: &str) -> PasswordDigest {
    let digest = Sha256::digest(plaintext.as_bytes());
    PasswordDigest(hex::encode(digest))
}
