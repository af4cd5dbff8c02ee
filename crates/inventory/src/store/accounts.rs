//! Account collection.
//!
//! Persistence only. Input validation and password policy live in
//! [`crate::services::auth`].

use std::path::{Path, PathBuf};

use tracing::info;
use wardrobe_core::PasswordDigest;

use super::{JsonFile, StoreError};
use crate::models::Account;

/// Store for the account collection.
#[derive(Debug)]
pub struct AccountStore {
    file: JsonFile<Account>,
}

impl AccountStore {
    /// Create a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonFile::new(path),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Create the collection with `seed` if the file does not exist.
    ///
    /// Returns `true` if the file was created.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn create_if_missing(
        &self,
        seed: impl FnOnce() -> Vec<Account>,
    ) -> Result<bool, StoreError> {
        let created = self.file.create_if_missing(seed)?;
        if created {
            info!(path = %self.path().display(), "Created account collection");
        }
        Ok(created)
    }

    /// All accounts in file order.
    #[must_use]
    pub fn list(&self) -> Vec<Account> {
        self.file.load()
    }

    /// First account whose username and digest both match exactly.
    #[must_use]
    pub fn find_by_credentials(&self, username: &str, digest: &PasswordDigest) -> Option<Account> {
        self.file
            .load()
            .into_iter()
            .find(|account| account.username == *username && account.password_digest == *digest)
    }

    /// Append `account` unless its username is already taken.
    ///
    /// The uniqueness scan and the append happen under the collection's
    /// guard.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if the username exists, or a write
    /// error.
    pub fn insert_unique(&self, account: Account) -> Result<Account, StoreError> {
        self.file.modify(|accounts| {
            if accounts.iter().any(|a| a.username == account.username) {
                return Err(StoreError::Conflict(account.username.to_string()));
            }
            accounts.push(account.clone());
            Ok(account)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use wardrobe_core::{Role, Username, hash_password};

    use super::*;

    fn account(name: &str, password: &str) -> Account {
        Account::new(Username::parse(name).unwrap(), password, Role::User)
    }

    #[test]
    fn test_insert_and_find() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("users.json"));
        store.insert_unique(account("alice", "secret1")).unwrap();

        let found = store.find_by_credentials("alice", &hash_password("secret1"));
        assert_eq!(found.unwrap().username.as_str(), "alice");
        assert!(store.find_by_credentials("alice", &hash_password("nope")).is_none());
        assert!(store.find_by_credentials("Alice", &hash_password("secret1")).is_none());
    }

    #[test]
    fn test_insert_rejects_duplicate() {
        let dir = tempfile::tempdir().unwrap();
        let store = AccountStore::new(dir.path().join("users.json"));
        store.insert_unique(account("alice", "secret1")).unwrap();
        let err = store.insert_unique(account("alice", "other12")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(name) if name == "alice"));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_find_returns_first_match_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let mut first = account("dup", "secret1");
        first.role = Role::Admin;
        let second = account("dup", "secret1");
        JsonFile::new(&path).save(&[first, second]).unwrap();

        let store = AccountStore::new(&path);
        let found = store.find_by_credentials("dup", &hash_password("secret1")).unwrap();
        assert_eq!(found.role, Role::Admin);
    }
}
