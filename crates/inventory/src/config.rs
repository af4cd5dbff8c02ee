//! Inventory configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional.
//! - `WARDROBE_DATA_DIR` - Directory holding both collections (default: .)
//! - `WARDROBE_ACCOUNTS_FILE` - Account collection file name (default: users.json)
//! - `WARDROBE_PRODUCTS_FILE` - Product collection file name (default: products.json)
//! - `WARDROBE_FETCH_DELAY_MS` - Artificial supplier feed delay (default: 2000)
//! - `WARDROBE_FETCH_COUNT` - Records per supplier fetch (default: 8)
//! - `WARDROBE_LOG_JSON` - Emit JSON log lines when set

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

const DEFAULT_ACCOUNTS_FILE: &str = "users.json";
const DEFAULT_PRODUCTS_FILE: &str = "products.json";
const DEFAULT_FETCH_DELAY_MS: u64 = 2000;
const DEFAULT_FETCH_COUNT: usize = 8;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Inventory configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryConfig {
    /// Directory holding both collections
    pub data_dir: PathBuf,
    /// Account collection file name, relative to `data_dir`
    pub accounts_file: String,
    /// Product collection file name, relative to `data_dir`
    pub products_file: String,
    /// Delay before a supplier fetch writes
    pub fetch_delay: Duration,
    /// Records generated per supplier fetch when the caller does not say
    pub fetch_count: usize,
    /// Emit logs as JSON lines
    pub log_json: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::for_data_dir(".")
    }
}

impl InventoryConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let fetch_delay_ms = parse_or(&lookup, "WARDROBE_FETCH_DELAY_MS", DEFAULT_FETCH_DELAY_MS)?;
        let fetch_count = parse_or(&lookup, "WARDROBE_FETCH_COUNT", DEFAULT_FETCH_COUNT)?;

        Ok(Self {
            data_dir: PathBuf::from(get_or_default("WARDROBE_DATA_DIR", ".")),
            accounts_file: get_or_default("WARDROBE_ACCOUNTS_FILE", DEFAULT_ACCOUNTS_FILE),
            products_file: get_or_default("WARDROBE_PRODUCTS_FILE", DEFAULT_PRODUCTS_FILE),
            fetch_delay: Duration::from_millis(fetch_delay_ms),
            fetch_count,
            log_json: lookup("WARDROBE_LOG_JSON").is_some_and(|v| !v.is_empty()),
        })
    }

    /// Default configuration rooted at `data_dir`.
    #[must_use]
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            accounts_file: DEFAULT_ACCOUNTS_FILE.to_string(),
            products_file: DEFAULT_PRODUCTS_FILE.to_string(),
            fetch_delay: Duration::from_millis(DEFAULT_FETCH_DELAY_MS),
            fetch_count: DEFAULT_FETCH_COUNT,
            log_json: false,
        }
    }

    /// Full path of the account collection.
    #[must_use]
    pub fn accounts_path(&self) -> PathBuf {
        self.data_dir.join(&self.accounts_file)
    }

    /// Full path of the product collection.
    #[must_use]
    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }
}

/// Parse an optional numeric variable, falling back to `default` when unset
/// or blank.
fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        _ => Ok(default),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, InventoryConfig::default());
        assert_eq!(config.accounts_path(), PathBuf::from("./users.json"));
        assert_eq!(config.products_path(), PathBuf::from("./products.json"));
        assert_eq!(config.fetch_delay, Duration::from_secs(2));
        assert_eq!(config.fetch_count, 8);
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides() {
        let config = InventoryConfig::from_lookup(lookup(&[
            ("WARDROBE_DATA_DIR", "/srv/shop"),
            ("WARDROBE_PRODUCTS_FILE", "catalog.json"),
            ("WARDROBE_FETCH_DELAY_MS", "0"),
            ("WARDROBE_FETCH_COUNT", "3"),
            ("WARDROBE_LOG_JSON", "1"),
        ]))
        .unwrap();
        assert_eq!(config.products_path(), PathBuf::from("/srv/shop/catalog.json"));
        assert_eq!(config.accounts_path(), PathBuf::from("/srv/shop/users.json"));
        assert_eq!(config.fetch_delay, Duration::ZERO);
        assert_eq!(config.fetch_count, 3);
        assert!(config.log_json);
    }

    #[test]
    fn test_invalid_number() {
        let err = InventoryConfig::from_lookup(lookup(&[("WARDROBE_FETCH_COUNT", "many")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "WARDROBE_FETCH_COUNT"));
    }
}
