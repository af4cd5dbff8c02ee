//! Informational timestamps.
//!
//! Timestamps are stored as local-time strings and never parsed back or
//! compared, so values written by other tools survive a rewrite untouched.

use core::fmt;

use chrono::Local;
use serde::{Deserialize, Serialize};

/// A local-time timestamp string such as `2026-10-19 14:03:27`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Format used for timestamps this crate produces.
    pub const FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// The current local time.
    #[must_use]
    pub fn now() -> Self {
        Self(Local::now().format(Self::FORMAT).to_string())
    }

    /// Wrap an existing timestamp string verbatim.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the timestamp as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether no timestamp was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
