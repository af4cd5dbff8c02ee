//! Core types for Wardrobe.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod password;
pub mod price;
pub mod role;
pub mod timestamp;
pub mod username;

pub use id::*;
pub use password::{PasswordDigest, hash_password};
pub use price::Price;
pub use role::Role;
pub use timestamp::Timestamp;
pub use username::{Username, UsernameError};
