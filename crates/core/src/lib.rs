//! Wardrobe Core - Shared types library.
//!
//! This crate provides common types used across all Wardrobe components:
//! - `inventory` - Account and product stores, services, configuration
//! - `cli` - Command-line tools and the interactive shell
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no file access,
//! no async runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product ids, usernames, password digests,
//!   roles, prices and timestamps

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
