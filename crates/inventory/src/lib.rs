//! Wardrobe Inventory library.
//!
//! Everything behind the shop's user interface lives here: the account and
//! product stores, the services that gate them by role, and the simulated
//! supplier feed. The CLI shell is a thin caller on top.
//!
//! # Storage
//!
//! Each collection is a single JSON array on disk. Every operation reads
//! the whole file, and every mutation rewrites it through a temp file and
//! rename. Nothing is cached between calls.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use config::InventoryConfig;
pub use error::{InventoryError, ValidationError};
pub use state::Inventory;
