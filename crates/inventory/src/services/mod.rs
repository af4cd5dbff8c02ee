//! Business logic services for the inventory.
//!
//! # Services
//!
//! - `auth` - Default accounts, login and registration
//! - `catalog` - Role-gated product browsing and editing, JSON import
//! - `bulk_fetch` - Simulated supplier feed that appends generated products

pub mod auth;
pub mod bulk_fetch;
pub mod catalog;

pub use auth::{AuthService, Session};
pub use bulk_fetch::{BulkFetcher, FetchOutcome, FetchReport};
pub use catalog::{Catalog, ImportReport};
