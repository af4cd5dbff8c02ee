//! Domain models for accounts and products.

pub mod account;
pub mod product;

pub use account::Account;
pub use product::{Product, ProductDraft, ProductFields};
