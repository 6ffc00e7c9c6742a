//! # Storage Traits
//!
//! Storage abstractions the domain layer depends on. The flat-file
//! implementations live in `storage::flat`; tests and alternative backends can
//! supply their own.

use anyhow::Result;
use shared::Product;
use std::path::Path;

/// Whole-collection persistence for product records.
///
/// There is no incremental update: callers load everything, change it in
/// memory and hand the full collection back.
pub trait ProductStorage {
    /// Load every record in stored order. A missing store yields an empty collection.
    fn load_products(&self) -> Result<Vec<Product>>;

    /// Replace the stored collection with `products`, in the given order
    fn save_products(&self, products: &[Product]) -> Result<()>;
}

/// Export/import of product records in an interchange format
pub trait InterchangeStorage {
    /// Where the interchange data lives, for messages
    fn location(&self) -> &Path;

    /// Write all records, returning how many were written
    fn export_products(&self, products: &[Product]) -> Result<usize>;

    /// Read all records. Fails on the first malformed line.
    fn import_products(&self) -> Result<Vec<Product>>;
}

/// Read-only credential lookup
pub trait CredentialStorage {
    /// True when the exact username/password pair is on file
    fn verify_credentials(&self, username: &str, password: &str) -> Result<bool>;
}
