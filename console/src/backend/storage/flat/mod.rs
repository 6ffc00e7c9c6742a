//! # Flat-File Storage Module
//!
//! File-based storage for the inventory manager. Everything lives in one data
//! directory:
//!
//! ```text
//! data/
//! ├── inventory.yaml   optional configuration
//! ├── products.txt     backing file (ProductRepository)
//! ├── products.csv     interchange file (InterchangeRepository)
//! └── users.txt        credentials, read only (CredentialRepository)
//! ```
//!
//! Every call opens its file, does its work and closes it again. Nothing is
//! cached between calls.

pub mod connection;
pub mod product_repository;
pub mod interchange_repository;
pub mod credential_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::DataConnection;
pub use product_repository::ProductRepository;
pub use interchange_repository::InterchangeRepository;
pub use credential_repository::CredentialRepository;
