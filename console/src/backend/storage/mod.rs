//! # Storage Module
//!
//! Data persistence for the inventory manager. The domain layer only sees the
//! traits in [`traits`]; the flat-file implementation is in [`flat`].

pub mod flat;
pub mod traits;

pub use flat::{CredentialRepository, DataConnection, InterchangeRepository, ProductRepository};
pub use traits::{CredentialStorage, InterchangeStorage, ProductStorage};
