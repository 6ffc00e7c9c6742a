//! # Domain Module
//!
//! Business logic for the inventory manager, independent of the console and of
//! the storage format.
//!
//! ## Module Organization
//!
//! - **product_service**: create, list, search, update, delete, sort and
//!   low-stock filtering of product records
//! - **report_service**: total stock value and per-category counts
//! - **interchange_service**: CSV export and append-only import
//! - **auth_service**: credential check producing a `Session`
//! - **commands**: input and result types of the services
//! - **error**: `InventoryError`, the failures callers tell apart
//!
//! ## Business Rules
//!
//! - Ids are checked for uniqueness on create only
//! - Price and quantity must be non-negative when a record is created or updated
//! - Update, delete and search act on the first record with a matching id
//! - Sorting is stable and ascending, and the new order is saved
//! - Import appends, duplicates included
//! - Mutating operations take the operator's `Session`; with `admin_only_writes`
//!   only the admin may use them

pub mod auth_service;
pub mod commands;
pub mod error;
pub mod interchange_service;
pub mod models;
pub mod product_service;
pub mod report_service;

pub use auth_service::AuthService;
pub use error::InventoryError;
pub use interchange_service::InterchangeService;
pub use models::{AccessPolicy, Role, Session};
pub use product_service::ProductService;
pub use report_service::ReportService;
