//! Console inventory record manager.
//!
//! Product records live in a flat text file in a data directory. Each operation
//! loads the whole collection, works on it and saves it back. Records can be
//! exported to and imported from a CSV interchange file.

pub mod backend;
pub mod config;
pub mod io;

pub use backend::Backend;
pub use config::AppConfig;
