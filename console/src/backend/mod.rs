//! # Backend Module
//!
//! All non-console logic of the inventory manager:
//! - **Domain**: record operations, reporting, interchange and authentication
//! - **Storage**: the flat-file repositories behind them
//!
//! ```text
//! io::console (menu, prompts, tables)
//!     ↓
//! domain (services)
//!     ↓
//! storage (flat files)
//! ```

use anyhow::Result;
use log::info;
use std::path::Path;

pub mod domain;
pub mod storage;

use crate::config::AppConfig;
use domain::{AccessPolicy, AuthService, InterchangeService, ProductService, ReportService};
use storage::{CredentialRepository, DataConnection, InterchangeRepository, ProductRepository};

/// Main backend struct that wires every service to the flat-file storage
#[derive(Debug, Clone)]
pub struct Backend {
    pub connection: DataConnection,
    pub product_service: ProductService<ProductRepository>,
    pub report_service: ReportService<ProductRepository>,
    pub interchange_service: InterchangeService<ProductRepository, InterchangeRepository>,
    pub auth_service: AuthService<CredentialRepository>,
}

impl Backend {
    /// Create a backend over `data_directory` using the file names and policy
    /// from `config`
    pub fn new<P: AsRef<Path>>(data_directory: P, config: &AppConfig) -> Result<Self> {
        info!("Setting up storage in {:?}", data_directory.as_ref());
        let connection = DataConnection::from_config(data_directory, config)?;

        let policy = AccessPolicy::new(config.admin_only_writes);
        let product_repository = ProductRepository::new(connection.clone());

        let product_service = ProductService::new(product_repository.clone(), policy);
        let report_service = ReportService::new(product_repository.clone());
        let interchange_service = InterchangeService::new(
            product_repository,
            InterchangeRepository::new(connection.clone()),
            policy,
        );
        let auth_service = AuthService::new(
            CredentialRepository::new(connection.clone()),
            config.admin_username.clone(),
        );

        Ok(Backend {
            connection,
            product_service,
            report_service,
            interchange_service,
            auth_service,
        })
    }
}
