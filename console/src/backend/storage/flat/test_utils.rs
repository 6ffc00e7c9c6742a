//! Test utilities module for automatic cleanup and consistent test infrastructure
//!
//! The temporary directory lives as long as the environment, so test data is
//! removed even if a test panics.

use anyhow::Result;
use shared::Product;
use std::fs;
use tempfile::TempDir;

use super::connection::DataConnection;
use super::credential_repository::CredentialRepository;
use super::interchange_repository::InterchangeRepository;
use super::product_repository::ProductRepository;
use crate::backend::storage::traits::ProductStorage;
use crate::config::AppConfig;

/// Temporary data directory plus a connection pointing at it
pub struct TestEnvironment {
    pub connection: DataConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

/// Repository instances sharing one test environment
pub struct TestHelper {
    pub env: TestEnvironment,
    pub product_repo: ProductRepository,
    pub interchange_repo: InterchangeRepository,
    pub credential_repo: CredentialRepository,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Self::with_config(&AppConfig::default())
    }

    pub fn with_config(config: &AppConfig) -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = DataConnection::from_config(temp_dir.path(), config)?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }

    pub fn write_credentials(&self, content: &str) -> Result<()> {
        fs::write(self.connection.credentials_file_path(), content)?;
        Ok(())
    }

    /// Raw content of the backing file, empty if it does not exist
    pub fn products_file_content(&self) -> String {
        fs::read_to_string(self.connection.products_file_path()).unwrap_or_default()
    }
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        Self::from_env(TestEnvironment::new()?)
    }

    pub fn from_env(env: TestEnvironment) -> Result<Self> {
        let product_repo = ProductRepository::new(env.connection.clone());
        let interchange_repo = InterchangeRepository::new(env.connection.clone());
        let credential_repo = CredentialRepository::new(env.connection.clone());

        Ok(Self {
            env,
            product_repo,
            interchange_repo,
            credential_repo,
        })
    }

    /// Persist the given products as the backing collection
    pub fn seed_products(&self, products: &[Product]) -> Result<()> {
        self.product_repo.save_products(products)
    }

    pub fn stored_products(&self) -> Vec<Product> {
        self.product_repo.load_products().expect("Failed to load products")
    }
}

/// A small collection with no commas or line breaks in its text fields
pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new(101, "Claw Hammer", "Tools", 12.5, 40),
        Product::new(102, "Wood Screws", "Fasteners", 0.05, 1200),
        Product::new(103, "Tape Measure", "Tools", 7.99, 5),
        Product::new(104, "Sandpaper", "Abrasives", 0.6, 6),
    ]
}
