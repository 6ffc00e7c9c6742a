//! # Application Configuration
//!
//! Optional YAML file describing where the inventory files live and which
//! access policy applies. Every field has a default, so an empty file (or no
//! file at all) gives the same behaviour as the classic program: three files in
//! the working directory and no write restrictions.
//!
//! ```yaml
//! products_file: "products.txt"
//! interchange_file: "products.csv"
//! credentials_file: "users.txt"
//! admin_username: "admin"
//! admin_only_writes: false
//! ```
//!
//! Relative file names are resolved against the data directory.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the data directory when no
/// explicit path is given
pub const DEFAULT_CONFIG_FILE: &str = "inventory.yaml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backing file holding the product records
    pub products_file: String,
    /// CSV file used by export and import
    pub interchange_file: String,
    /// Whitespace separated username/password pairs
    pub credentials_file: String,
    /// Username that receives the admin role
    pub admin_username: String,
    /// Reject create/update/delete/sort/import for non-admin sessions
    pub admin_only_writes: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            products_file: "products.txt".to_string(),
            interchange_file: "products.csv".to_string(),
            credentials_file: "users.txt".to_string(),
            admin_username: "admin".to_string(),
            admin_only_writes: false,
        }
    }
}

impl AppConfig {
    /// Parse a configuration from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: AppConfig = serde_yaml::from_str(yaml).context("Invalid configuration YAML")?;
        Ok(config)
    }

    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, `inventory.yaml` in the data
    /// directory is used when present, defaults otherwise.
    pub fn load(explicit_path: Option<&Path>, data_directory: &Path) -> Result<Self> {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = data_directory.join(DEFAULT_CONFIG_FILE);
                if !candidate.exists() {
                    debug!("No configuration file at {:?}, using defaults", candidate);
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let yaml = fs::read_to_string(&path)
            .with_context(|| format!("Could not read configuration file {:?}", path))?;
        let config = Self::from_yaml(&yaml)
            .with_context(|| format!("Could not load configuration file {:?}", path))?;
        info!("Loaded configuration from {:?}", path);
        Ok(config)
    }
}
