use anyhow::{bail, Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;

/// DataConnection owns the data directory and resolves the paths of the
/// backing, interchange and credentials files inside it
#[derive(Debug, Clone)]
pub struct DataConnection {
    base_directory: PathBuf,
    products_file: PathBuf,
    interchange_file: PathBuf,
    credentials_file: PathBuf,
}

impl DataConnection {
    /// Create a connection using the default file names
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        Self::from_config(base_directory, &AppConfig::default())
    }

    /// Create a connection using the file names from a configuration.
    /// Absolute names are used as given, relative ones live under the base directory.
    pub fn from_config<P: AsRef<Path>>(base_directory: P, config: &AppConfig) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Could not create data directory {:?}", base_path))?;
            info!("Created data directory {:?}", base_path);
        }

        let products_file = base_path.join(&config.products_file);
        let interchange_file = base_path.join(&config.interchange_file);
        if interchange_file == products_file {
            bail!(
                "Interchange file {:?} must differ from the products file",
                interchange_file
            );
        }

        Ok(Self {
            products_file,
            interchange_file,
            credentials_file: base_path.join(&config.credentials_file),
            base_directory: base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Primary flat-text record file
    pub fn products_file_path(&self) -> &Path {
        &self.products_file
    }

    /// CSV file used for export/import, never the backing file
    pub fn interchange_file_path(&self) -> &Path {
        &self.interchange_file
    }

    pub fn credentials_file_path(&self) -> &Path {
        &self.credentials_file
    }
}
