use anyhow::Result;
use log::{debug, warn};
use std::fs;

use super::connection::DataConnection;
use crate::backend::storage::traits::CredentialStorage;

/// Read-only view of the credentials file: whitespace separated
/// `username password` pairs, conventionally one pair per line
#[derive(Debug, Clone)]
pub struct CredentialRepository {
    connection: DataConnection,
}

impl CredentialRepository {
    pub fn new(connection: DataConnection) -> Self {
        Self { connection }
    }

    /// Scan token pairs for an exact match. A trailing unpaired token is ignored.
    pub fn contains_pair(content: &str, username: &str, password: &str) -> bool {
        let mut tokens = content.split_whitespace();
        while let (Some(stored_username), Some(stored_password)) = (tokens.next(), tokens.next()) {
            if stored_username == username && stored_password == password {
                return true;
            }
        }
        false
    }
}

impl CredentialStorage for CredentialRepository {
    fn verify_credentials(&self, username: &str, password: &str) -> Result<bool> {
        let file_path = self.connection.credentials_file_path();

        let content = match fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read credentials file {:?}: {}", file_path, e);
                return Ok(false);
            }
        };

        let matched = Self::contains_pair(&content, username, password);
        debug!("Credential check for '{}': {}", username, if matched { "match" } else { "no match" });
        Ok(matched)
    }
}
