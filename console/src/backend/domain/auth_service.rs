use anyhow::Result;
use log::{info, warn};

use crate::backend::domain::commands::auth::{AuthenticateCommand, AuthenticateResult};
use crate::backend::domain::error::InventoryError;
use crate::backend::domain::models::{Role, Session};
use crate::backend::storage::traits::CredentialStorage;

/// Service for logging an operator in against the credentials file
#[derive(Debug, Clone)]
pub struct AuthService<C: CredentialStorage> {
    credentials: C,
    admin_username: String,
}

impl<C: CredentialStorage> AuthService<C> {
    pub fn new(credentials: C, admin_username: impl Into<String>) -> Self {
        Self {
            credentials,
            admin_username: admin_username.into(),
        }
    }

    /// Check the pair against the credentials file and open a session.
    /// The admin role goes to the configured admin username.
    pub fn authenticate(&self, command: AuthenticateCommand) -> Result<AuthenticateResult> {
        info!("Authenticating user '{}'", command.username);

        if !self.credentials.verify_credentials(&command.username, &command.password)? {
            warn!("Authentication failed for user '{}'", command.username);
            return Err(InventoryError::AuthenticationFailed.into());
        }

        let role = if command.username == self.admin_username {
            Role::Admin
        } else {
            Role::User
        };
        let session = Session::new(command.username, role);
        info!("User '{}' logged in as {:?}", session.username, session.role);

        Ok(AuthenticateResult {
            welcome_message: format!("Welcome, {}!", if session.is_admin() { "Admin" } else { "User" }),
            session,
        })
    }
}
