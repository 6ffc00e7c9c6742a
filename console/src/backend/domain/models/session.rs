use crate::backend::domain::error::InventoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

/// The authenticated operator. Passed explicitly to every mutating operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub role: Role,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Which sessions may change the stored collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    pub admin_only_writes: bool,
}

impl AccessPolicy {
    pub fn new(admin_only_writes: bool) -> Self {
        Self { admin_only_writes }
    }

    /// Check that `session` may perform a mutating `operation`
    pub fn authorize_write(&self, session: &Session, operation: &str) -> Result<(), InventoryError> {
        if self.admin_only_writes && !session.is_admin() {
            return Err(InventoryError::PermissionDenied {
                username: session.username.clone(),
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_policy_allows_everyone() {
        let policy = AccessPolicy::default();
        assert!(policy.authorize_write(&Session::new("clerk", Role::User), "delete products").is_ok());
    }

    #[test]
    fn test_admin_only_policy() {
        let policy = AccessPolicy::new(true);
        assert!(policy.authorize_write(&Session::new("admin", Role::Admin), "delete products").is_ok());

        let err = policy
            .authorize_write(&Session::new("clerk", Role::User), "delete products")
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::PermissionDenied {
                username: "clerk".to_string(),
                operation: "delete products".to_string(),
            }
        );
    }
}
