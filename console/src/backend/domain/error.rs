use thiserror::Error;

/// Domain failures a caller may need to tell apart.
///
/// Services return `anyhow::Result`; these travel inside the `anyhow::Error`
/// and can be recovered with `downcast_ref::<InventoryError>()`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InventoryError {
    #[error("Product with ID {0} not found")]
    ProductNotFound(i64),

    #[error("A product with ID {0} already exists")]
    DuplicateId(i64),

    #[error("Unknown sort key '{0}'")]
    UnknownSortKey(String),

    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    #[error("Malformed interchange file at line {line}: {reason}")]
    MalformedInterchange { line: u64, reason: String },

    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("User '{username}' is not allowed to {operation}")]
    PermissionDenied { username: String, operation: String },
}

/// Convenience check used by tests and the console layer
pub fn inventory_error(err: &anyhow::Error) -> Option<&InventoryError> {
    err.downcast_ref::<InventoryError>()
}
