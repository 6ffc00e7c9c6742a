//! Domain-level command and query types
//! These structs are the inputs and outputs of the services in the domain
//! layer. The console layer builds commands from what the operator typed and
//! renders the results.

pub mod product {
    use shared::{Product, SortKey};

    /// Input for creating a new product. All fields are already parsed.
    #[derive(Debug, Clone)]
    pub struct CreateProductCommand {
        pub product: Product,
    }

    /// Replacement values for every mutable field of one product
    #[derive(Debug, Clone)]
    pub struct UpdateProductCommand {
        pub id: i64,
        pub name: String,
        pub category: String,
        pub price: f64,
        pub quantity: i64,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteProductCommand {
        pub id: i64,
    }

    #[derive(Debug, Clone)]
    pub struct SortProductsCommand {
        pub key: SortKey,
    }

    #[derive(Debug, Clone)]
    pub struct LowStockQuery {
        pub threshold: i64,
    }

    #[derive(Debug, Clone)]
    pub struct CreateProductResult {
        pub product: Product,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateProductResult {
        pub product: Product,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteProductResult {
        pub product: Product,
        pub success_message: String,
    }

    /// The collection in its new, persisted order
    #[derive(Debug, Clone)]
    pub struct SortProductsResult {
        pub products: Vec<Product>,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct LowStockResult {
        pub threshold: i64,
        pub products: Vec<Product>,
    }
}

pub mod interchange {
    use std::path::PathBuf;

    #[derive(Debug, Clone)]
    pub struct ExportProductsResult {
        pub path: PathBuf,
        pub exported_count: usize,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct ImportProductsResult {
        pub imported_count: usize,
        /// Size of the stored collection after the import
        pub total_count: usize,
        pub success_message: String,
    }
}

pub mod auth {
    use crate::backend::domain::models::Session;

    #[derive(Debug, Clone)]
    pub struct AuthenticateCommand {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct AuthenticateResult {
        pub session: Session,
        pub welcome_message: String,
    }
}
