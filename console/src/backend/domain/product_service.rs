use anyhow::Result;
use log::{debug, info, warn};
use shared::{Product, SortKey};
use std::cmp::Ordering;

use crate::backend::domain::commands::product::{
    CreateProductCommand, CreateProductResult, DeleteProductCommand, DeleteProductResult, LowStockQuery,
    LowStockResult, SortProductsCommand, SortProductsResult, UpdateProductCommand, UpdateProductResult,
};
use crate::backend::domain::error::InventoryError;
use crate::backend::domain::models::{AccessPolicy, Session};
use crate::backend::storage::traits::ProductStorage;

/// Service for the record operations on the product collection.
///
/// Every call loads the whole collection, works on it in memory and, when
/// something changed, saves the whole collection back.
#[derive(Debug, Clone)]
pub struct ProductService<S: ProductStorage> {
    storage: S,
    policy: AccessPolicy,
}

impl<S: ProductStorage> ProductService<S> {
    pub fn new(storage: S, policy: AccessPolicy) -> Self {
        Self { storage, policy }
    }

    /// Add a product. Fails without saving if the id is already taken.
    pub fn create_product(&self, session: &Session, command: CreateProductCommand) -> Result<CreateProductResult> {
        self.policy.authorize_write(session, "create products")?;
        let product = command.product;
        info!("Creating product {} ('{}')", product.id, product.name);

        Self::validate_fields(&product.name, &product.category, product.price, product.quantity)?;

        let mut products = self.storage.load_products()?;
        if products.iter().any(|existing| existing.id == product.id) {
            warn!("Product {} already exists, nothing saved", product.id);
            return Err(InventoryError::DuplicateId(product.id).into());
        }

        products.push(product.clone());
        self.storage.save_products(&products)?;

        info!("Created product {}", product.id);
        Ok(CreateProductResult {
            success_message: format!("Product {} added successfully", product.id),
            product,
        })
    }

    /// The full collection in stored order
    pub fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.storage.load_products()?;
        info!("Listing {} products", products.len());
        Ok(products)
    }

    /// First product with the given id
    pub fn get_product(&self, id: i64) -> Result<Product> {
        debug!("Searching for product {}", id);
        let products = self.storage.load_products()?;
        products
            .into_iter()
            .find(|product| product.id == id)
            .ok_or_else(|| InventoryError::ProductNotFound(id).into())
    }

    /// Overwrite name, category, price and quantity of the first product with
    /// the given id
    pub fn update_product(&self, session: &Session, command: UpdateProductCommand) -> Result<UpdateProductResult> {
        self.policy.authorize_write(session, "update products")?;
        info!("Updating product {}", command.id);

        Self::validate_fields(&command.name, &command.category, command.price, command.quantity)?;

        let mut products = self.storage.load_products()?;
        let product = match products.iter_mut().find(|product| product.id == command.id) {
            Some(product) => product,
            None => {
                warn!("Product {} not found, nothing updated", command.id);
                return Err(InventoryError::ProductNotFound(command.id).into());
            }
        };

        product.name = command.name;
        product.category = command.category;
        product.price = command.price;
        product.quantity = command.quantity;
        let updated = product.clone();

        self.storage.save_products(&products)?;

        info!("Updated product {}", updated.id);
        Ok(UpdateProductResult {
            success_message: format!("Product {} updated successfully", updated.id),
            product: updated,
        })
    }

    /// Remove the first product with the given id
    pub fn delete_product(&self, session: &Session, command: DeleteProductCommand) -> Result<DeleteProductResult> {
        self.policy.authorize_write(session, "delete products")?;
        info!("Deleting product {}", command.id);

        let mut products = self.storage.load_products()?;
        let position = match products.iter().position(|product| product.id == command.id) {
            Some(position) => position,
            None => {
                warn!("Product {} not found, nothing deleted", command.id);
                return Err(InventoryError::ProductNotFound(command.id).into());
            }
        };

        let removed = products.remove(position);
        self.storage.save_products(&products)?;

        info!("Deleted product {} ('{}')", removed.id, removed.name);
        Ok(DeleteProductResult {
            success_message: format!("Product {} deleted successfully", removed.id),
            product: removed,
        })
    }

    /// Stable ascending sort of the stored collection; the new order is saved
    pub fn sort_products(&self, session: &Session, command: SortProductsCommand) -> Result<SortProductsResult> {
        self.policy.authorize_write(session, "sort products")?;
        info!("Sorting products by {}", command.key);

        let mut products = self.storage.load_products()?;
        sort_by_key(&mut products, command.key);
        self.storage.save_products(&products)?;

        Ok(SortProductsResult {
            products,
            success_message: format!("Products sorted by {} successfully", command.key),
        })
    }

    /// Sort using a key typed by the operator (name or menu number).
    /// An unknown key is rejected before anything is loaded.
    pub fn sort_products_by_input(&self, session: &Session, key: &str) -> Result<SortProductsResult> {
        let key = key
            .parse::<SortKey>()
            .map_err(InventoryError::UnknownSortKey)?;
        self.sort_products(session, SortProductsCommand { key })
    }

    /// Products with `quantity <= threshold`, in stored order
    pub fn low_stock(&self, query: LowStockQuery) -> Result<LowStockResult> {
        let products: Vec<Product> = self
            .storage
            .load_products()?
            .into_iter()
            .filter(|product| product.is_low_stock(query.threshold))
            .collect();

        info!("Found {} products at or below {} units", products.len(), query.threshold);
        Ok(LowStockResult {
            threshold: query.threshold,
            products,
        })
    }

    fn validate_fields(name: &str, category: &str, price: f64, quantity: i64) -> Result<(), InventoryError> {
        if !price.is_finite() || price < 0.0 {
            return Err(InventoryError::InvalidProduct(format!("price must be a non-negative number, got {}", price)));
        }
        if quantity < 0 {
            return Err(InventoryError::InvalidProduct(format!("quantity must not be negative, got {}", quantity)));
        }
        for (field, value) in [("name", name), ("category", category)] {
            if value.contains(['\n', '\r']) {
                return Err(InventoryError::InvalidProduct(format!("{} must be a single line", field)));
            }
        }
        Ok(())
    }
}

/// Stable ascending sort by one field
pub fn sort_by_key(products: &mut [Product], key: SortKey) {
    products.sort_by(|a, b| compare_by_key(a, b, key));
}

fn compare_by_key(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Name => a.name.cmp(&b.name),
        // adding 0.0 turns -0.0 into 0.0 so equal zero prices keep their order
        SortKey::Price => (a.price + 0.0).total_cmp(&(b.price + 0.0)),
        SortKey::Quantity => a.quantity.cmp(&b.quantity),
    }
}
