//! # Flat-File Product Repository
//!
//! The backing file stores records back to back with no separator beyond the
//! fixed field count:
//!
//! ```text
//! 101            <- id
//! Claw Hammer    <- name (whole line)
//! Tools          <- category (whole line)
//! 12.5           <- price
//! 40             <- quantity
//! 102
//! ...
//! ```
//!
//! The id, price and quantity are whitespace-delimited tokens, so a file where
//! price and quantity share a line loads the same way. Text fields are whole
//! lines and therefore cannot contain line breaks.
//!
//! Anything after the id token on its line is ignored; the name is always the
//! following line. Hand-edited files that put the name on the id line (`7 Bolt`)
//! therefore lose that text instead of having it read as the name.
//!
//! Invalid UTF-8 is replaced with U+FFFD on load and logged, so the next save
//! writes the replaced text back.

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use shared::Product;
use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};

use super::connection::DataConnection;
use crate::backend::storage::traits::ProductStorage;

/// Flat-text product repository backed by a single file
#[derive(Debug, Clone)]
pub struct ProductRepository {
    connection: DataConnection,
}

impl ProductRepository {
    pub fn new(connection: DataConnection) -> Self {
        Self { connection }
    }

    /// Parse the backing file format.
    ///
    /// Parsing stops at the first record that is truncated or has a numeric
    /// field that does not parse; everything before it is returned.
    pub fn parse_records(content: &str) -> Vec<Product> {
        let mut lines = content.lines();
        let mut products = Vec::new();

        loop {
            // id: first token on the next non-blank line, rest of the line ignored
            let id_token = match lines.by_ref().find_map(|line| line.split_whitespace().next()) {
                Some(token) => token,
                None => break,
            };
            let id = match id_token.parse::<i64>() {
                Ok(id) => id,
                Err(_) => {
                    warn!("Stopped reading products: '{}' is not a valid id", id_token);
                    break;
                }
            };

            let (name, category) = match (lines.next(), lines.next()) {
                (Some(name), Some(category)) => (name.to_string(), category.to_string()),
                _ => {
                    warn!("Stopped reading products: record {} is truncated", id);
                    break;
                }
            };

            let mut numbers: Vec<&str> = Vec::with_capacity(2);
            while numbers.len() < 2 {
                match lines.next() {
                    Some(line) => {
                        let needed = 2 - numbers.len();
                        numbers.extend(line.split_whitespace().take(needed));
                    }
                    None => break,
                }
            }
            if numbers.len() < 2 {
                warn!("Stopped reading products: record {} is missing price or quantity", id);
                break;
            }

            let (price, quantity) = match (numbers[0].parse::<f64>(), numbers[1].parse::<i64>()) {
                (Ok(price), Ok(quantity)) => (price, quantity),
                _ => {
                    warn!(
                        "Stopped reading products: record {} has invalid price '{}' or quantity '{}'",
                        id, numbers[0], numbers[1]
                    );
                    break;
                }
            };

            products.push(Product {
                id,
                name,
                category,
                price,
                quantity,
            });
        }

        products
    }

    /// Render records in the backing file format.
    ///
    /// Prices use the shortest text that parses back to the same value.
    pub fn format_records(products: &[Product]) -> Result<String> {
        let mut content = String::new();
        for product in products {
            for (field, value) in [("name", &product.name), ("category", &product.category)] {
                if value.contains(['\n', '\r']) {
                    bail!("Product {} has a line break in its {} field", product.id, field);
                }
            }
            content.push_str(&format!(
                "{}\n{}\n{}\n{}\n{}\n",
                product.id, product.name, product.category, product.price, product.quantity
            ));
        }
        Ok(content)
    }
}

impl ProductStorage for ProductRepository {
    fn load_products(&self) -> Result<Vec<Product>> {
        let file_path = self.connection.products_file_path();

        let bytes = match fs::read(file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No products file at {:?}, starting empty", file_path);
                return Ok(Vec::new());
            }
            Err(e) => {
                warn!("Could not open products file {:?}: {}", file_path, e);
                return Ok(Vec::new());
            }
        };

        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Products file {:?} is not valid UTF-8 (first bad byte at {}), replacing invalid sequences",
                    file_path,
                    e.utf8_error().valid_up_to()
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        let products = Self::parse_records(&content);
        debug!("Loaded {} products from {:?}", products.len(), file_path);
        Ok(products)
    }

    fn save_products(&self, products: &[Product]) -> Result<()> {
        let file_path = self.connection.products_file_path();
        let content = Self::format_records(products)?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file_path)
            .with_context(|| format!("Could not save products to {:?}", file_path))?;

        let mut writer = BufWriter::new(file);
        writer
            .write_all(content.as_bytes())
            .and_then(|_| writer.flush())
            .with_context(|| format!("Could not write products to {:?}", file_path))?;

        info!("Saved {} products to {:?}", products.len(), file_path);
        Ok(())
    }
}
