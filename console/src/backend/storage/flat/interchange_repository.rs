//! # CSV Interchange Repository
//!
//! Reads and writes the interchange file used to move records in and out of
//! external tools. The file is never the backing store.
//!
//! ## File Format
//!
//! ```csv
//! ID,Name,Category,Price,Quantity
//! 101,Claw Hammer,Tools,12.5,40
//! 102,"Screws, wood",Fasteners,0.05,1200
//! ```
//!
//! Fields are only quoted when they contain a comma, a quote or a line break,
//! so plain records come out exactly as `id,name,category,price,quantity`.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Writer};
use log::{debug, info};
use shared::Product;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::connection::DataConnection;
use crate::backend::domain::error::InventoryError;
use crate::backend::storage::traits::InterchangeStorage;

pub const INTERCHANGE_HEADER: [&str; 5] = ["ID", "Name", "Category", "Price", "Quantity"];

#[derive(Debug, Clone)]
pub struct InterchangeRepository {
    connection: DataConnection,
}

impl InterchangeRepository {
    pub fn new(connection: DataConnection) -> Self {
        Self { connection }
    }

    /// Convert one CSV row into a product, failing on the first bad field
    fn parse_record(record: &StringRecord, line: u64) -> Result<Product, InventoryError> {
        let field = |index: usize| record.get(index).unwrap_or("");
        let malformed = |reason: String| InventoryError::MalformedInterchange { line, reason };

        let id = field(0)
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed(format!("invalid ID '{}'", field(0))))?;
        let price = field(3)
            .trim()
            .parse::<f64>()
            .map_err(|_| malformed(format!("invalid Price '{}'", field(3))))?;
        let quantity = field(4)
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed(format!("invalid Quantity '{}'", field(4))))?;

        Ok(Product {
            id,
            name: field(1).to_string(),
            category: field(2).to_string(),
            price,
            quantity,
        })
    }
}

impl InterchangeStorage for InterchangeRepository {
    fn location(&self) -> &Path {
        self.connection.interchange_file_path()
    }

    fn export_products(&self, products: &[Product]) -> Result<usize> {
        let file_path = self.connection.interchange_file_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(file_path)
            .with_context(|| format!("Could not export to {:?}", file_path))?;

        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record(INTERCHANGE_HEADER)?;

        for product in products {
            csv_writer.write_record(&[
                product.id.to_string(),
                product.name.clone(),
                product.category.clone(),
                product.price.to_string(),
                product.quantity.to_string(),
            ])?;
        }

        csv_writer
            .flush()
            .with_context(|| format!("Could not write {:?}", file_path))?;

        info!("Exported {} products to {:?}", products.len(), file_path);
        Ok(products.len())
    }

    fn import_products(&self) -> Result<Vec<Product>> {
        let file_path = self.connection.interchange_file_path();

        let file = File::open(file_path)
            .with_context(|| format!("Could not open {:?}", file_path))?;

        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(BufReader::new(file));

        let mut products = Vec::new();
        for result in csv_reader.records() {
            let record = result.map_err(|e| InventoryError::MalformedInterchange {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.len() != INTERCHANGE_HEADER.len() {
                return Err(InventoryError::MalformedInterchange {
                    line,
                    reason: format!("expected {} fields, found {}", INTERCHANGE_HEADER.len(), record.len()),
                }
                .into());
            }

            products.push(Self::parse_record(&record, line)?);
        }

        debug!("Read {} products from {:?}", products.len(), file_path);
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::flat::test_utils::{sample_products, TestEnvironment};
    use std::fs;

    fn setup_test_repo() -> (InterchangeRepository, TestEnvironment) {
        let env = TestEnvironment::new().unwrap();
        let repo = InterchangeRepository::new(env.connection.clone());
        (repo, env)
    }

    fn malformed_line(err: &anyhow::Error) -> Option<u64> {
        match err.downcast_ref::<InventoryError>() {
            Some(InventoryError::MalformedInterchange { line, .. }) => Some(*line),
            _ => None,
        }
    }

    #[test]
    fn test_export_writes_header_and_plain_rows() {
        let (repo, env) = setup_test_repo();
        let products = vec![
            Product::new(1, "Claw Hammer", "Tools", 12.5, 40),
            Product::new(2, "Wood Glue", "Adhesives", 3.0, 0),
        ];

        let written = repo.export_products(&products).unwrap();
        assert_eq!(written, 2);

        let content = fs::read_to_string(env.connection.interchange_file_path()).unwrap();
        assert_eq!(
            content,
            "ID,Name,Category,Price,Quantity\n1,Claw Hammer,Tools,12.5,40\n2,Wood Glue,Adhesives,3,0\n"
        );
    }

    #[test]
    fn test_export_then_import() {
        let (repo, _env) = setup_test_repo();
        repo.export_products(&sample_products()).unwrap();

        let imported = repo.import_products().unwrap();
        assert_eq!(imported, sample_products());
    }

    #[test]
    fn test_commas_in_text_survive_with_quoting() {
        let (repo, env) = setup_test_repo();
        let products = vec![Product::new(4, "Screws, wood", "Fasteners \"premium\"", 0.05, 1200)];

        repo.export_products(&products).unwrap();
        let content = fs::read_to_string(env.connection.interchange_file_path()).unwrap();
        assert!(content.contains("\"Screws, wood\""));

        assert_eq!(repo.import_products().unwrap(), products);
    }

    #[test]
    fn test_import_reads_hand_written_file() {
        let (repo, env) = setup_test_repo();
        fs::write(
            env.connection.interchange_file_path(),
            "id,name,category,price,quantity\n10, Pliers ,Tools, 8.75 , 3\n",
        )
        .unwrap();

        let imported = repo.import_products().unwrap();
        assert_eq!(imported, vec![Product::new(10, " Pliers ", "Tools", 8.75, 3)]);
    }

    #[test]
    fn test_import_missing_file_is_error() {
        let (repo, _env) = setup_test_repo();
        let err = repo.import_products().unwrap_err();
        assert!(malformed_line(&err).is_none());
    }

    #[test]
    fn test_import_rejects_bad_number() {
        let (repo, env) = setup_test_repo();
        fs::write(
            env.connection.interchange_file_path(),
            "ID,Name,Category,Price,Quantity\n1,A,Cat,1.0,1\n2,B,Cat,cheap,1\n",
        )
        .unwrap();

        let err = repo.import_products().unwrap_err();
        assert_eq!(malformed_line(&err), Some(3));
    }

    #[test]
    fn test_import_rejects_wrong_field_count() {
        let (repo, env) = setup_test_repo();
        fs::write(
            env.connection.interchange_file_path(),
            "ID,Name,Category,Price,Quantity\n1,A,Cat,1.0\n",
        )
        .unwrap();

        let err = repo.import_products().unwrap_err();
        assert!(malformed_line(&err).is_some());
    }
}
