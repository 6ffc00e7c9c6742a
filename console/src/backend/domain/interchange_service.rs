//! CSV export and import of the product collection.
//!
//! Export copies the stored collection to the interchange file. Import reads
//! the interchange file and appends every record to the stored collection,
//! without checking for duplicate ids.

use anyhow::Result;
use log::{error, info};

use crate::backend::domain::commands::interchange::{ExportProductsResult, ImportProductsResult};
use crate::backend::domain::models::{AccessPolicy, Session};
use crate::backend::storage::traits::{InterchangeStorage, ProductStorage};

#[derive(Debug, Clone)]
pub struct InterchangeService<P: ProductStorage, I: InterchangeStorage> {
    product_storage: P,
    interchange_storage: I,
    policy: AccessPolicy,
}

impl<P: ProductStorage, I: InterchangeStorage> InterchangeService<P, I> {
    pub fn new(product_storage: P, interchange_storage: I, policy: AccessPolicy) -> Self {
        Self {
            product_storage,
            interchange_storage,
            policy,
        }
    }

    /// Write the stored collection to the interchange file
    pub fn export_products(&self) -> Result<ExportProductsResult> {
        let path = self.interchange_storage.location().to_path_buf();
        info!("EXPORT: exporting products to {:?}", path);

        let products = self.product_storage.load_products()?;
        let exported_count = self.interchange_storage.export_products(&products).map_err(|e| {
            error!("EXPORT: failed to write {:?}: {:#}", path, e);
            e
        })?;

        Ok(ExportProductsResult {
            success_message: format!("{} products exported to '{}'", exported_count, path.display()),
            path,
            exported_count,
        })
    }

    /// Append every record of the interchange file to the stored collection.
    ///
    /// The whole file is parsed before anything is saved, so a malformed line
    /// leaves the stored collection untouched.
    pub fn import_products(&self, session: &Session) -> Result<ImportProductsResult> {
        self.policy.authorize_write(session, "import products")?;
        let path = self.interchange_storage.location().to_path_buf();
        info!("IMPORT: importing products from {:?}", path);

        let imported = self.interchange_storage.import_products().map_err(|e| {
            error!("IMPORT: failed to read {:?}: {:#}", path, e);
            e
        })?;

        let mut products = self.product_storage.load_products()?;
        let imported_count = imported.len();
        products.extend(imported);
        self.product_storage.save_products(&products)?;

        info!("IMPORT: appended {} products, {} stored", imported_count, products.len());
        Ok(ImportProductsResult {
            imported_count,
            total_count: products.len(),
            success_message: format!("{} products imported from '{}'", imported_count, path.display()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::error::{inventory_error, InventoryError};
    use crate::backend::domain::models::Role;
    use crate::backend::storage::flat::test_utils::{sample_products, TestHelper};
    use crate::backend::storage::{InterchangeRepository, ProductRepository};
    use shared::Product;
    use std::fs;

    fn setup_test() -> (InterchangeService<ProductRepository, InterchangeRepository>, TestHelper) {
        let helper = TestHelper::new().expect("Failed to create test helper");
        let service = InterchangeService::new(
            helper.product_repo.clone(),
            helper.interchange_repo.clone(),
            AccessPolicy::default(),
        );
        (service, helper)
    }

    fn admin() -> Session {
        Session::new("admin", Role::Admin)
    }

    #[test]
    fn test_export_then_import_appends() {
        let (service, helper) = setup_test();
        helper.seed_products(&sample_products()).unwrap();

        let exported = service.export_products().unwrap();
        assert_eq!(exported.exported_count, 4);
        assert_eq!(exported.path, helper.env.connection.interchange_file_path());

        let imported = service.import_products(&admin()).unwrap();
        assert_eq!(imported.imported_count, 4);
        assert_eq!(imported.total_count, 8);

        let mut expected = sample_products();
        expected.extend(sample_products());
        assert_eq!(helper.stored_products(), expected);
    }

    #[test]
    fn test_export_never_touches_backing_file() {
        let (service, helper) = setup_test();
        helper.seed_products(&sample_products()).unwrap();
        let before = helper.env.products_file_content();

        service.export_products().unwrap();

        assert_eq!(helper.env.products_file_content(), before);
    }

    #[test]
    fn test_import_into_empty_store() {
        let (service, helper) = setup_test();
        fs::write(
            helper.env.connection.interchange_file_path(),
            "ID,Name,Category,Price,Quantity\n1,Level,Tools,15,2\n",
        )
        .unwrap();

        service.import_products(&admin()).unwrap();
        assert_eq!(helper.stored_products(), vec![Product::new(1, "Level", "Tools", 15.0, 2)]);
    }

    #[test]
    fn test_malformed_import_writes_nothing() {
        let (service, helper) = setup_test();
        helper.seed_products(&sample_products()).unwrap();
        let before = helper.env.products_file_content();
        fs::write(
            helper.env.connection.interchange_file_path(),
            "ID,Name,Category,Price,Quantity\n1,Level,Tools,15,2\nx,Broken,Tools,1,1\n",
        )
        .unwrap();

        let err = service.import_products(&admin()).unwrap_err();
        assert!(matches!(
            inventory_error(&err),
            Some(InventoryError::MalformedInterchange { line: 3, .. })
        ));
        assert_eq!(helper.env.products_file_content(), before);
    }

    #[test]
    fn test_import_without_file_fails() {
        let (service, helper) = setup_test();
        helper.seed_products(&sample_products()).unwrap();

        assert!(service.import_products(&admin()).is_err());
        assert_eq!(helper.stored_products(), sample_products());
    }

    #[test]
    fn test_import_keeps_duplicate_ids() {
        let (service, helper) = setup_test();
        helper.seed_products(&[Product::new(1, "Old", "A", 1.0, 1)]).unwrap();
        fs::write(
            helper.env.connection.interchange_file_path(),
            "ID,Name,Category,Price,Quantity\n1,New,A,2,2\n",
        )
        .unwrap();

        service.import_products(&admin()).unwrap();
        let stored = helper.stored_products();
        assert_eq!(stored.len(), 2);
        assert!(stored.iter().all(|p| p.id == 1));
    }
}
