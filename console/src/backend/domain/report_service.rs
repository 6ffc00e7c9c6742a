use anyhow::Result;
use log::info;
use shared::{InventoryReport, Product};
use std::collections::BTreeMap;

use crate::backend::storage::traits::ProductStorage;

/// Read-only inventory summaries
#[derive(Debug, Clone)]
pub struct ReportService<S: ProductStorage> {
    storage: S,
}

impl<S: ProductStorage> ReportService<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Total stock value and record count per category of the stored collection
    pub fn generate_report(&self) -> Result<InventoryReport> {
        let products = self.storage.load_products()?;
        let report = summarize(&products);
        info!(
            "Generated report: {} products, total value {:.2}, {} categories",
            report.product_count,
            report.total_value,
            report.category_counts.len()
        );
        Ok(report)
    }
}

/// Categories are grouped by exact, case-sensitive match
pub fn summarize(products: &[Product]) -> InventoryReport {
    let mut category_counts = BTreeMap::new();
    let mut total_value = 0.0;

    for product in products {
        total_value += product.stock_value();
        *category_counts.entry(product.category.clone()).or_insert(0) += 1;
    }

    InventoryReport {
        total_value,
        category_counts,
        product_count: products.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::flat::test_utils::{sample_products, TestHelper};

    #[test]
    fn test_report_totals() {
        let report = summarize(&[
            Product::new(1, "X", "A", 2.0, 3),
            Product::new(2, "Y", "B", 5.0, 1),
        ]);

        assert_eq!(report.total_value, 11.0);
        assert_eq!(report.product_count, 2);
        assert_eq!(report.category_counts.get("A"), Some(&1));
        assert_eq!(report.category_counts.get("B"), Some(&1));
    }

    #[test]
    fn test_categories_are_case_sensitive() {
        let report = summarize(&[
            Product::new(1, "X", "Tools", 1.0, 0),
            Product::new(2, "Y", "tools", 1.0, 0),
            Product::new(3, "Z", "Tools", 1.0, 0),
        ]);

        assert_eq!(report.total_value, 0.0);
        let categories: Vec<(&str, usize)> =
            report.category_counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(categories, vec![("Tools", 2), ("tools", 1)]);
    }

    #[test]
    fn test_empty_collection() {
        let report = summarize(&[]);
        assert_eq!(report, InventoryReport::default());
    }

    #[test]
    fn test_generate_report_reads_store() {
        let helper = TestHelper::new().unwrap();
        helper.seed_products(&sample_products()).unwrap();
        let service = ReportService::new(helper.product_repo.clone());

        let report = service.generate_report().unwrap();
        assert_eq!(report.product_count, 4);
        assert_eq!(report.category_counts.get("Tools"), Some(&2));
        let expected = 12.5 * 40.0 + 0.05 * 1200.0 + 7.99 * 5.0 + 0.6 * 6.0;
        assert!((report.total_value - expected).abs() < 1e-9);
    }
}
