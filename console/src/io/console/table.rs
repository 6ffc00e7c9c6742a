//! Fixed-width text rendering of products and reports

use shared::{InventoryReport, Product};

const SEPARATOR_WIDTH: usize = 65;

/// One product as a fixed-width row
pub fn format_row(product: &Product) -> String {
    format!(
        "{:<10}{:<20}{:<15}{:>10.2}{:>10}",
        product.id, product.name, product.category, product.price, product.quantity
    )
}

pub fn format_header() -> String {
    format!(
        "{:<10}{:<20}{:<15}{:>10}{:>10}\n{}",
        "ID",
        "Name",
        "Category",
        "Price",
        "Quantity",
        "-".repeat(SEPARATOR_WIDTH)
    )
}

/// Header, separator and one row per product
pub fn format_table(products: &[Product]) -> String {
    let mut lines = vec![format_header()];
    lines.extend(products.iter().map(format_row));
    lines.join("\n")
}

pub fn format_report(report: &InventoryReport) -> String {
    let mut lines = vec![
        "--- Inventory Report ---".to_string(),
        format!("Total Inventory Value: ${:.2}", report.total_value),
        "Product Count by Category:".to_string(),
    ];
    lines.extend(
        report
            .category_counts
            .iter()
            .map(|(category, count)| format!("{}: {}", category, count)),
    );
    lines.join("\n")
}
