use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A single inventory record.
///
/// The same type is used by the flat-file store and the CSV interchange codec,
/// so a record read from one can be written to the other unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Intended unique key. Uniqueness is only checked when a product is created.
    pub id: i64,
    /// Free text, any characters except a line break
    pub name: String,
    /// Free text grouping key used by the inventory report (case-sensitive)
    pub category: String,
    /// Unit price, non-negative when entered through the console
    pub price: f64,
    /// Units in stock, non-negative when entered through the console
    pub quantity: i64,
}

impl Product {
    pub fn new(id: i64, name: impl Into<String>, category: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            price,
            quantity,
        }
    }

    /// Stock value of this record (`price * quantity`)
    pub fn stock_value(&self) -> f64 {
        self.price * self.quantity as f64
    }

    /// True when the record is at or below the given low-stock threshold
    pub fn is_low_stock(&self, threshold: i64) -> bool {
        self.quantity <= threshold
    }
}

/// Field a product collection can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Id,
    Name,
    Price,
    Quantity,
}

impl SortKey {
    /// All keys in menu order
    pub const ALL: [SortKey; 4] = [SortKey::Id, SortKey::Name, SortKey::Price, SortKey::Quantity];

    /// Map a 1-based menu number to a key
    pub fn from_menu_choice(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(SortKey::Id),
            2 => Some(SortKey::Name),
            3 => Some(SortKey::Price),
            4 => Some(SortKey::Quantity),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Name => "Name",
            SortKey::Price => "Price",
            SortKey::Quantity => "Quantity",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SortKey {
    type Err = String;

    /// Accepts the field name in any case, or the menu number
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(choice) = trimmed.parse::<u32>() {
            return SortKey::from_menu_choice(choice).ok_or_else(|| trimmed.to_string());
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "price" => Ok(SortKey::Price),
            "quantity" | "qty" => Ok(SortKey::Quantity),
            _ => Err(trimmed.to_string()),
        }
    }
}

/// Read-only inventory summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InventoryReport {
    /// Sum of `price * quantity` over every record
    pub total_value: f64,
    /// Number of records per category, ordered by category name
    pub category_counts: BTreeMap<String, usize>,
    /// Number of records in the collection
    pub product_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_value_and_low_stock() {
        let product = Product::new(1, "Widget", "Tools", 2.5, 4);
        assert_eq!(product.stock_value(), 10.0);
        assert!(product.is_low_stock(4));
        assert!(!product.is_low_stock(3));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price".parse::<SortKey>(), Ok(SortKey::Price));
        assert_eq!("NAME".parse::<SortKey>(), Ok(SortKey::Name));
        assert_eq!("1".parse::<SortKey>(), Ok(SortKey::Id));
        assert_eq!("4".parse::<SortKey>(), Ok(SortKey::Quantity));
        assert_eq!("5".parse::<SortKey>(), Err("5".to_string()));
        assert_eq!("colour".parse::<SortKey>(), Err("colour".to_string()));
    }

    #[test]
    fn test_menu_choice_mapping() {
        for (index, key) in SortKey::ALL.iter().enumerate() {
            assert_eq!(SortKey::from_menu_choice(index as u32 + 1), Some(*key));
        }
        assert_eq!(SortKey::from_menu_choice(0), None);
    }
}
