use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product as returned by the products API.
///
/// The pricing engine only reads this record; it is owned and persisted by
/// the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub base_price: Decimal,
    /// Selling unit, e.g. "case" or "kg"
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub estimated_profit_percent: Option<Decimal>,
}

impl Product {
    pub fn new(name: impl Into<String>, base_price: Decimal, unit: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            base_price,
            unit: unit.into(),
            category: category.into(),
            estimated_profit_percent: None,
        }
    }

    pub fn with_profit_estimate(mut self, percent: Decimal) -> Self {
        self.estimated_profit_percent = Some(percent);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_from_api_payload() {
        let payload = serde_json::json!({
            "id": "7d4e1b5a-3f4c-4b7e-9a51-0c2f1d9e8a10",
            "name": "Olive Oil 5L",
            "basePrice": 42.5,
            "unit": "case",
            "category": "pantry"
        });

        let product: Product = serde_json::from_value(payload).unwrap();
        assert_eq!(product.base_price, dec!(42.5));
        assert_eq!(product.unit, "case");
        assert!(product.estimated_profit_percent.is_none());
    }

    #[test]
    fn test_profit_estimate_builder() {
        let product = Product::new("Rice 25kg", dec!(30), "bag", "grains").with_profit_estimate(dec!(18));
        assert_eq!(product.estimated_profit_percent, Some(dec!(18)));
    }
}
