use depot_shared::Product;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tier::TierSet;

/// A catalog product together with its general bulk-discount tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredProduct {
    pub product: Product,
    #[serde(default)]
    pub discount_tiers: TierSet,
}

impl TieredProduct {
    pub fn new(product: Product, discount_tiers: TierSet) -> Self {
        Self { product, discount_tiers }
    }

    pub fn id(&self) -> Uuid {
        self.product.id
    }

    pub fn base_price(&self) -> Decimal {
        self.product.base_price
    }
}

/// A tier whose discount exceeds the product's estimated profit margin.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginWarning {
    pub product_id: Uuid,
    pub min_quantity: u32,
    pub discount_percent: Decimal,
    pub estimated_profit_percent: Decimal,
}

impl TieredProduct {
    /// Tiers that would sell below cost. Empty without a profit estimate.
    pub fn margin_warnings(&self) -> Vec<MarginWarning> {
        let Some(profit) = self.product.estimated_profit_percent else {
            return Vec::new();
        };

        self.discount_tiers
            .iter()
            .filter(|tier| tier.discount_percent > profit)
            .map(|tier| {
                tracing::warn!(
                    product_id = %self.product.id,
                    min_quantity = tier.min_quantity,
                    discount_percent = %tier.discount_percent,
                    estimated_profit_percent = %profit,
                    "Tier discount exceeds estimated profit"
                );
                MarginWarning {
                    product_id: self.product.id,
                    min_quantity: tier.min_quantity,
                    discount_percent: tier.discount_percent,
                    estimated_profit_percent: profit,
                }
            })
            .collect()
    }
}
