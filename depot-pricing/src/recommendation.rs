use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::PricingResult;
use crate::pricing::{PricingEngine, Savings};
use crate::tier::TierSet;

/// Tier threshold with the most discount per unit of commitment.
///
/// `quantity == 0` means no recommendation is available.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantityRecommendation {
    pub quantity: u32,
    pub value_ratio: Decimal,
}

impl QuantityRecommendation {
    pub fn none() -> Self {
        Self { quantity: 0, value_ratio: Decimal::ZERO }
    }

    pub fn is_available(&self) -> bool {
        self.quantity > 0
    }
}

/// Recommendation with the savings a buyer gets by ordering that quantity.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended_quantity: u32,
    pub value_ratio: Decimal,
    pub projected_savings: Savings,
}

/// Pick the tier maximizing `discount_percent / min_quantity`.
///
/// Ties keep the first tier in order, which for a `TierSet` is the lowest threshold.
pub fn recommend_quantity(tiers: &TierSet) -> QuantityRecommendation {
    let mut best: Option<QuantityRecommendation> = None;

    for tier in tiers {
        let value_ratio = tier.discount_percent / Decimal::from(tier.min_quantity);
        if best.as_ref().map_or(true, |b| value_ratio > b.value_ratio) {
            best = Some(QuantityRecommendation {
                quantity: tier.min_quantity,
                value_ratio,
            });
        }
    }

    best.unwrap_or_else(QuantityRecommendation::none)
}

impl PricingEngine {
    pub fn recommend_quantity(&self, tiers: &TierSet) -> QuantityRecommendation {
        recommend_quantity(tiers)
    }

    /// Recommended quantity plus the savings projected at that quantity.
    pub fn recommend(&self, base_price: Decimal, tiers: &TierSet) -> PricingResult<Recommendation> {
        let pick = recommend_quantity(tiers);
        let projected_savings = self.calculate_savings(base_price, tiers, i64::from(pick.quantity))?;

        tracing::debug!(
            quantity = pick.quantity,
            value_ratio = %pick.value_ratio,
            savings = %projected_savings.absolute,
            "Recommended order quantity"
        );

        Ok(Recommendation {
            recommended_quantity: pick.quantity,
            value_ratio: pick.value_ratio,
            projected_savings,
        })
    }
}
