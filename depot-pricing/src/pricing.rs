use depot_shared::round_half_up;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::config::PricingConfig;
use crate::error::{PricingError, PricingResult};
use crate::tier::{DiscountTier, TierSet};

/// Where the tiers behind a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "groupId", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceSource {
    Product,
    Group(Uuid),
}

/// Unit price for one quantity. Derived on every read, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPrice {
    /// Base price the discount was taken from
    pub base_price: Decimal,
    pub unit_price: Decimal,
    /// Zero when no tier matched
    pub applied_discount_percent: Decimal,
    pub applied_tier: Option<DiscountTier>,
    pub source: PriceSource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Savings {
    pub regular_total: Decimal,
    pub discounted_total: Decimal,
    pub absolute: Decimal,
    pub percent: Decimal,
}

impl Savings {
    pub fn zero() -> Self {
        Self {
            regular_total: Decimal::ZERO,
            discounted_total: Decimal::ZERO,
            absolute: Decimal::ZERO,
            percent: Decimal::ZERO,
        }
    }
}

/// "Buy `units_needed` more to reach `tier`"
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTier {
    pub tier: DiscountTier,
    pub units_needed: i64,
}

/// One row of the price-break table shown next to a tier configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreak {
    pub min_quantity: u32,
    pub discount_percent: Decimal,
    pub unit_price: Decimal,
    pub unit_saving: Decimal,
}

/// Tiered volume-discount pricing engine.
///
/// Every method is a pure function of its arguments and the configuration,
/// so one engine can be shared freely between callers.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Build a tier set under the configured duplicate-threshold policy.
    pub fn tier_set(&self, tiers: Vec<DiscountTier>) -> PricingResult<TierSet> {
        TierSet::with_policy(tiers, self.config.duplicate_tiers)
    }

    /// Unit price for `quantity`: the tier with the largest `min_quantity`
    /// not above the quantity wins, otherwise the base price applies.
    pub fn resolve_price(&self, base_price: Decimal, tiers: &TierSet, quantity: i64) -> PricingResult<ResolvedPrice> {
        self.resolve_from(base_price, tiers, quantity, PriceSource::Product)
    }

    pub(crate) fn resolve_from(
        &self,
        base_price: Decimal,
        tiers: &TierSet,
        quantity: i64,
        source: PriceSource,
    ) -> PricingResult<ResolvedPrice> {
        validate_price(base_price)?;
        validate_quantity(quantity)?;

        let applied = tiers.applicable(quantity);
        let discount = applied.map_or(Decimal::ZERO, |tier| tier.discount_percent);
        let factor = Decimal::ONE - discount / Decimal::ONE_HUNDRED;
        let unit_price = round_half_up(base_price * factor, self.config.currency_scale);

        tracing::debug!(
            quantity,
            base_price = %base_price,
            discount_percent = %discount,
            unit_price = %unit_price,
            ?source,
            "Resolved unit price"
        );

        Ok(ResolvedPrice {
            base_price,
            unit_price,
            applied_discount_percent: discount,
            applied_tier: applied.cloned(),
            source,
        })
    }

    /// Savings against paying the base price for every unit.
    pub fn calculate_savings(&self, base_price: Decimal, tiers: &TierSet, quantity: i64) -> PricingResult<Savings> {
        let resolved = self.resolve_price(base_price, tiers, quantity)?;
        self.savings_for(&resolved, quantity)
    }

    pub(crate) fn savings_for(&self, resolved: &ResolvedPrice, quantity: i64) -> PricingResult<Savings> {
        // The regular unit is rounded like the discounted one so that
        // absolute savings can never dip below zero.
        let regular_unit = round_half_up(resolved.base_price, self.config.currency_scale);
        let regular_total = line_total(regular_unit, quantity)?;
        let discounted_total = line_total(resolved.unit_price, quantity)?;
        let absolute = regular_total - discounted_total;

        let percent = if regular_total.is_zero() {
            Decimal::ZERO
        } else {
            round_half_up(absolute / regular_total * Decimal::ONE_HUNDRED, self.config.percent_scale)
        };

        Ok(Savings {
            regular_total,
            discounted_total,
            absolute,
            percent,
        })
    }

    /// The next price break above `quantity`, if any.
    pub fn next_tier(&self, tiers: &TierSet, quantity: i64) -> PricingResult<Option<NextTier>> {
        validate_quantity(quantity)?;
        Ok(tiers.next_above(quantity).map(|tier| NextTier {
            tier: tier.clone(),
            units_needed: i64::from(tier.min_quantity) - quantity,
        }))
    }

    /// Unit price at each tier threshold.
    pub fn price_breaks(&self, base_price: Decimal, tiers: &TierSet) -> PricingResult<Vec<PriceBreak>> {
        validate_price(base_price)?;
        let regular_unit = round_half_up(base_price, self.config.currency_scale);

        tiers
            .iter()
            .map(|tier| {
                let resolved = self.resolve_price(base_price, tiers, i64::from(tier.min_quantity))?;
                Ok(PriceBreak {
                    min_quantity: tier.min_quantity,
                    discount_percent: tier.discount_percent,
                    unit_price: resolved.unit_price,
                    unit_saving: regular_unit - resolved.unit_price,
                })
            })
            .collect()
    }
}

pub(crate) fn validate_price(base_price: Decimal) -> PricingResult<()> {
    if base_price < Decimal::ZERO {
        return Err(PricingError::InvalidPrice(format!("{base_price} is negative")));
    }
    Ok(())
}

pub(crate) fn validate_quantity(quantity: i64) -> PricingResult<()> {
    if quantity < 0 {
        return Err(PricingError::InvalidQuantity(format!("{quantity} is negative")));
    }
    Ok(())
}

fn line_total(unit_price: Decimal, quantity: i64) -> PricingResult<Decimal> {
    unit_price
        .checked_mul(Decimal::from(quantity))
        .ok_or_else(|| PricingError::InvalidQuantity(format!("{quantity} units at {unit_price} overflows the total")))
}
