use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::PricingResult;
use crate::pricing::{validate_price, PriceSource, PricingEngine, ResolvedPrice};
use crate::product::TieredProduct;
use crate::tier::TierSet;

/// Stores that share negotiated pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingGroup {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub store_ids: Vec<Uuid>,
}

/// Negotiated pricing of one product for one group.
///
/// `tiers` replaces the product's own tiers outright, even when empty;
/// `price`, when set, replaces the base price. Parsed tiers always reject
/// duplicate thresholds, see [`TierSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOverride {
    pub group_id: Uuid,
    pub product_id: Uuid,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub tiers: TierSet,
}

/// Group memberships and per-product overrides, keyed by `(group, product)`.
#[derive(Debug, Clone, Default)]
pub struct GroupOverrides {
    groups: HashMap<Uuid, PricingGroup>,
    overrides: HashMap<(Uuid, Uuid), GroupOverride>,
}

impl GroupOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_group(&mut self, group: PricingGroup) {
        self.groups.insert(group.id, group);
    }

    /// Add an override, replacing any earlier one for the same group and product.
    pub fn insert(&mut self, entry: GroupOverride) -> PricingResult<()> {
        if let Some(price) = entry.price {
            validate_price(price)?;
        }
        self.overrides.insert((entry.group_id, entry.product_id), entry);
        Ok(())
    }

    pub fn get(&self, group_id: Uuid, product_id: Uuid) -> Option<&GroupOverride> {
        self.overrides.get(&(group_id, product_id))
    }

    pub fn group(&self, group_id: Uuid) -> Option<&PricingGroup> {
        self.groups.get(&group_id)
    }

    /// The group a store buys under, if any.
    pub fn group_for_store(&self, store_id: Uuid) -> Option<&PricingGroup> {
        self.groups.values().find(|group| group.store_ids.contains(&store_id))
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl PricingEngine {
    /// Resolve a product price for a buying group. Falls back to the
    /// product's own base price and tiers when the group has no override.
    pub fn resolve_group_price(
        &self,
        product: &TieredProduct,
        overrides: &GroupOverrides,
        group_id: Uuid,
        quantity: i64,
    ) -> PricingResult<ResolvedPrice> {
        match overrides.get(group_id, product.id()) {
            Some(entry) => {
                let base_price = entry.price.unwrap_or(product.base_price());
                self.resolve_from(base_price, &entry.tiers, quantity, PriceSource::Group(group_id))
            }
            None => self.resolve_price(product.base_price(), &product.discount_tiers, quantity),
        }
    }

    /// Resolve a product price for a store through its group membership.
    pub fn resolve_store_price(
        &self,
        product: &TieredProduct,
        overrides: &GroupOverrides,
        store_id: Uuid,
        quantity: i64,
    ) -> PricingResult<ResolvedPrice> {
        match overrides.group_for_store(store_id) {
            Some(group) => self.resolve_group_price(product, overrides, group.id, quantity),
            None => self.resolve_price(product.base_price(), &product.discount_tiers, quantity),
        }
    }
}
