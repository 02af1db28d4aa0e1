use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::DuplicateTierPolicy;
use crate::error::{PricingError, PricingResult};

/// A price break: `discount_percent` off the base price from `min_quantity` units up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTier {
    pub min_quantity: u32,
    pub discount_percent: Decimal,
}

impl DiscountTier {
    pub fn new(min_quantity: u32, discount_percent: Decimal) -> Self {
        Self { min_quantity, discount_percent }
    }

    pub fn validate(&self) -> PricingResult<()> {
        let reason = if self.min_quantity == 0 {
            "min quantity must be positive"
        } else if self.discount_percent < Decimal::ZERO {
            "discount must not be negative"
        } else if self.discount_percent >= Decimal::ONE_HUNDRED {
            "discount must be below 100%"
        } else {
            return Ok(());
        };

        tracing::warn!(
            min_quantity = self.min_quantity,
            discount_percent = %self.discount_percent,
            reason,
            "Rejected discount tier"
        );
        Err(PricingError::InvalidTier {
            min_quantity: self.min_quantity,
            discount_percent: self.discount_percent,
            reason: reason.to_string(),
        })
    }
}

/// Validated tiers of one product or pricing group, ascending by `min_quantity`
/// with unique thresholds.
///
/// Deserializing runs the same validation as [`TierSet::new`], so a tier list
/// parsed from an API response is already well formed. The serde boundary is
/// always strict about duplicate thresholds; to apply a configured
/// [`DuplicateTierPolicy`], parse a `Vec<DiscountTier>` and build the set with
/// [`crate::PricingEngine::tier_set`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DiscountTier>", into = "Vec<DiscountTier>")]
pub struct TierSet {
    tiers: Vec<DiscountTier>,
}

impl TierSet {
    pub fn new(tiers: Vec<DiscountTier>) -> PricingResult<Self> {
        Self::with_policy(tiers, DuplicateTierPolicy::Reject)
    }

    pub fn with_policy(mut tiers: Vec<DiscountTier>, policy: DuplicateTierPolicy) -> PricingResult<Self> {
        for tier in &tiers {
            tier.validate()?;
        }

        // Within a threshold the higher discount sorts first.
        tiers.sort_by(|a, b| {
            a.min_quantity
                .cmp(&b.min_quantity)
                .then_with(|| b.discount_percent.cmp(&a.discount_percent))
        });

        let mut unique: Vec<DiscountTier> = Vec::with_capacity(tiers.len());
        for tier in tiers {
            match unique.last() {
                Some(prev) if prev.min_quantity == tier.min_quantity => {
                    if prev.discount_percent == tier.discount_percent {
                        continue;
                    }
                    match policy {
                        DuplicateTierPolicy::Reject => {
                            return Err(PricingError::AmbiguousTier {
                                min_quantity: tier.min_quantity,
                                higher: prev.discount_percent,
                                lower: tier.discount_percent,
                            });
                        }
                        DuplicateTierPolicy::KeepHighestDiscount => {
                            tracing::warn!(
                                min_quantity = tier.min_quantity,
                                kept = %prev.discount_percent,
                                dropped = %tier.discount_percent,
                                "Duplicate tier threshold collapsed"
                            );
                        }
                    }
                }
                _ => unique.push(tier),
            }
        }

        Ok(Self { tiers: unique })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DiscountTier> {
        self.tiers.iter()
    }

    pub fn as_slice(&self) -> &[DiscountTier] {
        &self.tiers
    }

    /// The tier with the largest `min_quantity` not exceeding `quantity`.
    pub fn applicable(&self, quantity: i64) -> Option<&DiscountTier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| i64::from(tier.min_quantity) <= quantity)
    }

    /// The first tier whose threshold is above `quantity`.
    pub fn next_above(&self, quantity: i64) -> Option<&DiscountTier> {
        self.tiers
            .iter()
            .find(|tier| i64::from(tier.min_quantity) > quantity)
    }

    /// Insert `tier`, replacing any tier at the same threshold.
    pub fn with_tier(&self, tier: DiscountTier) -> PricingResult<Self> {
        tier.validate()?;
        let mut tiers: Vec<DiscountTier> = self
            .tiers
            .iter()
            .filter(|t| t.min_quantity != tier.min_quantity)
            .cloned()
            .collect();
        tiers.push(tier);
        tiers.sort_by_key(|t| t.min_quantity);
        Ok(Self { tiers })
    }

    pub fn without_tier(&self, min_quantity: u32) -> Self {
        Self {
            tiers: self
                .tiers
                .iter()
                .filter(|t| t.min_quantity != min_quantity)
                .cloned()
                .collect(),
        }
    }

    /// True when buying more never lowers the discount.
    pub fn is_monotonic(&self) -> bool {
        self.tiers
            .windows(2)
            .all(|pair| pair[0].discount_percent <= pair[1].discount_percent)
    }

    /// Check run before a tier configuration is submitted for persistence.
    pub fn validate_for_save(&self) -> PricingResult<()> {
        for pair in self.tiers.windows(2) {
            if pair[1].discount_percent < pair[0].discount_percent {
                return Err(PricingError::NonMonotonicTiers {
                    min_quantity: pair[1].min_quantity,
                    discount_percent: pair[1].discount_percent,
                    previous_percent: pair[0].discount_percent,
                });
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<DiscountTier>> for TierSet {
    type Error = PricingError;

    fn try_from(tiers: Vec<DiscountTier>) -> Result<Self, Self::Error> {
        Self::new(tiers)
    }
}

impl From<TierSet> for Vec<DiscountTier> {
    fn from(set: TierSet) -> Self {
        set.tiers
    }
}

impl<'a> IntoIterator for &'a TierSet {
    type Item = &'a DiscountTier;
    type IntoIter = std::slice::Iter<'a, DiscountTier>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn tier(min_quantity: u32, discount: Decimal) -> DiscountTier {
        DiscountTier::new(min_quantity, discount)
    }

    #[test]
    fn test_sorts_ascending() {
        let set = TierSet::new(vec![tier(50, dec!(12)), tier(5, dec!(5)), tier(10, dec!(10))]).unwrap();
        let thresholds: Vec<u32> = set.iter().map(|t| t.min_quantity).collect();
        assert_eq!(thresholds, vec![5, 10, 50]);
    }

    #[test]
    fn test_rejects_invalid_tiers() {
        for bad in [tier(0, dec!(5)), tier(5, dec!(-1)), tier(5, dec!(100)), tier(5, dec!(150))] {
            let err = TierSet::new(vec![bad]).unwrap_err();
            assert!(matches!(err, PricingError::InvalidTier { .. }), "{err}");
        }
        assert!(TierSet::new(vec![tier(1, dec!(99.99))]).is_ok());
        assert!(TierSet::new(vec![tier(1, dec!(0))]).is_ok());
    }

    #[test]
    fn test_duplicate_thresholds() {
        let tiers = vec![tier(10, dec!(5)), tier(10, dec!(8))];

        // Reported by size, whatever the input order
        let expected = PricingError::AmbiguousTier { min_quantity: 10, higher: dec!(8), lower: dec!(5) };
        assert_eq!(TierSet::new(tiers.clone()).unwrap_err(), expected);
        let reversed: Vec<DiscountTier> = tiers.iter().rev().cloned().collect();
        assert_eq!(TierSet::new(reversed).unwrap_err(), expected);

        let set = TierSet::with_policy(tiers, DuplicateTierPolicy::KeepHighestDiscount).unwrap();
        assert_eq!(set.as_slice(), &[tier(10, dec!(8))]);

        // Exact repeats are not ambiguous
        let set = TierSet::new(vec![tier(10, dec!(5)), tier(10, dec!(5.0))]).unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_applicable_and_next() {
        let set = TierSet::new(vec![tier(5, dec!(5)), tier(10, dec!(10))]).unwrap();
        assert!(set.applicable(4).is_none());
        assert_eq!(set.applicable(5).unwrap().min_quantity, 5);
        assert_eq!(set.applicable(9).unwrap().min_quantity, 5);
        assert_eq!(set.applicable(10_000).unwrap().min_quantity, 10);

        assert_eq!(set.next_above(0).unwrap().min_quantity, 5);
        assert_eq!(set.next_above(5).unwrap().min_quantity, 10);
        assert!(set.next_above(10).is_none());
    }

    #[test]
    fn test_editing_returns_new_sets() {
        let set = TierSet::new(vec![tier(5, dec!(5))]).unwrap();

        let edited = set.with_tier(tier(5, dec!(7))).unwrap().with_tier(tier(2, dec!(1))).unwrap();
        assert_eq!(edited.as_slice(), &[tier(2, dec!(1)), tier(5, dec!(7))]);
        assert_eq!(set.as_slice(), &[tier(5, dec!(5))]);

        assert!(set.with_tier(tier(8, dec!(100))).is_err());
        assert_eq!(edited.without_tier(5).as_slice(), &[tier(2, dec!(1))]);
    }

    #[test]
    fn test_save_blocks_shrinking_discounts() {
        let good = TierSet::new(vec![tier(5, dec!(5)), tier(10, dec!(5)), tier(20, dec!(9))]).unwrap();
        assert!(good.is_monotonic());
        assert!(good.validate_for_save().is_ok());

        let bad = TierSet::new(vec![tier(5, dec!(8)), tier(10, dec!(6))]).unwrap();
        assert!(!bad.is_monotonic());
        assert_eq!(
            bad.validate_for_save(),
            Err(PricingError::NonMonotonicTiers {
                min_quantity: 10,
                discount_percent: dec!(6),
                previous_percent: dec!(8),
            })
        );
    }

    #[test]
    fn test_serde_boundary() {
        let set: TierSet = serde_json::from_str(
            r#"[{"minQuantity":10,"discountPercent":10},{"minQuantity":5,"discountPercent":5}]"#,
        )
        .unwrap();
        assert_eq!(set.as_slice()[0], tier(5, dec!(5)));

        assert!(serde_json::from_str::<TierSet>(r#"[{"minQuantity":5,"discountPercent":150}]"#).is_err());
        assert!(serde_json::from_str::<TierSet>(r#"[{"minQuantity":-5,"discountPercent":5}]"#).is_err());

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json[1]["minQuantity"], 10);
    }
}
