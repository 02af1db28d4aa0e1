use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a tier set treats two tiers with the same `min_quantity`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateTierPolicy {
    /// Fail with `AmbiguousTier` when the discounts differ
    #[default]
    Reject,
    /// Keep the tier with the higher discount
    KeepHighestDiscount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Decimal places of the currency minor unit
    pub currency_scale: u32,

    /// Decimal places kept on savings percentages
    pub percent_scale: u32,

    pub duplicate_tiers: DuplicateTierPolicy,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency_scale: 2,
            percent_scale: 2,
            duplicate_tiers: DuplicateTierPolicy::Reject,
        }
    }
}

impl PricingConfig {
    /// Load settings from `<dir>/pricing.{toml,json,yaml,..}` (optional),
    /// then from `DEPOT_PRICING__*` environment variables.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        let file = dir.as_ref().join("pricing");

        let s = config::Config::builder()
            .add_source(config::File::with_name(&file.to_string_lossy()).required(false))
            // Eg.. `DEPOT_PRICING__CURRENCY_SCALE=3`
            .add_source(
                config::Environment::with_prefix("DEPOT_PRICING")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        s.try_deserialize()
    }
}
