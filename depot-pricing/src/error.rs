use depot_shared::MoneyError;
use rust_decimal::Decimal;

/// Validation failures raised by the pricing engine.
///
/// Nothing here is transient; callers surface the message and stop.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("Invalid base price: {0}")]
    InvalidPrice(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Invalid tier at min quantity {min_quantity} ({discount_percent}%): {reason}")]
    InvalidTier {
        min_quantity: u32,
        discount_percent: Decimal,
        reason: String,
    },

    #[error("Ambiguous tiers at min quantity {min_quantity}: {higher}% and {lower}%")]
    AmbiguousTier {
        min_quantity: u32,
        higher: Decimal,
        lower: Decimal,
    },

    #[error("Tier at min quantity {min_quantity} gives {discount_percent}%, less than {previous_percent}% at a lower quantity")]
    NonMonotonicTiers {
        min_quantity: u32,
        discount_percent: Decimal,
        previous_percent: Decimal,
    },
}

impl PricingError {
    /// Map a boundary conversion failure on a price field.
    pub fn price(err: MoneyError) -> Self {
        Self::InvalidPrice(err.to_string())
    }

    /// Map a boundary conversion failure on a quantity field.
    pub fn quantity(err: MoneyError) -> Self {
        Self::InvalidQuantity(err.to_string())
    }
}

pub type PricingResult<T> = Result<T, PricingError>;
