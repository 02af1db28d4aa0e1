//! Conversions applied where REST payloads enter the back office.
//!
//! JSON numbers arrive as `f64`; everything past this boundary works in
//! `Decimal` money and whole-unit quantities.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MoneyError {
    #[error("Value is not a finite number: {0}")]
    NonFinite(f64),

    #[error("Value must not be negative: {0}")]
    Negative(f64),

    #[error("Quantity must be a whole number: {0}")]
    Fractional(f64),

    #[error("Quantity is out of range: {0}")]
    OutOfRange(f64),
}

/// 2^63, the first `f64` above every `i64`
const QUANTITY_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Convert an API price into a `Decimal`, rejecting NaN, infinities and negatives.
pub fn price_from_f64(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NonFinite(value));
    }
    if value < 0.0 {
        return Err(MoneyError::Negative(value));
    }
    Decimal::from_f64(value).ok_or(MoneyError::NonFinite(value))
}

/// Convert an API quantity into whole units.
pub fn quantity_from_f64(value: f64) -> Result<i64, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NonFinite(value));
    }
    if value < 0.0 {
        return Err(MoneyError::Negative(value));
    }
    if value >= QUANTITY_LIMIT {
        return Err(MoneyError::OutOfRange(value));
    }
    if value.fract() != 0.0 {
        return Err(MoneyError::Fractional(value));
    }
    Ok(value as i64)
}

/// Round to `scale` decimal places, halves away from zero (half-up for the
/// non-negative amounts shown on screen).
pub fn round_half_up(value: Decimal, scale: u32) -> Decimal {
    value.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_boundary() {
        assert_eq!(price_from_f64(9.5).unwrap(), dec!(9.5));
        assert_eq!(price_from_f64(0.0).unwrap(), Decimal::ZERO);
        assert_eq!(price_from_f64(-1.0), Err(MoneyError::Negative(-1.0)));
        assert!(matches!(price_from_f64(f64::NAN), Err(MoneyError::NonFinite(_))));
        assert!(matches!(price_from_f64(f64::INFINITY), Err(MoneyError::NonFinite(_))));
    }

    #[test]
    fn test_quantity_boundary() {
        assert_eq!(quantity_from_f64(12.0).unwrap(), 12);
        assert_eq!(quantity_from_f64(2.5), Err(MoneyError::Fractional(2.5)));
        assert_eq!(quantity_from_f64(-3.0), Err(MoneyError::Negative(-3.0)));
        assert!(matches!(quantity_from_f64(f64::NEG_INFINITY), Err(MoneyError::NonFinite(_))));
    }

    #[test]
    fn test_quantity_above_i64_is_rejected() {
        assert_eq!(quantity_from_f64(9223372036854775808.0), Err(MoneyError::OutOfRange(9223372036854775808.0)));
        assert_eq!(quantity_from_f64(1e19), Err(MoneyError::OutOfRange(1e19)));
        // Largest f64 below 2^63
        assert_eq!(quantity_from_f64(9223372036854774784.0), Ok(9_223_372_036_854_774_784));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(dec!(2.345), 2), dec!(2.35));
        assert_eq!(round_half_up(dec!(2.344), 2), dec!(2.34));
        assert_eq!(round_half_up(dec!(0.125), 2), dec!(0.13));
    }
}
