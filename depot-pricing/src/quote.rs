use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{PricingError, PricingResult};
use crate::group::GroupOverrides;
use crate::pricing::{PricingEngine, ResolvedPrice, Savings};
use crate::product::TieredProduct;

/// One cart or purchase-order line to price.
#[derive(Debug, Clone, Copy)]
pub struct QuoteLine<'a> {
    pub product: &'a TieredProduct,
    pub quantity: i64,
    /// Buying group whose overrides apply to this line
    pub group_id: Option<Uuid>,
}

impl<'a> QuoteLine<'a> {
    pub fn new(product: &'a TieredProduct, quantity: i64) -> Self {
        Self { product, quantity, group_id: None }
    }

    pub fn for_group(mut self, group_id: Uuid) -> Self {
        self.group_id = Some(group_id);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotedLine {
    pub product_id: Uuid,
    pub quantity: i64,
    pub price: ResolvedPrice,
    pub savings: Savings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub lines: Vec<QuotedLine>,
    pub regular_total: Decimal,
    pub total: Decimal,
    pub total_savings: Decimal,
}

impl PricingEngine {
    /// Re-price every line of a cart. The first invalid line fails the quote.
    pub fn quote(&self, lines: &[QuoteLine<'_>], overrides: &GroupOverrides) -> PricingResult<Quote> {
        let mut quoted = Vec::with_capacity(lines.len());
        let mut regular_total = Decimal::ZERO;
        let mut total = Decimal::ZERO;

        for line in lines {
            let price = match line.group_id {
                Some(group_id) => self.resolve_group_price(line.product, overrides, group_id, line.quantity),
                None => self.resolve_price(line.product.base_price(), &line.product.discount_tiers, line.quantity),
            }
            .inspect_err(|err| {
                tracing::warn!(product_id = %line.product.id(), error = %err, "Quote line rejected");
            })?;
            let savings = self.savings_for(&price, line.quantity)?;

            regular_total = add_to_total(regular_total, savings.regular_total)?;
            total = add_to_total(total, savings.discounted_total)?;
            quoted.push(QuotedLine {
                product_id: line.product.id(),
                quantity: line.quantity,
                price,
                savings,
            });
        }

        Ok(Quote {
            lines: quoted,
            regular_total,
            total,
            total_savings: regular_total - total,
        })
    }
}

fn add_to_total(total: Decimal, line: Decimal) -> PricingResult<Decimal> {
    total
        .checked_add(line)
        .ok_or_else(|| PricingError::InvalidQuantity(format!("adding {line} overflows the quote total")))
}
