//! Tiered volume-discount pricing for the wholesale back office.
//!
//! Pure, synchronous calculations over in-memory product and tier data.
//! Callers persist tier configurations themselves; derived prices are
//! recomputed on every read.

pub mod config;
pub mod error;
pub mod group;
pub mod pricing;
pub mod product;
pub mod quote;
pub mod recommendation;
pub mod tier;

pub use config::{DuplicateTierPolicy, PricingConfig};
pub use error::{PricingError, PricingResult};
pub use group::{GroupOverride, GroupOverrides, PricingGroup};
pub use pricing::{NextTier, PriceBreak, PriceSource, PricingEngine, ResolvedPrice, Savings};
pub use product::{MarginWarning, TieredProduct};
pub use quote::{Quote, QuoteLine, QuotedLine};
pub use recommendation::{recommend_quantity, QuantityRecommendation, Recommendation};
pub use tier::{DiscountTier, TierSet};
