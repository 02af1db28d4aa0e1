pub mod models;
pub mod money;

pub use models::product::Product;
pub use money::{price_from_f64, quantity_from_f64, round_half_up, MoneyError};
