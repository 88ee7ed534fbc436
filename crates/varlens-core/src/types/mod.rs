//! Domain types for portfolio valuation and risk.

mod date;
mod holdings;
mod price;
mod ticker;

pub use date::Date;
pub use holdings::Holdings;
pub use price::{PricePoint, PriceSeries};
pub use ticker::Ticker;
