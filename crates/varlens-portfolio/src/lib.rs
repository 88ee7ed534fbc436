//! # Varlens Portfolio
//!
//! Portfolio valuation for the Varlens risk library.
//!
//! A [`PortfolioValuator`] owns a set of [`Holdings`] and a handle to a
//! [`PriceStore`]. Each valuation call asks the store for the latest close of
//! every held ticker and multiplies it by the quantity held:
//!
//! ```text
//! market_value[ticker] = quantity[ticker] × latest_close[ticker]
//! total_market_value   = Σ market_value
//! ```
//!
//! Tickers the store knows nothing about are logged at warn level and left
//! out of the [`MarketValuation`]; one bad symbol never blocks the rest of
//! the portfolio. Valuations are recomputed on every call.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use varlens_portfolio::prelude::*;
//!
//! let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2"])?;
//! let mut valuator = PortfolioValuator::new(holdings, store);
//! let total = valuator.total_market_value().await?;
//! let per_ticker = valuator.market_values();
//! ```
//!
//! [`Holdings`]: varlens_core::Holdings
//! [`PriceStore`]: varlens_traits::PriceStore

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod valuation;
pub mod valuator;

pub use error::{ValuationError, ValuationResult};
pub use valuation::MarketValuation;
pub use valuator::PortfolioValuator;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ValuationError, ValuationResult};
    pub use crate::valuation::MarketValuation;
    pub use crate::valuator::PortfolioValuator;
    pub use varlens_core::{Holdings, Ticker};
}
