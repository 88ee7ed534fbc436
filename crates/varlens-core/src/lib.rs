//! # Varlens Core
//!
//! Core domain types for the Varlens portfolio risk library.
//!
//! This crate provides the building blocks shared by the valuator, the risk
//! engine and every price store adapter:
//!
//! - **Identifiers**: [`Ticker`], a normalized instrument symbol
//! - **Dates**: [`Date`], a trading-date newtype over `chrono::NaiveDate`
//! - **Holdings**: [`Holdings`], a validated ticker → quantity mapping
//! - **Prices**: [`PricePoint`] observations and per-ticker [`PriceSeries`]
//!
//! ## Example
//!
//! ```rust
//! use varlens_core::prelude::*;
//!
//! let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2"]).unwrap();
//! assert_eq!(holdings.len(), 2);
//! assert_eq!(holdings.quantity(&Ticker::new("aapl").unwrap()), Some(10.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Holdings, PricePoint, PriceSeries, Ticker};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Holdings, PricePoint, PriceSeries, Ticker};
