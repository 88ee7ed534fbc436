//! # Varlens
//!
//! Portfolio valuation and historical-simulation Value at Risk.
//!
//! This crate is the public face of the workspace. It re-exports the domain
//! types, the price store seam and the engines, and adds the request-level
//! entry points a host application calls:
//!
//! - [`value_portfolio`]: total and per-ticker market value
//! - [`compute_var`]: historical VaR and the simulated P/L sample
//! - [`compute_historical_performance`]: what today's holdings were worth
//!   on each day of a price matrix
//! - [`analyze_portfolio`]: all of the above from one set of store reads
//!
//! Each call builds its own valuator and engine; the only shared state is
//! the `Arc<dyn PriceStore>` passed in.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use varlens::prelude::*;
//! use varlens::stores::CsvPriceStore;
//!
//! let store: Arc<dyn PriceStore> = Arc::new(CsvPriceStore::new("prices.csv")?);
//! let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2"])?;
//!
//! let analysis = analyze_portfolio(store, holdings, RiskParameters::default()).await?;
//! println!("total {:.2}, {}", analysis.total_market_value(), analysis.var);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod functions;

pub use functions::{
    analyze_portfolio, compute_historical_performance, compute_var, value_portfolio,
    RiskAnalysis,
};

pub use varlens_core::{CoreError, Date, Holdings, PricePoint, Ticker};
pub use varlens_portfolio::{MarketValuation, PortfolioValuator, ValuationError};
pub use varlens_risk::{
    HistoricalRiskEngine, PerformanceSeries, PriceMatrix, RiskError, RiskParameters, VaRResult,
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_LOOKBACK_DAYS,
};
pub use varlens_traits::{PriceStore, PriceWriter, TraitError};

/// Price store adapters enabled by features.
pub mod stores {
    #[cfg(feature = "file")]
    pub use varlens_ext_file::{CsvPriceStore, EmptyPriceStore, InMemoryPriceStore};
    #[cfg(feature = "redb")]
    pub use varlens_ext_redb::{create_redb_price_store, RedbPriceStore};
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::functions::{
        analyze_portfolio, compute_historical_performance, compute_var, value_portfolio,
        RiskAnalysis,
    };
    pub use varlens_core::prelude::*;
    pub use varlens_portfolio::{MarketValuation, PortfolioValuator, ValuationError};
    pub use varlens_risk::prelude::*;
    pub use varlens_traits::{PriceStore, TraitError};
}
