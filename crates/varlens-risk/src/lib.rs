//! # varlens-risk
//!
//! Historical-simulation Value at Risk for equity portfolios.
//!
//! The engine replays each of the last N trading days' realized returns
//! against today's dollar exposure:
//!
//! 1. Value the portfolio at latest prices (weights = value / total)
//! 2. Assemble a date × ticker [`PriceMatrix`] (forward-filled, empty
//!    columns dropped)
//! 3. Convert it to day-over-day returns ([`ReturnMatrix`], one row fewer)
//! 4. P/L per day = total value × Σ weight × return
//! 5. VaR = −(1 − confidence) percentile of that P/L sample
//!
//! Every "no data" condition (empty portfolio, nothing priced, no history,
//! a single surviving price row) degrades to a zero VaR with an empty P/L
//! sample. Only malformed input and price store failures are errors.
//!
//! ## Example
//!
//! ```ignore
//! use varlens_risk::prelude::*;
//!
//! let valuator = PortfolioValuator::new(holdings, store);
//! let mut engine = HistoricalRiskEngine::new(valuator);
//! let result = engine.calculate_historical_var(0.95, 252).await?;
//! println!("{result}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod engine;
pub mod matrix;
pub mod performance;
pub mod var;
mod error;

pub use engine::{HistoricalRiskEngine, RiskParameters, Simulation};
pub use error::{RiskError, RiskResult};
pub use matrix::{PriceMatrix, ReturnMatrix};
pub use performance::{historical_performance, PerformancePoint, PerformanceSeries};
pub use var::{aligned_weight, historical_var, simulated_pl, VaRResult};

/// Default lookback window, in trading dates.
pub const DEFAULT_LOOKBACK_DAYS: usize = 252;

/// Default VaR confidence level.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::engine::{HistoricalRiskEngine, RiskParameters, Simulation};
    pub use crate::matrix::{PriceMatrix, ReturnMatrix};
    pub use crate::performance::{PerformancePoint, PerformanceSeries};
    pub use crate::var::VaRResult;
    pub use crate::{RiskError, RiskResult, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_LOOKBACK_DAYS};
    pub use varlens_portfolio::{MarketValuation, PortfolioValuator};
}
