//! Request-level entry points.
//!
//! Every function here is self-contained: it builds a fresh valuator (and
//! engine, where needed) around the given store, runs, and drops them.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use varlens_core::Holdings;
use varlens_portfolio::{MarketValuation, PortfolioValuator, ValuationResult};
use varlens_risk::{
    historical_performance, HistoricalRiskEngine, PerformanceSeries, PriceMatrix, RiskParameters,
    RiskResult, VaRResult,
};
use varlens_traits::PriceStore;

// ============================================================================
// VALUATION
// ============================================================================

/// Values holdings at the latest prices in `store`.
///
/// Tickers the store cannot price are left out of the result. An empty
/// portfolio values to zero.
///
/// # Errors
///
/// Returns `ValuationError::DataAccess` if the store fails.
pub async fn value_portfolio(
    store: Arc<dyn PriceStore>,
    holdings: Holdings,
) -> ValuationResult<MarketValuation> {
    PortfolioValuator::new(holdings, store).valuate().await
}

// ============================================================================
// RISK
// ============================================================================

/// Computes one-day historical VaR.
///
/// # Errors
///
/// Returns `RiskError::InvalidInput` when `confidence_level` is not inside
/// (0, 1) or `lookback_days` is zero, and propagates store failures.
pub async fn compute_var(
    store: Arc<dyn PriceStore>,
    holdings: Holdings,
    confidence_level: f64,
    lookback_days: usize,
) -> RiskResult<VaRResult> {
    let mut engine = HistoricalRiskEngine::new(PortfolioValuator::new(holdings, store));
    engine
        .calculate_historical_var(confidence_level, lookback_days)
        .await
}

/// Values `holdings` at every row of `prices`.
pub fn compute_historical_performance(
    holdings: &Holdings,
    prices: &PriceMatrix,
) -> PerformanceSeries {
    historical_performance(holdings, prices)
}

// ============================================================================
// COMPOSITE
// ============================================================================

/// Valuation, VaR and historical performance of one portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAnalysis {
    /// Latest market values.
    pub valuation: MarketValuation,
    /// Historical VaR.
    pub var: VaRResult,
    /// Value of the holdings over the lookback window.
    pub performance: PerformanceSeries,
}

impl RiskAnalysis {
    /// Total market value.
    pub fn total_market_value(&self) -> f64 {
        self.valuation.total()
    }
}

/// Runs valuation, VaR and performance from the same store reads.
///
/// The performance series is derived from the price matrix the VaR used,
/// so both describe the same window. A portfolio with no market value gets
/// an empty series.
///
/// # Errors
///
/// Same as [`compute_var`].
pub async fn analyze_portfolio(
    store: Arc<dyn PriceStore>,
    holdings: Holdings,
    params: RiskParameters,
) -> RiskResult<RiskAnalysis> {
    let mut engine = HistoricalRiskEngine::new(PortfolioValuator::new(holdings, store));
    let simulation = engine.simulate(&params).await?;
    let performance = engine.calculate_historical_performance(&simulation.prices);

    debug!(
        total = simulation.valuation.total(),
        days = performance.len(),
        "portfolio analysis complete"
    );

    Ok(RiskAnalysis {
        valuation: simulation.valuation,
        var: simulation.var,
        performance,
    })
}
