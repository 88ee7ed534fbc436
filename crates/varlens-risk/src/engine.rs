//! Historical risk engine.
//!
//! [`HistoricalRiskEngine`] binds to a [`PortfolioValuator`] and runs the
//! historical-simulation pipeline against the valuator's price store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use varlens_core::Date;
use varlens_portfolio::{MarketValuation, PortfolioValuator};

use crate::error::{RiskError, RiskResult};
use crate::matrix::PriceMatrix;
use crate::performance::{historical_performance, PerformanceSeries};
use crate::var::{historical_var, simulated_pl, VaRResult};
use crate::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_LOOKBACK_DAYS};

/// Parameters for a VaR run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskParameters {
    /// Confidence level, strictly between 0 and 1.
    pub confidence_level: f64,
    /// Lookback window in distinct trading dates.
    pub lookback_days: usize,
}

impl Default for RiskParameters {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl RiskParameters {
    /// Creates validated parameters.
    pub fn new(confidence_level: f64, lookback_days: usize) -> RiskResult<Self> {
        let params = Self {
            confidence_level,
            lookback_days,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the confidence level and lookback window.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` if the confidence level is not
    /// strictly inside (0, 1) or the lookback window is zero.
    pub fn validate(&self) -> RiskResult<()> {
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(RiskError::InvalidInput(format!(
                "confidence level must be between 0 and 1, got {}",
                self.confidence_level
            )));
        }
        if self.lookback_days == 0 {
            return Err(RiskError::InvalidInput(
                "lookback window must be at least one day".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything one VaR run produced.
///
/// Keeps the valuation and price matrix so callers can derive the
/// performance series from the same data the VaR used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// The VaR result.
    pub var: VaRResult,
    /// Valuation the weights were taken from.
    pub valuation: MarketValuation,
    /// Price matrix used for the returns. Empty on the zero-exposure path.
    pub prices: PriceMatrix,
    /// Date of each simulated P/L value.
    pub pl_dates: Vec<Date>,
}

/// Historical-simulation risk engine.
pub struct HistoricalRiskEngine {
    valuator: PortfolioValuator,
}

impl HistoricalRiskEngine {
    /// Binds an engine to a valuator.
    pub fn new(valuator: PortfolioValuator) -> Self {
        Self { valuator }
    }

    /// The bound valuator.
    pub fn valuator(&self) -> &PortfolioValuator {
        &self.valuator
    }

    /// Releases the bound valuator.
    pub fn into_valuator(self) -> PortfolioValuator {
        self.valuator
    }

    /// Loads the price matrix for the held tickers.
    ///
    /// Each ticker contributes at most `lookback_days` of its most recent
    /// trading dates; the matrix then keeps the latest `lookback_days` rows.
    /// Empty when nothing is held or the store has no history.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::DataAccess` if the store fails.
    pub async fn historical_prices(&self, lookback_days: usize) -> RiskResult<PriceMatrix> {
        let tickers = self.valuator.holdings().tickers();
        if tickers.is_empty() || lookback_days == 0 {
            return Ok(PriceMatrix::default());
        }

        let points = self
            .valuator
            .store()
            .price_history(&tickers, lookback_days)
            .await?;
        debug!(points = points.len(), lookback_days, "price history loaded");

        Ok(PriceMatrix::from_points(&points, lookback_days))
    }

    /// Computes historical VaR.
    ///
    /// Revalues the portfolio first, so the valuator's market values reflect
    /// the prices used for the weights. Every "no data" path returns a zero
    /// VaR with an empty P/L sample.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidInput` for out-of-range parameters and
    /// propagates store failures.
    pub async fn calculate_historical_var(
        &mut self,
        confidence_level: f64,
        lookback_days: usize,
    ) -> RiskResult<VaRResult> {
        let params = RiskParameters::new(confidence_level, lookback_days)?;
        Ok(self.simulate(&params).await?.var)
    }

    /// Runs the full pipeline and keeps its intermediate results.
    ///
    /// # Errors
    ///
    /// Same as [`calculate_historical_var`](Self::calculate_historical_var).
    pub async fn simulate(&mut self, params: &RiskParameters) -> RiskResult<Simulation> {
        params.validate()?;
        let RiskParameters {
            confidence_level,
            lookback_days,
        } = *params;

        let total = self.valuator.total_market_value().await?;
        let valuation = self.valuator.market_values().clone();
        let zero = |valuation: MarketValuation, prices: PriceMatrix| Simulation {
            var: VaRResult::zero(confidence_level, lookback_days),
            valuation,
            prices,
            pl_dates: Vec::new(),
        };

        if total == 0.0 {
            debug!("portfolio has no market value; VaR is zero");
            return Ok(zero(valuation, PriceMatrix::default()));
        }

        let prices = self.historical_prices(lookback_days).await?;
        if prices.is_empty() {
            debug!("no price history; VaR is zero");
            return Ok(zero(valuation, prices));
        }

        let returns = prices.returns();
        if returns.is_empty() {
            debug!(rows = prices.row_count(), "no complete return rows; VaR is zero");
            return Ok(zero(valuation, prices));
        }

        let weights: BTreeMap<_, _> = valuation.weights();
        let pl = simulated_pl(&returns, &weights, total);
        let var = historical_var(&pl, confidence_level)?;

        info!(
            var,
            total,
            confidence_level,
            observations = pl.len(),
            "historical VaR computed"
        );

        Ok(Simulation {
            var: VaRResult {
                var,
                simulated_pl: pl,
                confidence_level,
                lookback_days,
            },
            valuation,
            prices,
            pl_dates: returns.dates().to_vec(),
        })
    }

    /// Values the current holdings at each row of `prices`.
    pub fn calculate_historical_performance(&self, prices: &PriceMatrix) -> PerformanceSeries {
        historical_performance(self.valuator.holdings(), prices)
    }
}
