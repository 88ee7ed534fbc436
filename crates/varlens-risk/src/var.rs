//! Historical-simulation Value at Risk.
//!
//! VaR estimates the one-day loss the current portfolio would not exceed
//! with the given confidence, judged against realized daily returns.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use varlens_core::Ticker;
use varlens_math::statistics::percentile;

use crate::error::RiskResult;
use crate::matrix::ReturnMatrix;

/// Value at Risk result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// VaR as a positive loss magnitude. Negative when even the tail
    /// outcome is a gain.
    pub var: f64,
    /// Simulated daily dollar P/L, one value per return row, oldest first.
    pub simulated_pl: Vec<f64>,
    /// Confidence level (e.g. 0.95 for 95%)
    pub confidence_level: f64,
    /// Lookback window in trading dates
    pub lookback_days: usize,
}

impl VaRResult {
    /// The "no data" outcome: zero VaR and an empty P/L sample.
    pub fn zero(confidence_level: f64, lookback_days: usize) -> Self {
        Self {
            var: 0.0,
            simulated_pl: Vec::new(),
            confidence_level,
            lookback_days,
        }
    }

    /// Returns true if no P/L outcome was simulated.
    pub fn is_empty(&self) -> bool {
        self.simulated_pl.is_empty()
    }

    /// Worst simulated daily P/L.
    pub fn worst_pl(&self) -> Option<f64> {
        self.simulated_pl.iter().copied().reduce(f64::min)
    }

    /// Best simulated daily P/L.
    pub fn best_pl(&self) -> Option<f64> {
        self.simulated_pl.iter().copied().reduce(f64::max)
    }

    /// Mean simulated daily P/L.
    pub fn mean_pl(&self) -> Option<f64> {
        if self.simulated_pl.is_empty() {
            return None;
        }
        Some(self.simulated_pl.iter().sum::<f64>() / self.simulated_pl.len() as f64)
    }
}

impl fmt::Display for VaRResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VaR({:.0}%, 1d, {} days): ${:.2}",
            self.confidence_level * 100.0,
            self.lookback_days,
            self.var
        )
    }
}

/// Share of the book covered by the return columns: the sum of the weights
/// of tickers that have a column in `returns`.
///
/// Below 1 when a priced ticker has no usable history, in which case its
/// exposure is left out of the simulated P/L.
pub fn aligned_weight(returns: &ReturnMatrix, weights: &BTreeMap<Ticker, f64>) -> f64 {
    returns
        .tickers()
        .iter()
        .filter_map(|ticker| weights.get(ticker))
        .fold(0.0, |acc, w| acc + w)
}

/// Replays each return row against today's dollar exposure.
///
/// For each row: `total_value × Σ weight[ticker] × return[ticker]`. Columns
/// without a weight contribute nothing. Weights are held fixed across days;
/// there is no rebalancing.
pub fn simulated_pl(
    returns: &ReturnMatrix,
    weights: &BTreeMap<Ticker, f64>,
    total_value: f64,
) -> Vec<f64> {
    let aligned: Vec<f64> = returns
        .tickers()
        .iter()
        .map(|ticker| weights.get(ticker).copied().unwrap_or(0.0))
        .collect();

    let coverage = aligned_weight(returns, weights);
    if coverage < 1.0 - 1e-9 {
        let missing: Vec<&Ticker> = weights
            .keys()
            .filter(|ticker| !returns.tickers().contains(*ticker))
            .collect();
        debug!(
            coverage,
            ?missing,
            "weighted tickers without return history; their exposure is not simulated"
        );
    }

    returns
        .rows()
        .iter()
        .map(|row| {
            let portfolio_return: f64 = row.iter().zip(&aligned).map(|(r, w)| r * w).sum();
            total_value * portfolio_return
        })
        .collect()
}

/// VaR from a P/L sample: the negated `(1 - confidence)` percentile.
///
/// # Errors
///
/// Returns `RiskError::Math` for an empty sample.
///
/// # Example
///
/// ```
/// use varlens_risk::historical_var;
///
/// let var = historical_var(&[-1000.0, -500.0, 100.0, 2000.0], 0.95).unwrap();
/// assert!((var - 925.0).abs() < 1e-9);
/// ```
pub fn historical_var(pl: &[f64], confidence_level: f64) -> RiskResult<f64> {
    let tail = (1.0 - confidence_level) * 100.0;
    Ok(-percentile(pl, tail)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::PriceMatrix;
    use crate::RiskError;
    use approx::assert_relative_eq;
    use varlens_core::{Date, PricePoint};

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn two_asset_returns() -> ReturnMatrix {
        let mut points = Vec::new();
        for (day, (aapl, goog)) in [(100.0, 2000.0), (101.0, 1980.0), (100.0, 2020.0)]
            .into_iter()
            .enumerate()
        {
            let date = Date::from_ymd(2024, 1, 2 + day as u32).unwrap();
            points.push(PricePoint::new(t("AAPL"), date, aapl).unwrap());
            points.push(PricePoint::new(t("GOOG"), date, goog).unwrap());
        }
        PriceMatrix::from_points(&points, 252).returns()
    }

    #[test]
    fn test_simulated_pl_weighted() {
        let returns = two_asset_returns();
        let weights = BTreeMap::from([(t("AAPL"), 0.8), (t("GOOG"), 0.2)]);
        let pl = simulated_pl(&returns, &weights, 100_000.0);

        assert_eq!(returns.row_count(), 2);
        assert_eq!(pl.len(), 2);
        // 0.8 × 1% + 0.2 × -1% = 0.6%
        assert_relative_eq!(pl[0], 600.0, epsilon = 1e-9);
        let expected = 100_000.0 * (0.8 * (-1.0 / 101.0) + 0.2 * (40.0 / 1980.0));
        assert_relative_eq!(pl[1], expected, epsilon = 1e-9);
    }

    #[test]
    fn test_unweighted_column_contributes_nothing() {
        let returns = two_asset_returns();
        let weights = BTreeMap::from([(t("AAPL"), 1.0)]);
        let pl = simulated_pl(&returns, &weights, 10_000.0);

        assert_relative_eq!(pl[0], 100.0, epsilon = 1e-9);
        assert_relative_eq!(pl[1], -10_000.0 / 101.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aligned_weight_reports_missing_history() {
        let returns = two_asset_returns();
        let full = BTreeMap::from([(t("AAPL"), 0.8), (t("GOOG"), 0.2)]);
        assert_relative_eq!(aligned_weight(&returns, &full), 1.0);

        // MSFT is priced today but has no column in the return matrix
        let partial = BTreeMap::from([(t("AAPL"), 0.5), (t("MSFT"), 0.5)]);
        assert_relative_eq!(aligned_weight(&returns, &partial), 0.5);

        let pl = simulated_pl(&returns, &partial, 10_000.0);
        assert_relative_eq!(pl[0], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_historical_var_interpolates() {
        let var = historical_var(&[-1000.0, -500.0, 100.0, 2000.0], 0.95).unwrap();
        assert_relative_eq!(var, 925.0, epsilon = 1e-9);
    }

    #[test]
    fn test_historical_var_not_clamped() {
        let var = historical_var(&[100.0, 200.0, 300.0], 0.95).unwrap();
        assert!(var < 0.0);
        assert_relative_eq!(var, -110.0, epsilon = 1e-9);
    }

    #[test]
    fn test_historical_var_empty_sample() {
        assert!(matches!(historical_var(&[], 0.95), Err(RiskError::Math(_))));
    }

    #[test]
    fn test_result_summary() {
        let result = VaRResult {
            var: 925.0,
            simulated_pl: vec![-1000.0, -500.0, 100.0, 2000.0],
            confidence_level: 0.95,
            lookback_days: 252,
        };
        assert_eq!(result.worst_pl(), Some(-1000.0));
        assert_eq!(result.best_pl(), Some(2000.0));
        assert_relative_eq!(result.mean_pl().unwrap(), 150.0);
        assert_eq!(result.to_string(), "VaR(95%, 1d, 252 days): $925.00");

        let zero = VaRResult::zero(0.99, 10);
        assert!(zero.is_empty());
        assert_eq!(zero.var, 0.0);
        assert_eq!(zero.mean_pl(), None);
    }
}
