//! Market valuation snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use varlens_core::Ticker;

/// Per-ticker market values and their total.
///
/// Only tickers that resolved to a price appear here. There are no
/// zero-valued placeholders for missing tickers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketValuation {
    per_ticker: BTreeMap<Ticker, f64>,
    total: f64,
}

impl MarketValuation {
    /// Builds a valuation from per-ticker values, summing the total.
    pub fn from_values(per_ticker: BTreeMap<Ticker, f64>) -> Self {
        let total = per_ticker.values().fold(0.0, |acc, v| acc + v);
        Self { per_ticker, total }
    }

    /// Total market value; exactly `0.0` when nothing was priced.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Market value of one ticker, if it was priced.
    pub fn value(&self, ticker: &Ticker) -> Option<f64> {
        self.per_ticker.get(ticker).copied()
    }

    /// Per-ticker market values.
    pub fn per_ticker(&self) -> &BTreeMap<Ticker, f64> {
        &self.per_ticker
    }

    /// Allocation weight of one ticker (`value / total`).
    ///
    /// Returns `None` for unpriced tickers and for a zero-total portfolio.
    pub fn weight(&self, ticker: &Ticker) -> Option<f64> {
        if self.total == 0.0 {
            return None;
        }
        self.value(ticker).map(|v| v / self.total)
    }

    /// Allocation weights of every priced ticker.
    pub fn weights(&self) -> BTreeMap<Ticker, f64> {
        if self.total == 0.0 {
            return BTreeMap::new();
        }
        self.per_ticker
            .iter()
            .map(|(t, v)| (t.clone(), v / self.total))
            .collect()
    }

    /// Returns true if no ticker was priced.
    pub fn is_empty(&self) -> bool {
        self.per_ticker.is_empty()
    }
}
