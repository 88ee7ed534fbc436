//! Price observations.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Date, Ticker};
use crate::error::{CoreError, CoreResult};

/// A single closing price observation.
///
/// Owned by the price store; the valuation and risk layers only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Instrument symbol.
    pub ticker: Ticker,
    /// Trading date of the observation.
    pub date: Date,
    /// Closing price (strictly positive).
    pub close: f64,
}

impl PricePoint {
    /// Creates a new price point.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPrice` if `close` is not a positive finite
    /// number, since a zero close would make every return undefined.
    pub fn new(ticker: Ticker, date: Date, close: f64) -> CoreResult<Self> {
        if !close.is_finite() || close <= 0.0 {
            return Err(CoreError::InvalidPrice {
                ticker: ticker.to_string(),
                date: date.to_string(),
                value: close,
            });
        }
        Ok(Self {
            ticker,
            date,
            close,
        })
    }
}

/// The closing prices of one ticker, keyed by trading date.
///
/// Holds at most one close per date; inserting a second close for the same
/// date replaces the first. This is the unit every store adapter ranks
/// when answering latest-price and lookback queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    closes: BTreeMap<Date, f64>,
}

impl PriceSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a close, replacing any existing value for the date.
    pub fn insert(&mut self, date: Date, close: f64) {
        self.closes.insert(date, close);
    }

    /// Returns the most recent `(date, close)`.
    pub fn latest(&self) -> Option<(Date, f64)> {
        self.closes.iter().next_back().map(|(d, c)| (*d, *c))
    }

    /// Returns the close on a given date.
    pub fn get(&self, date: &Date) -> Option<f64> {
        self.closes.get(date).copied()
    }

    /// Returns the most recent `n` observations in ascending date order.
    ///
    /// `n` counts observations, not calendar days: a ticker that did not
    /// trade over a holiday still yields `n` rows reaching further back.
    pub fn tail(&self, n: usize) -> Vec<(Date, f64)> {
        let mut recent: Vec<(Date, f64)> = self
            .closes
            .iter()
            .rev()
            .take(n)
            .map(|(d, c)| (*d, *c))
            .collect();
        recent.reverse();
        recent
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    /// Returns true if the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> Date {
        Date::from_ymd(2023, 1, day).unwrap()
    }

    #[test]
    fn test_price_point_validation() {
        let t = Ticker::new("AAPL").unwrap();
        assert!(PricePoint::new(t.clone(), d(2), 150.0).is_ok());
        assert!(PricePoint::new(t.clone(), d(2), 0.0).is_err());
        assert!(PricePoint::new(t.clone(), d(2), -5.0).is_err());
        assert!(PricePoint::new(t, d(2), f64::NAN).is_err());
    }

    #[test]
    fn test_latest() {
        let mut s = PriceSeries::new();
        assert_eq!(s.latest(), None);
        s.insert(d(3), 101.0);
        s.insert(d(2), 100.0);
        assert_eq!(s.latest(), Some((d(3), 101.0)));
    }

    #[test]
    fn test_tail_counts_observations() {
        let mut s = PriceSeries::new();
        // Gap on the 4th and 5th
        for (day, px) in [(2, 100.0), (3, 101.0), (6, 102.0), (9, 103.0)] {
            s.insert(d(day), px);
        }
        assert_eq!(s.tail(2), vec![(d(6), 102.0), (d(9), 103.0)]);
        assert_eq!(s.tail(10).len(), 4);
        assert!(s.tail(0).is_empty());
    }

    #[test]
    fn test_same_date_replaces() {
        let mut s = PriceSeries::new();
        s.insert(d(2), 100.0);
        s.insert(d(2), 99.5);
        assert_eq!(s.len(), 1);
        assert_eq!(s.get(&d(2)), Some(99.5));
    }
}
