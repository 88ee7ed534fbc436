//! Portfolio holdings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Ticker;
use crate::error::{CoreError, CoreResult};

/// A validated mapping from ticker to quantity held.
///
/// Tickers are unique and quantities are finite and non-negative. An empty
/// mapping is a valid portfolio; it simply values to zero.
///
/// Iteration is in ticker order, which keeps every downstream calculation
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct Holdings {
    positions: BTreeMap<Ticker, f64>,
}

impl Holdings {
    /// Creates an empty portfolio.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates holdings from `(ticker, quantity)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPortfolio` if a ticker appears twice or a
    /// quantity is negative, NaN or infinite.
    pub fn new(positions: impl IntoIterator<Item = (Ticker, f64)>) -> CoreResult<Self> {
        let mut map = BTreeMap::new();
        for (ticker, quantity) in positions {
            validate_quantity(&ticker, quantity)?;
            if map.insert(ticker.clone(), quantity).is_some() {
                return Err(CoreError::invalid_portfolio(format!(
                    "ticker {ticker} appears more than once"
                )));
            }
        }
        Ok(Self { positions: map })
    }

    /// Parses holdings from `TICKER=QUANTITY` strings.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPortfolio` for a malformed pair and
    /// `CoreError::InvalidTicker` for a malformed symbol.
    pub fn parse_pairs<I, S>(pairs: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions = Vec::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (symbol, quantity) = pair.split_once('=').ok_or_else(|| {
                CoreError::invalid_portfolio(format!("expected TICKER=QUANTITY, got '{pair}'"))
            })?;
            let quantity: f64 = quantity.trim().parse().map_err(|_| {
                CoreError::invalid_portfolio(format!("quantity '{quantity}' is not a number"))
            })?;
            positions.push((Ticker::new(symbol)?, quantity));
        }
        Self::new(positions)
    }

    /// Returns the quantity held for a ticker.
    pub fn quantity(&self, ticker: &Ticker) -> Option<f64> {
        self.positions.get(ticker).copied()
    }

    /// Returns true if the ticker is held.
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.positions.contains_key(ticker)
    }

    /// Returns the held tickers in order.
    pub fn tickers(&self) -> Vec<Ticker> {
        self.positions.keys().cloned().collect()
    }

    /// Iterates over `(ticker, quantity)` pairs in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, f64)> {
        self.positions.iter().map(|(t, q)| (t, *q))
    }

    /// Returns the number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if there are no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn validate_quantity(ticker: &Ticker, quantity: f64) -> CoreResult<()> {
    if !quantity.is_finite() {
        return Err(CoreError::invalid_portfolio(format!(
            "quantity for {ticker} is not finite"
        )));
    }
    if quantity < 0.0 {
        return Err(CoreError::invalid_portfolio(format!(
            "quantity for {ticker} is negative ({quantity})"
        )));
    }
    Ok(())
}

impl TryFrom<BTreeMap<String, f64>> for Holdings {
    type Error = CoreError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let positions = raw
            .into_iter()
            .map(|(symbol, quantity)| Ticker::new(symbol).map(|t| (t, quantity)))
            .collect::<CoreResult<Vec<_>>>()?;
        Self::new(positions)
    }
}

impl From<Holdings> for BTreeMap<String, f64> {
    fn from(holdings: Holdings) -> Self {
        holdings
            .positions
            .into_iter()
            .map(|(t, q)| (t.into(), q))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Holdings {
    type Item = (&'a Ticker, &'a f64);
    type IntoIter = std::collections::btree_map::Iter<'a, Ticker, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    #[test]
    fn test_empty_is_valid() {
        let h = Holdings::new(Vec::new()).unwrap();
        assert!(h.is_empty());
        assert_eq!(h, Holdings::empty());
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let h = Holdings::new([(t("AAPL"), 0.0)]).unwrap();
        assert_eq!(h.quantity(&t("AAPL")), Some(0.0));
    }

    #[test]
    fn test_fractional_quantity_allowed() {
        let h = Holdings::new([(t("BTC"), 0.125)]).unwrap();
        assert_eq!(h.quantity(&t("BTC")), Some(0.125));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = Holdings::new([(t("AAPL"), -1.0)]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidPortfolio { .. }));
    }

    #[test]
    fn test_non_finite_quantity_rejected() {
        assert!(Holdings::new([(t("AAPL"), f64::NAN)]).is_err());
        assert!(Holdings::new([(t("AAPL"), f64::INFINITY)]).is_err());
    }

    #[test]
    fn test_duplicate_ticker_rejected() {
        let err = Holdings::parse_pairs(["AAPL=1", "aapl=2"]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_pairs() {
        let h = Holdings::parse_pairs(["AAPL=10", " goog = 2.5"]).unwrap();
        assert_relative_eq!(h.quantity(&t("AAPL")).unwrap(), 10.0);
        assert_relative_eq!(h.quantity(&t("GOOG")).unwrap(), 2.5);
        assert_eq!(h.tickers(), vec![t("AAPL"), t("GOOG")]);
    }

    #[test]
    fn test_parse_pairs_malformed() {
        assert!(Holdings::parse_pairs(["AAPL"]).is_err());
        assert!(Holdings::parse_pairs(["AAPL=ten"]).is_err());
        assert!(Holdings::parse_pairs(["=10"]).is_err());
    }

    #[test]
    fn test_deserialize_from_map() {
        let h: Holdings = serde_json::from_str(r#"{"AAPL": 10, "GOOG": 2.75}"#).unwrap();
        assert_eq!(h.len(), 2);
        assert_relative_eq!(h.quantity(&t("GOOG")).unwrap(), 2.75);
        assert!(serde_json::from_str::<Holdings>(r#"{"AAPL": -3}"#).is_err());
    }
}
