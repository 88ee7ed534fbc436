//! Portfolio valuator.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use varlens_core::{Holdings, Ticker};
use varlens_traits::PriceStore;

use crate::error::ValuationResult;
use crate::valuation::MarketValuation;

/// Values a set of holdings at the latest known prices.
///
/// The valuator is scoped to one request: it holds its own holdings and the
/// last valuation it computed, and shares nothing mutable with other
/// valuators. The store handle is the only shared resource.
pub struct PortfolioValuator {
    holdings: Holdings,
    store: Arc<dyn PriceStore>,
    valuation: MarketValuation,
}

impl PortfolioValuator {
    /// Creates a valuator for already validated holdings.
    pub fn new(holdings: Holdings, store: Arc<dyn PriceStore>) -> Self {
        Self {
            holdings,
            store,
            valuation: MarketValuation::default(),
        }
    }

    /// Creates a valuator from a raw ticker → quantity map.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::InvalidInput` if a ticker is malformed or a
    /// quantity is negative or not finite.
    pub fn from_map(
        positions: BTreeMap<String, f64>,
        store: Arc<dyn PriceStore>,
    ) -> ValuationResult<Self> {
        let holdings = Holdings::try_from(positions)?;
        Ok(Self::new(holdings, store))
    }

    /// The holdings being valued.
    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }

    /// The price store handle.
    pub fn store(&self) -> &Arc<dyn PriceStore> {
        &self.store
    }

    /// Fetches the latest close for every held ticker.
    ///
    /// Tickers with no price are omitted and logged at warn level.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::DataAccess` if the store fails.
    pub async fn current_prices(&self) -> ValuationResult<BTreeMap<Ticker, f64>> {
        let tickers = self.holdings.tickers();
        if tickers.is_empty() {
            return Ok(BTreeMap::new());
        }

        let mut prices = self.store.latest_prices(&tickers).await?;
        prices.retain(|ticker, _| self.holdings.contains(ticker));

        for ticker in &tickers {
            if !prices.contains_key(ticker) {
                warn!(%ticker, "no price data found for ticker; it will be ignored");
            }
        }

        Ok(prices)
    }

    /// Computes a fresh valuation without touching the stored one.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::DataAccess` if the store fails.
    pub async fn valuate(&self) -> ValuationResult<MarketValuation> {
        let prices = self.current_prices().await?;
        let per_ticker: BTreeMap<Ticker, f64> = self
            .holdings
            .iter()
            .filter_map(|(ticker, quantity)| {
                prices
                    .get(ticker)
                    .map(|price| (ticker.clone(), price * quantity))
            })
            .collect();

        let valuation = MarketValuation::from_values(per_ticker);
        debug!(
            priced = valuation.per_ticker().len(),
            held = self.holdings.len(),
            total = valuation.total(),
            "portfolio valued"
        );
        Ok(valuation)
    }

    /// Values the portfolio, stores the result, and returns the total.
    ///
    /// Overwrites whatever [`market_values`](Self::market_values) held
    /// before. Returns exactly `0.0` for an empty portfolio or when no
    /// ticker resolved to a price.
    ///
    /// # Errors
    ///
    /// Returns `ValuationError::DataAccess` if the store fails; the stored
    /// valuation is left unchanged in that case.
    pub async fn total_market_value(&mut self) -> ValuationResult<f64> {
        self.valuation = self.valuate().await?;
        Ok(self.valuation.total())
    }

    /// The valuation computed by the last successful
    /// [`total_market_value`](Self::total_market_value) call.
    ///
    /// Empty until that method has been called.
    pub fn market_values(&self) -> &MarketValuation {
        &self.valuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use varlens_core::Date;
    use varlens_ext_file::{EmptyPriceStore, InMemoryPriceStore};

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn store() -> Arc<dyn PriceStore> {
        let store = InMemoryPriceStore::new();
        let d1 = Date::from_ymd(2023, 1, 2).unwrap();
        let d2 = Date::from_ymd(2023, 1, 3).unwrap();
        store.insert(t("AAPL"), d1, 140.0);
        store.insert(t("AAPL"), d2, 150.0);
        store.insert(t("GOOG"), d2, 2800.0);
        store.insert(t("TSLA"), d2, 700.0);
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_current_prices_filters_and_omits() {
        let holdings = Holdings::parse_pairs(["AAPL=10", "TSLA=1", "FAKE=10"]).unwrap();
        let valuator = PortfolioValuator::new(holdings, store());
        let prices = valuator.current_prices().await.unwrap();

        assert_eq!(prices.len(), 2);
        assert_relative_eq!(prices[&t("AAPL")], 150.0);
        assert_relative_eq!(prices[&t("TSLA")], 700.0);
        assert!(!prices.contains_key(&t("FAKE")));
        assert!(!prices.contains_key(&t("GOOG")));
    }

    #[tokio::test]
    async fn test_total_market_value() {
        let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2", "FAKE=10"]).unwrap();
        let mut valuator = PortfolioValuator::new(holdings, store());

        let total = valuator.total_market_value().await.unwrap();
        assert_eq!(total, 7100.0);

        let values = valuator.market_values();
        assert_eq!(values.value(&t("AAPL")), Some(1500.0));
        assert_eq!(values.value(&t("GOOG")), Some(5600.0));
        assert_eq!(values.value(&t("FAKE")), None);
    }

    #[tokio::test]
    async fn test_empty_portfolio_is_zero() {
        let mut valuator = PortfolioValuator::new(Holdings::empty(), store());
        assert_eq!(valuator.total_market_value().await.unwrap(), 0.0);
        assert!(valuator.market_values().is_empty());
    }

    #[tokio::test]
    async fn test_nothing_priced_is_zero() {
        let holdings = Holdings::parse_pairs(["AAPL=10"]).unwrap();
        let mut valuator = PortfolioValuator::new(holdings, Arc::new(EmptyPriceStore));
        assert_eq!(valuator.total_market_value().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_market_values_empty_before_valuation() {
        let holdings = Holdings::parse_pairs(["AAPL=10"]).unwrap();
        let valuator = PortfolioValuator::new(holdings, store());
        assert!(valuator.market_values().is_empty());
    }

    #[test]
    fn test_from_map_rejects_negative() {
        let raw: BTreeMap<String, f64> = [("AAPL".to_string(), -5.0)].into_iter().collect();
        let err = PortfolioValuator::from_map(raw, store()).err().unwrap();
        assert!(err.is_invalid_input());
    }
}
