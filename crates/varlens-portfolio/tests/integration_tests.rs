//! Integration tests for varlens-portfolio.
//!
//! These tests drive the valuator through the public API against in-memory
//! and failing price stores.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use varlens_core::{Date, PricePoint, Ticker};
use varlens_ext_file::InMemoryPriceStore;
use varlens_portfolio::prelude::*;
use varlens_traits::{PriceStore, SourceType, TraitError};

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn t(s: &str) -> Ticker {
    Ticker::new(s).unwrap()
}

/// A store that always fails, as a dropped database connection would.
struct FailingStore;

#[async_trait]
impl PriceStore for FailingStore {
    fn source_type(&self) -> SourceType {
        SourceType::Database
    }

    async fn latest_prices(&self, _tickers: &[Ticker]) -> Result<BTreeMap<Ticker, f64>, TraitError> {
        Err(TraitError::ConnectionFailed("server closed the connection".into()))
    }

    async fn price_history(
        &self,
        _tickers: &[Ticker],
        _lookback_days: usize,
    ) -> Result<Vec<PricePoint>, TraitError> {
        Err(TraitError::Timeout)
    }
}

fn priced_store() -> Arc<InMemoryPriceStore> {
    let store = InMemoryPriceStore::new();
    let day = Date::from_ymd(2024, 6, 28).unwrap();
    store.insert(t("AAPL"), day, 150.0);
    store.insert(t("GOOG"), day, 2800.0);
    Arc::new(store)
}

// =============================================================================
// TESTS
// =============================================================================

#[tokio::test]
async fn data_access_error_propagates_unchanged() {
    let holdings = Holdings::parse_pairs(["AAPL=1"]).unwrap();
    let mut valuator = PortfolioValuator::new(holdings, Arc::new(FailingStore));

    let err = valuator.total_market_value().await.unwrap_err();
    assert!(matches!(
        err,
        ValuationError::DataAccess(TraitError::ConnectionFailed(_))
    ));
    assert_eq!(err.to_string(), "connection failed: server closed the connection");
}

#[tokio::test]
async fn failed_valuation_keeps_previous_state() {
    let holdings = Holdings::parse_pairs(["AAPL=1"]).unwrap();
    let mut valuator = PortfolioValuator::new(holdings, Arc::new(FailingStore));
    let _ = valuator.total_market_value().await;
    assert!(valuator.market_values().is_empty());
}

#[tokio::test]
async fn valuation_is_idempotent() {
    let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2", "FAKE=10"]).unwrap();
    let mut valuator = PortfolioValuator::new(holdings, priced_store());

    let first_total = valuator.total_market_value().await.unwrap();
    let first = valuator.market_values().clone();
    let second_total = valuator.total_market_value().await.unwrap();

    assert_eq!(first_total, second_total);
    assert_eq!(&first, valuator.market_values());
}

#[tokio::test]
async fn valuation_tracks_latest_price() {
    let store = priced_store();
    let holdings = Holdings::parse_pairs(["AAPL=10"]).unwrap();
    let mut valuator = PortfolioValuator::new(holdings, store.clone());

    assert_eq!(valuator.total_market_value().await.unwrap(), 1500.0);

    store.insert(t("AAPL"), Date::from_ymd(2024, 7, 1).unwrap(), 160.0);
    assert_eq!(valuator.total_market_value().await.unwrap(), 1600.0);
}

#[tokio::test]
async fn concurrent_valuators_share_one_store() {
    let store: Arc<dyn PriceStore> = priced_store();

    let tasks: Vec<_> = (1..=8)
        .map(|qty| {
            let store = store.clone();
            tokio::spawn(async move {
                let holdings = Holdings::new([(t("AAPL"), f64::from(qty))]).unwrap();
                let mut valuator = PortfolioValuator::new(holdings, store);
                valuator.total_market_value().await.unwrap()
            })
        })
        .collect();

    for (i, task) in tasks.into_iter().enumerate() {
        let total = task.await.unwrap();
        assert_eq!(total, 150.0 * (i as f64 + 1.0));
    }
}
