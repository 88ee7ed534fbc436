//! End-to-end tests of the facade entry points.

use std::sync::Arc;

use approx::assert_relative_eq;
use varlens::prelude::*;
use varlens::stores::{EmptyPriceStore, InMemoryPriceStore};

fn t(s: &str) -> Ticker {
    Ticker::new(s).unwrap()
}

fn store() -> Arc<dyn PriceStore> {
    let store = InMemoryPriceStore::new();
    let days = [(2, 148.0, 2750.0), (3, 149.0, 2790.0), (4, 150.0, 2800.0)];
    for (day, aapl, goog) in days {
        let date = Date::from_ymd(2024, 7, day).unwrap();
        store.insert(t("AAPL"), date, aapl);
        store.insert(t("GOOG"), date, goog);
    }
    Arc::new(store)
}

#[tokio::test]
async fn value_portfolio_omits_unknown_tickers() {
    let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2", "FAKE=10"]).unwrap();
    let valuation = value_portfolio(store(), holdings).await.unwrap();

    assert_eq!(valuation.total(), 7100.0);
    assert_eq!(valuation.value(&t("AAPL")), Some(1500.0));
    assert_eq!(valuation.value(&t("GOOG")), Some(5600.0));
    assert!(valuation.value(&t("FAKE")).is_none());
}

#[tokio::test]
async fn value_portfolio_empty_is_zero() {
    let valuation = value_portfolio(store(), Holdings::empty()).await.unwrap();
    assert_eq!(valuation.total(), 0.0);
    assert!(valuation.per_ticker().is_empty());
}

#[tokio::test]
async fn value_portfolio_is_idempotent() {
    let holdings = Holdings::parse_pairs(["AAPL=3", "GOOG=1"]).unwrap();
    let first = value_portfolio(store(), holdings.clone()).await.unwrap();
    let second = value_portfolio(store(), holdings).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn compute_var_zero_when_nothing_priced() {
    let holdings = Holdings::parse_pairs(["AAPL=10"]).unwrap();
    let result = compute_var(Arc::new(EmptyPriceStore), holdings, 0.95, 252)
        .await
        .unwrap();
    assert_eq!(result.var, 0.0);
    assert!(result.simulated_pl.is_empty());
}

#[tokio::test]
async fn compute_var_rejects_bad_confidence() {
    let holdings = Holdings::parse_pairs(["AAPL=10"]).unwrap();
    let err = compute_var(store(), holdings, 1.2, 252).await.unwrap_err();
    assert!(err.is_invalid_input());
}

#[tokio::test]
async fn analyze_portfolio_shares_one_window() {
    let holdings = Holdings::parse_pairs(["AAPL=10", "GOOG=2"]).unwrap();
    let analysis = analyze_portfolio(store(), holdings.clone(), RiskParameters::default())
        .await
        .unwrap();

    assert_eq!(analysis.total_market_value(), 7100.0);
    assert_eq!(analysis.var.simulated_pl.len(), 2);
    assert_eq!(analysis.performance.len(), 3);

    let last = analysis.performance.last().unwrap();
    assert_relative_eq!(last.value, analysis.total_market_value());

    let direct = compute_var(store(), holdings, 0.95, 252).await.unwrap();
    assert_eq!(direct, analysis.var);
}

#[tokio::test]
async fn analysis_serializes() {
    let holdings = Holdings::parse_pairs(["AAPL=1"]).unwrap();
    let analysis = analyze_portfolio(store(), holdings, RiskParameters::default())
        .await
        .unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json["var"]["simulated_pl"].is_array());
    assert_eq!(json["performance"]["points"][0]["date"], "2024-07-02");
}
