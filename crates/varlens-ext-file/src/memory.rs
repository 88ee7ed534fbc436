//! In-memory price store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;

use varlens_core::{Date, PricePoint, PriceSeries, Ticker};
use varlens_traits::error::TraitError;
use varlens_traits::price_store::{PriceStore, PriceWriter, SourceType};

/// Concurrent in-memory price store.
///
/// Readers and writers may share it freely across tasks; each ticker's
/// series is locked independently.
#[derive(Default)]
pub struct InMemoryPriceStore {
    series: DashMap<Ticker, PriceSeries>,
}

impl InMemoryPriceStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-loaded with observations.
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>) -> Self {
        let store = Self::new();
        store.extend(points);
        store
    }

    /// Insert one close, replacing any existing value for the same date.
    pub fn insert(&self, ticker: Ticker, date: Date, close: f64) {
        self.series.entry(ticker).or_default().insert(date, close);
    }

    /// Insert many observations.
    pub fn extend(&self, points: impl IntoIterator<Item = PricePoint>) {
        for point in points {
            self.insert(point.ticker, point.date, point.close);
        }
    }

    /// Remove every observation.
    pub fn clear(&self) {
        self.series.clear();
    }

    /// Number of tickers with at least one observation.
    pub fn ticker_count(&self) -> usize {
        self.series.len()
    }

    /// Total number of observations.
    pub fn len(&self) -> usize {
        self.series.iter().map(|s| s.len()).sum()
    }

    /// Returns true if the store holds no observations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PriceStore for InMemoryPriceStore {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    async fn latest_prices(
        &self,
        tickers: &[Ticker],
    ) -> Result<BTreeMap<Ticker, f64>, TraitError> {
        Ok(tickers
            .iter()
            .filter_map(|t| {
                let series = self.series.get(t)?;
                let (_, close) = series.latest()?;
                Some((t.clone(), close))
            })
            .collect())
    }

    async fn price_history(
        &self,
        tickers: &[Ticker],
        lookback_days: usize,
    ) -> Result<Vec<PricePoint>, TraitError> {
        let mut points = Vec::new();
        for ticker in tickers {
            if let Some(series) = self.series.get(ticker) {
                points.extend(series.tail(lookback_days).into_iter().map(|(date, close)| {
                    PricePoint {
                        ticker: ticker.clone(),
                        date,
                        close,
                    }
                }));
            }
        }
        points.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.ticker.cmp(&b.ticker)));
        Ok(points)
    }
}

#[async_trait]
impl PriceWriter for InMemoryPriceStore {
    async fn save_batch(&self, points: &[PricePoint]) -> Result<usize, TraitError> {
        self.extend(points.iter().cloned());
        Ok(points.len())
    }

    async fn count(&self) -> Result<u64, TraitError> {
        Ok(self.len() as u64)
    }
}
