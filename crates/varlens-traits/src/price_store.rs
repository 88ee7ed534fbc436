//! Price store traits.
//!
//! These traits define the two reads the valuation and risk layers need:
//! - [`PriceStore::latest_prices`]: most recent close per ticker
//! - [`PriceStore::price_history`]: last N trading dates per ticker
//!
//! Plus the write side used by ingestion tooling:
//! - [`PriceWriter`]: batch loading of observations

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use varlens_core::{PricePoint, Ticker};

/// Source type for price data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// File-based (CSV)
    File,
    /// Database (embedded or remote)
    Database,
    /// Held in process memory
    Memory,
}

/// Read-only access to closing prices.
///
/// Implementations must tolerate concurrent queries; callers hold the store
/// behind an `Arc` and share it across requests.
#[async_trait]
pub trait PriceStore: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the most recent close for each ticker.
    ///
    /// Tickers without any observation are omitted from the result; that is
    /// not an error.
    async fn latest_prices(&self, tickers: &[Ticker]) -> Result<BTreeMap<Ticker, f64>, TraitError>;

    /// Get up to `lookback_days` most recent observations per ticker.
    ///
    /// `lookback_days` counts distinct trading dates present for the ticker,
    /// not calendar days. Points are returned in ascending date order.
    async fn price_history(
        &self,
        tickers: &[Ticker],
        lookback_days: usize,
    ) -> Result<Vec<PricePoint>, TraitError>;
}

/// Write access for loading observations into a store.
#[async_trait]
pub trait PriceWriter: Send + Sync {
    /// Save a batch of observations, replacing any existing close for the
    /// same ticker and date. Returns the number of points written.
    async fn save_batch(&self, points: &[PricePoint]) -> Result<usize, TraitError>;

    /// Total number of stored observations.
    async fn count(&self) -> Result<u64, TraitError>;
}
