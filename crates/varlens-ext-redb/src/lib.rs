//! # Varlens Ext Redb
//!
//! Embedded persistent price store using redb.
//!
//! Closing prices live in a single table keyed by `(ticker, day ordinal)`.
//! Because keys sort by ticker first and date second, every ticker's
//! history is one contiguous key range: the latest close is the last key of
//! the range and a lookback window is the range read in reverse.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use tracing::{debug, info};

use varlens_core::{Date, PricePoint, Ticker};
use varlens_traits::error::TraitError;
use varlens_traits::price_store::{PriceStore, PriceWriter, SourceType};

// Table definitions
const PRICES: TableDefinition<(&str, i32), f64> = TableDefinition::new("prices");

/// Redb-based price store.
pub struct RedbPriceStore {
    db: Arc<Database>,
}

impl RedbPriceStore {
    /// Create a new redb price store over an open database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn read_ticker(
        table: &impl ReadableTable<(&'static str, i32), f64>,
        ticker: &Ticker,
        limit: usize,
    ) -> Result<Vec<PricePoint>, TraitError> {
        let range = table
            .range((ticker.as_str(), i32::MIN)..=(ticker.as_str(), i32::MAX))
            .map_err(|e| TraitError::DatabaseError(e.to_string()))?;

        let mut points = Vec::new();
        for entry in range.rev().take(limit) {
            let (key, value) = entry.map_err(|e| TraitError::DatabaseError(e.to_string()))?;
            let (_, ordinal) = key.value();
            points.push(PricePoint {
                ticker: ticker.clone(),
                date: Date::from_day_ordinal(ordinal)?,
                close: value.value(),
            });
        }
        points.reverse();
        Ok(points)
    }
}

#[async_trait]
impl PriceStore for RedbPriceStore {
    fn source_type(&self) -> SourceType {
        SourceType::Database
    }

    async fn latest_prices(
        &self,
        tickers: &[Ticker],
    ) -> Result<BTreeMap<Ticker, f64>, TraitError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| TraitError::DatabaseError(e.to_string()))?;

        let table = match read_txn.open_table(PRICES) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(BTreeMap::new()),
            Err(e) => return Err(TraitError::DatabaseError(e.to_string())),
        };

        let mut prices = BTreeMap::new();
        for ticker in tickers {
            if let Some(latest) = Self::read_ticker(&table, ticker, 1)?.pop() {
                prices.insert(ticker.clone(), latest.close);
            }
        }
        Ok(prices)
    }

    async fn price_history(
        &self,
        tickers: &[Ticker],
        lookback_days: usize,
    ) -> Result<Vec<PricePoint>, TraitError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| TraitError::DatabaseError(e.to_string()))?;

        let table = match read_txn.open_table(PRICES) {
            Ok(t) => t,
            Err(redb::TableError::TableDoesNotExist(_)) => return Ok(vec![]),
            Err(e) => return Err(TraitError::DatabaseError(e.to_string())),
        };

        let mut points = Vec::new();
        for ticker in tickers {
            points.extend(Self::read_ticker(&table, ticker, lookback_days)?);
        }
        points.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.ticker.cmp(&b.ticker)));
        debug!(
            tickers = tickers.len(),
            points = points.len(),
            lookback_days,
            "read price history"
        );
        Ok(points)
    }
}

#[async_trait]
impl PriceWriter for RedbPriceStore {
    async fn save_batch(&self, points: &[PricePoint]) -> Result<usize, TraitError> {
        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| TraitError::DatabaseError(e.to_string()))?;
        {
            let mut table = write_txn
                .open_table(PRICES)
                .map_err(|e| TraitError::DatabaseError(e.to_string()))?;

            for point in points {
                table
                    .insert((point.ticker.as_str(), point.date.day_ordinal()), point.close)
                    .map_err(|e| TraitError::DatabaseError(e.to_string()))?;
            }
        }
        write_txn
            .commit()
            .map_err(|e| TraitError::DatabaseError(e.to_string()))?;
        info!(points = points.len(), "saved price batch");
        Ok(points.len())
    }

    async fn count(&self) -> Result<u64, TraitError> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| TraitError::DatabaseError(e.to_string()))?;

        match read_txn.open_table(PRICES) {
            Ok(t) => t.len().map_err(|e| TraitError::DatabaseError(e.to_string())),
            Err(redb::TableError::TableDoesNotExist(_)) => Ok(0),
            Err(e) => Err(TraitError::DatabaseError(e.to_string())),
        }
    }
}

/// Open (or create) a redb price store at `path`.
///
/// # Errors
///
/// Returns `TraitError::SourceNotAvailable` if another handle holds the
/// database, and `TraitError::ConnectionFailed` for any other open failure.
pub fn create_redb_price_store(path: impl AsRef<Path>) -> Result<RedbPriceStore, TraitError> {
    let path = path.as_ref();
    let db = Database::create(path).map_err(|e| match e {
        redb::DatabaseError::DatabaseAlreadyOpen => TraitError::SourceNotAvailable(format!(
            "{} is locked by another handle",
            path.display()
        )),
        other => TraitError::ConnectionFailed(other.to_string()),
    })?;
    Ok(RedbPriceStore::new(Arc::new(db)))
}
