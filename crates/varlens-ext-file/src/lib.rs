//! # Varlens Ext File
//!
//! File-based and in-memory price stores for Varlens.
//!
//! This crate provides default implementations for testing, EOD loads, and
//! small deployments:
//! - [`InMemoryPriceStore`]: concurrent in-process store, also a [`PriceWriter`]
//! - [`CsvPriceStore`]: long-format CSV or a directory of per-ticker OHLCV files
//! - [`EmptyPriceStore`]: answers every query with nothing
//!
//! For a persistent store, use `varlens-ext-redb`.
//!
//! [`PriceWriter`]: varlens_traits::PriceWriter

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_store;
mod memory;

pub use csv_store::*;
pub use memory::*;

use std::collections::BTreeMap;

use async_trait::async_trait;
use varlens_core::{PricePoint, Ticker};
use varlens_traits::error::TraitError;
use varlens_traits::price_store::{PriceStore, SourceType};

/// Empty price store for testing.
pub struct EmptyPriceStore;

#[async_trait]
impl PriceStore for EmptyPriceStore {
    fn source_type(&self) -> SourceType {
        SourceType::Memory
    }

    async fn latest_prices(
        &self,
        _tickers: &[Ticker],
    ) -> Result<BTreeMap<Ticker, f64>, TraitError> {
        Ok(BTreeMap::new())
    }

    async fn price_history(
        &self,
        _tickers: &[Ticker],
        _lookback_days: usize,
    ) -> Result<Vec<PricePoint>, TraitError> {
        Ok(vec![])
    }
}
