//! CSV-backed price store.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use varlens_core::{Date, PricePoint, Ticker};
use varlens_traits::error::TraitError;
use varlens_traits::price_store::{PriceStore, SourceType};

use crate::memory::InMemoryPriceStore;

/// CSV record for the long format (`ticker,date,close`).
#[derive(Debug, Deserialize)]
struct LongRecord {
    #[serde(alias = "Ticker", alias = "symbol", alias = "Symbol")]
    ticker: String,
    #[serde(alias = "Date", alias = "price_date")]
    date: String,
    #[serde(alias = "Close", alias = "close_price")]
    close: Option<f64>,
}

/// CSV record for a per-ticker OHLCV file. Only the close is used.
#[derive(Debug, Deserialize)]
struct OhlcvRecord {
    #[serde(alias = "date")]
    #[serde(rename = "Date")]
    date: String,
    #[serde(alias = "close")]
    #[serde(rename = "Close")]
    close: Option<f64>,
}

/// CSV-based price store for EOD loads.
///
/// The source path may be:
/// - a single file with `ticker,date,close` columns, or
/// - a directory of `<TICKER>.csv` files with `Date,...,Close,...` columns,
///   one file per instrument (the usual vendor download layout).
///
/// A missing path yields an empty store.
pub struct CsvPriceStore {
    path: PathBuf,
    prices: InMemoryPriceStore,
}

impl CsvPriceStore {
    /// Create a new CSV price store and load it.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            prices: InMemoryPriceStore::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Reload prices from the source path.
    pub fn reload(&self) -> Result<(), TraitError> {
        self.prices.clear();

        if !self.path.exists() {
            return Ok(()); // Empty source
        }

        let points = read_prices(&self.path)?;
        debug!(path = %self.path.display(), points = points.len(), "loaded CSV prices");
        self.prices.extend(points);
        Ok(())
    }

    /// Underlying in-memory snapshot.
    pub fn snapshot(&self) -> &InMemoryPriceStore {
        &self.prices
    }
}

/// Read every price point from a CSV file or a directory of per-ticker files.
pub fn read_prices(path: impl AsRef<Path>) -> Result<Vec<PricePoint>, TraitError> {
    let path = path.as_ref();
    if path.is_dir() {
        read_ticker_directory(path)
    } else {
        read_long_file(path)
    }
}

fn read_long_file(path: &Path) -> Result<Vec<PricePoint>, TraitError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| TraitError::IoError(e.to_string()))?;

    let mut points = Vec::new();
    for result in reader.deserialize() {
        let record: LongRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
        let ticker = Ticker::new(&record.ticker)?;
        let date = Date::parse(&record.date)?;
        match record.close {
            Some(close) => points.push(PricePoint::new(ticker, date, close)?),
            None => warn!(%ticker, %date, "skipping row without close price"),
        }
    }
    Ok(points)
}

/// Reads every `*.csv` file in `dir`. A file that cannot be read or parsed
/// is skipped with a warning; the rest of the directory still loads.
fn read_ticker_directory(dir: &Path) -> Result<Vec<PricePoint>, TraitError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        match entry {
            Ok(entry) => files.push(entry.path()),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "skipping unreadable directory entry");
            }
        }
    }
    files.retain(|p| {
        p.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    });
    files.sort();

    let mut points = Vec::new();
    let mut loaded = 0usize;
    for file in &files {
        match read_ticker_file(file) {
            Ok(file_points) => {
                loaded += 1;
                points.extend(file_points);
            }
            Err(e) => warn!(file = %file.display(), error = %e, "skipping unreadable price file"),
        }
    }
    debug!(files = files.len(), loaded, "read per-ticker price directory");
    Ok(points)
}

/// Reads one `<TICKER>.csv` OHLCV file.
fn read_ticker_file(file: &Path) -> Result<Vec<PricePoint>, TraitError> {
    let stem = file
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| TraitError::ParseError(format!("bad file name: {}", file.display())))?;
    let ticker = Ticker::new(stem)?;

    let mut reader =
        csv::Reader::from_path(file).map_err(|e| TraitError::IoError(e.to_string()))?;
    let mut points = Vec::new();
    for result in reader.deserialize() {
        let record: OhlcvRecord =
            result.map_err(|e| TraitError::ParseError(format!("{}: {}", file.display(), e)))?;
        let date = Date::parse(&record.date)?;
        match record.close {
            Some(close) => points.push(PricePoint::new(ticker.clone(), date, close)?),
            None => warn!(%ticker, %date, "skipping row without close price"),
        }
    }
    Ok(points)
}

#[async_trait]
impl PriceStore for CsvPriceStore {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn latest_prices(
        &self,
        tickers: &[Ticker],
    ) -> Result<BTreeMap<Ticker, f64>, TraitError> {
        self.prices.latest_prices(tickers).await
    }

    async fn price_history(
        &self,
        tickers: &[Ticker],
        lookback_days: usize,
    ) -> Result<Vec<PricePoint>, TraitError> {
        self.prices.price_history(tickers, lookback_days).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_long_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "ticker,date,close").unwrap();
        writeln!(f, "AAPL,2023-01-02,148.0").unwrap();
        writeln!(f, "AAPL,2023-01-03,150.0").unwrap();
        writeln!(f, "GOOG,2023-01-03,2800.0").unwrap();
        writeln!(f, "GOOG,2023-01-04,").unwrap();
        drop(f);

        let store = CsvPriceStore::new(&path).unwrap();
        let latest = store.latest_prices(&[t("AAPL"), t("GOOG")]).await.unwrap();
        assert_eq!(latest[&t("AAPL")], 150.0);
        assert_eq!(latest[&t("GOOG")], 2800.0);
        assert_eq!(store.snapshot().len(), 3);
    }

    #[tokio::test]
    async fn test_ticker_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("msft.csv"),
            "Date,Open,High,Low,Close,Adj Close,Volume\n\
             2023-01-03,243.08,245.75,237.40,239.58,237.03,25740000\n\
             2023-01-04,232.28,232.87,225.96,229.10,226.66,50623400\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let store = CsvPriceStore::new(dir.path()).unwrap();
        let history = store.price_history(&[t("MSFT")], 10).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].close, 229.10);
        assert_eq!(history[0].ticker, t("MSFT"));
    }

    #[tokio::test]
    async fn test_missing_path_is_empty() {
        let store = CsvPriceStore::new("/definitely/not/here.csv").unwrap();
        assert!(store.latest_prices(&[t("AAPL")]).await.unwrap().is_empty());
    }

    #[test]
    fn test_malformed_row_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, "ticker,date,close\nAAPL,not-a-date,1.0\n").unwrap();
        assert!(matches!(
            CsvPriceStore::new(&path),
            Err(TraitError::ParseError(_))
        ));
    }

    #[test]
    fn test_bad_file_in_directory_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("AAPL.csv"),
            "Date,Close\n2023-01-02,148.0\n2023-01-03,150.0\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("ZZZ.csv"), "Date,Close\nnot-a-date,1.0\n").unwrap();

        let points = read_prices(dir.path()).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|p| p.ticker == t("AAPL")));
    }

    #[test]
    fn test_non_positive_close_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.csv");
        std::fs::write(&path, "ticker,date,close\nAAPL,2023-01-02,0\n").unwrap();
        assert!(CsvPriceStore::new(&path).is_err());
    }
}
