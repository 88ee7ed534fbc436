//! Historical price and return matrices.
//!
//! A [`PriceMatrix`] is a date × ticker table of closing prices assembled
//! from the flat observations a price store returns. Rows are trading dates
//! in ascending order; columns are tickers in sorted order.
//!
//! Assembly rules:
//! - gaps inside a column are carried forward from the last known close,
//!   never backward and never interpolated
//! - a ticker with no observation anywhere in the window has no column
//! - at most `max_rows` rows are kept (the most recent distinct dates)

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use varlens_core::{Date, PricePoint, Ticker};
use varlens_math::statistics::pct_change;

/// Date × ticker table of closing prices.
///
/// Cells before a ticker's first observation are `None`; every other cell
/// holds either an observed or a carried-forward close.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceMatrix {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    rows: Vec<Vec<Option<f64>>>,
}

impl PriceMatrix {
    /// Pivots price observations into a matrix.
    ///
    /// Observations may arrive in any order. When the same ticker and date
    /// appear twice the later observation wins.
    pub fn from_points<'a>(
        points: impl IntoIterator<Item = &'a PricePoint>,
        max_rows: usize,
    ) -> Self {
        let mut by_ticker: BTreeMap<Ticker, BTreeMap<Date, f64>> = BTreeMap::new();
        let mut all_dates: BTreeSet<Date> = BTreeSet::new();

        for point in points {
            by_ticker
                .entry(point.ticker.clone())
                .or_default()
                .insert(point.date, point.close);
            all_dates.insert(point.date);
        }

        if by_ticker.is_empty() || max_rows == 0 {
            return Self::default();
        }

        let dates: Vec<Date> = all_dates.into_iter().collect();
        let skip = dates.len().saturating_sub(max_rows);

        let mut tickers = Vec::with_capacity(by_ticker.len());
        let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(by_ticker.len());

        for (ticker, closes) in by_ticker {
            // Fill over the full date union first so a close observed just
            // before the window still seeds the first kept row.
            let mut last = None;
            let column: Vec<Option<f64>> = dates
                .iter()
                .map(|date| {
                    if let Some(close) = closes.get(date) {
                        last = Some(*close);
                    }
                    last
                })
                .skip(skip)
                .collect();

            if column.iter().all(Option::is_none) {
                debug!(%ticker, "dropping ticker with no prices in window");
                continue;
            }
            tickers.push(ticker);
            columns.push(column);
        }

        if tickers.is_empty() {
            return Self::default();
        }

        let dates: Vec<Date> = dates.into_iter().skip(skip).collect();
        let rows = (0..dates.len())
            .map(|i| columns.iter().map(|column| column[i]).collect())
            .collect();

        debug!(rows = dates.len(), columns = tickers.len(), "price matrix assembled");
        Self {
            dates,
            tickers,
            rows,
        }
    }

    /// Row index, ascending.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column index, sorted.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Rows of the matrix, aligned with [`dates`](Self::dates).
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.rows
    }

    /// Close for one cell, if any.
    pub fn value(&self, date: &Date, ticker: &Ticker) -> Option<f64> {
        let row = self.dates.binary_search(date).ok()?;
        let col = self.column_index(ticker)?;
        self.rows[row][col]
    }

    /// One ticker's column, aligned with [`dates`](Self::dates).
    pub fn column(&self, ticker: &Ticker) -> Option<Vec<Option<f64>>> {
        let col = self.column_index(ticker)?;
        Some(self.rows.iter().map(|row| row[col]).collect())
    }

    /// Returns true if the ticker has a column.
    pub fn contains(&self, ticker: &Ticker) -> bool {
        self.column_index(ticker).is_some()
    }

    /// Number of rows (trading dates).
    pub fn row_count(&self) -> usize {
        self.dates.len()
    }

    /// Number of columns (tickers).
    pub fn column_count(&self) -> usize {
        self.tickers.len()
    }

    /// Returns true if the matrix has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.tickers.is_empty()
    }

    /// Day-over-day percentage returns.
    ///
    /// Row `i` of the result is the change from price row `i` to row `i + 1`
    /// and is dated by the later day. A transition is kept only when every
    /// column has a close on both days, so the result has at most
    /// `row_count() - 1` rows.
    pub fn returns(&self) -> ReturnMatrix {
        let mut dates = Vec::new();
        let mut rows = Vec::new();

        for (i, window) in self.rows.windows(2).enumerate() {
            let row: Option<Vec<f64>> = window[0]
                .iter()
                .zip(&window[1])
                .map(|(prev, cur)| match (prev, cur) {
                    (Some(prev), Some(cur)) => Some(pct_change(*prev, *cur)),
                    _ => None,
                })
                .collect();

            if let Some(row) = row {
                dates.push(self.dates[i + 1]);
                rows.push(row);
            }
        }

        ReturnMatrix {
            dates,
            tickers: self.tickers.clone(),
            rows,
        }
    }

    fn column_index(&self, ticker: &Ticker) -> Option<usize> {
        self.tickers.iter().position(|t| t == ticker)
    }
}

/// Date × ticker table of simple daily returns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnMatrix {
    dates: Vec<Date>,
    tickers: Vec<Ticker>,
    rows: Vec<Vec<f64>>,
}

impl ReturnMatrix {
    /// Dates of the later day of each transition.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Column index, same order as the source price matrix.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Return rows aligned with [`dates`](Self::dates).
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of return rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no return rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
