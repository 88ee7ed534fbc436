//! Historical value of the current holdings.

use serde::{Deserialize, Serialize};

use varlens_core::{Date, Holdings};

use crate::matrix::PriceMatrix;

/// One day of a performance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Trading date.
    pub date: Date,
    /// Value of the current holdings at that day's closes.
    pub value: f64,
}

/// What today's holdings would have been worth on each historical day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSeries {
    points: Vec<PerformancePoint>,
}

impl PerformanceSeries {
    /// Points in ascending date order.
    pub fn points(&self) -> &[PerformancePoint] {
        &self.points
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest point.
    pub fn first(&self) -> Option<&PerformancePoint> {
        self.points.first()
    }

    /// Most recent point.
    pub fn last(&self) -> Option<&PerformancePoint> {
        self.points.last()
    }

    /// Change in value from the first to the last day.
    pub fn change(&self) -> Option<f64> {
        Some(self.last()?.value - self.first()?.value)
    }

    /// Iterate over points.
    pub fn iter(&self) -> impl Iterator<Item = &PerformancePoint> {
        self.points.iter()
    }
}

impl IntoIterator for PerformanceSeries {
    type Item = PerformancePoint;
    type IntoIter = std::vec::IntoIter<PerformancePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

/// Values the holdings at every row of the matrix.
///
/// Each day is `Σ quantity × close` over tickers that are both held and
/// present in the matrix. Cells without a close are skipped, so a day where
/// no held ticker has a price values to zero.
pub fn historical_performance(holdings: &Holdings, matrix: &PriceMatrix) -> PerformanceSeries {
    let quantities: Vec<Option<f64>> = matrix
        .tickers()
        .iter()
        .map(|ticker| holdings.quantity(ticker))
        .collect();

    let points = matrix
        .dates()
        .iter()
        .zip(matrix.rows())
        .map(|(date, row)| {
            let value = row
                .iter()
                .zip(&quantities)
                .filter_map(|(close, quantity)| Some((*close)? * (*quantity)?))
                .fold(0.0, |acc, v| acc + v);
            PerformancePoint { date: *date, value }
        })
        .collect();

    PerformanceSeries { points }
}
