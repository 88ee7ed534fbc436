//! Error types for the Varlens core types.
//!
//! Every variant here describes malformed caller input. Missing market data
//! is never an error at this layer.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The error type for constructing core domain values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Ticker symbol is empty or malformed.
    #[error("Invalid ticker: {reason}")]
    InvalidTicker {
        /// Description of the problem.
        reason: String,
    },

    /// Holdings could not be constructed.
    #[error("Invalid portfolio: {reason}")]
    InvalidPortfolio {
        /// Description of the problem.
        reason: String,
    },

    /// Close price is not a positive finite number.
    #[error("Invalid price for {ticker} on {date}: {value}")]
    InvalidPrice {
        /// Ticker of the offending observation.
        ticker: String,
        /// Date of the offending observation.
        date: String,
        /// The rejected value.
        value: f64,
    },

    /// Date could not be parsed or is out of range.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid ticker error.
    #[must_use]
    pub fn invalid_ticker(reason: impl Into<String>) -> Self {
        Self::InvalidTicker {
            reason: reason.into(),
        }
    }

    /// Creates an invalid portfolio error.
    #[must_use]
    pub fn invalid_portfolio(reason: impl Into<String>) -> Self {
        Self::InvalidPortfolio {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
