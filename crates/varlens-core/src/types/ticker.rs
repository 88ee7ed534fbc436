//! Ticker symbol identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// A normalized instrument symbol (e.g. `AAPL`, `BRK.B`).
///
/// Symbols are trimmed and upper-cased on construction so that `"aapl "`
/// and `"AAPL"` address the same column of a price matrix.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new ticker.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTicker` if the symbol is empty or contains
    /// whitespace or a `=` separator.
    pub fn new(symbol: impl AsRef<str>) -> CoreResult<Self> {
        let symbol = symbol.as_ref().trim();
        if symbol.is_empty() {
            return Err(CoreError::invalid_ticker("ticker symbol is empty"));
        }
        if symbol.chars().any(|c| c.is_whitespace() || c == '=') {
            return Err(CoreError::invalid_ticker(format!(
                "'{symbol}' contains whitespace or '='"
            )));
        }
        Ok(Self(symbol.to_uppercase()))
    }

    /// Get the ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Ticker {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
