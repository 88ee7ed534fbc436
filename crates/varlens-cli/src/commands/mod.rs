//! CLI command implementations.

pub mod config;
pub mod ingest;
pub mod performance;
pub mod report;
pub mod value;
pub mod var;

// Re-export argument types for the CLI definition
pub use config::ConfigArgs;
pub use ingest::IngestArgs;
pub use performance::PerformanceArgs;
pub use report::ReportArgs;
pub use value::ValueArgs;
pub use var::VarArgs;

use std::sync::Arc;

use varlens::{Holdings, PriceStore, RiskError, RiskParameters};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{CliError, CliResult};

/// Everything a command needs besides its own arguments.
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Output format
    pub format: OutputFormat,
    /// Suppress non-essential output
    pub quiet: bool,
}

impl Context {
    /// Opens the configured price store.
    pub fn store(&self) -> anyhow::Result<Arc<dyn PriceStore>> {
        Ok(self.config.store.open()?)
    }

    /// Holdings from `TICKER=QTY` arguments, or the configured portfolio
    /// when none were given.
    pub fn holdings(&self, pairs: &[String]) -> CliResult<Holdings> {
        if pairs.is_empty() {
            return self.config.holdings();
        }
        parse_holdings(pairs)
    }

    /// Risk parameters from the config, overridden by any flags given.
    pub fn risk_parameters(
        &self,
        confidence: Option<f64>,
        lookback: Option<usize>,
    ) -> Result<RiskParameters, RiskError> {
        let defaults = self.config.risk;
        RiskParameters::new(
            confidence.unwrap_or(defaults.confidence_level),
            lookback.unwrap_or(defaults.lookback_days),
        )
    }
}

/// Parses `TICKER=QTY` pairs.
pub fn parse_holdings(pairs: &[String]) -> CliResult<Holdings> {
    Holdings::parse_pairs(pairs).map_err(|e| CliError::InvalidPortfolio(e.to_string()))
}
