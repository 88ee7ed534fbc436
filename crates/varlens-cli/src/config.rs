//! CLI configuration file.
//!
//! The file is TOML. It is looked up at `--config`, then `$VARLENS_CONFIG`
//! (both arrive through the same clap argument), then
//! `<config_dir>/varlens/config.toml`. A missing file means defaults.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use varlens::stores::{create_redb_price_store, CsvPriceStore};
use varlens::{Holdings, PriceStore, RiskParameters, TraitError};

use crate::error::{CliError, CliResult};

/// Price store backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// CSV file or directory of per-ticker CSV files
    #[default]
    Csv,
    /// Embedded redb database
    Redb,
}

/// `[store]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend kind
    pub kind: StoreKind,
    /// File, directory or database path
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::Csv,
            path: PathBuf::from("data/prices.csv"),
        }
    }
}

impl StoreConfig {
    /// Opens the configured store.
    pub fn open(&self) -> Result<Arc<dyn PriceStore>, TraitError> {
        debug!(kind = ?self.kind, path = %self.path.display(), "opening price store");
        let store: Arc<dyn PriceStore> = match self.kind {
            StoreKind::Csv => Arc::new(CsvPriceStore::new(&self.path)?),
            StoreKind::Redb => {
                if let Some(parent) = self.path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Arc::new(create_redb_price_store(&self.path)?)
            }
        };
        Ok(store)
    }
}

/// `[report]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory the report is written to
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("reports"),
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Price store
    pub store: StoreConfig,
    /// VaR defaults
    pub risk: RiskParameters,
    /// Report output
    pub report: ReportConfig,
    /// Default portfolio, ticker = quantity
    pub portfolio: BTreeMap<String, f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            risk: RiskParameters::default(),
            report: ReportConfig::default(),
            portfolio: BTreeMap::from([
                ("AAPL".to_string(), 150.0),
                ("GOOG".to_string(), 50.0),
                ("MSFT".to_string(), 100.0),
                ("TSLA".to_string(), 75.0),
            ]),
        }
    }
}

impl Config {
    /// Loads the file at `path`, or defaults if it does not exist.
    pub fn load(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|message| CliError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parses TOML text.
    pub fn parse(content: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(content).map_err(|e| e.to_string())?;
        config.risk.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Config {
            path: PathBuf::new(),
            message: e.to_string(),
        })
    }

    /// Writes the file, creating parent directories.
    pub fn save(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// The configured default portfolio.
    pub fn holdings(&self) -> CliResult<Holdings> {
        Holdings::try_from(self.portfolio.clone())
            .map_err(|e| CliError::InvalidPortfolio(e.to_string()))
    }
}

/// Resolves the config file location.
pub fn config_path(explicit: Option<&Path>) -> CliResult<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let base = dirs::config_dir()
        .or_else(dirs::home_dir)
        .ok_or(CliError::NoConfigDir)?;
    Ok(base.join("varlens").join("config.toml"))
}
