//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    ConfigArgs, IngestArgs, PerformanceArgs, ReportArgs, ValueArgs, VarArgs,
};

/// Varlens - portfolio valuation and historical Value at Risk
#[derive(Parser)]
#[command(name = "varlens")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file
    #[arg(short, long, env = "VARLENS_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Value a portfolio at the latest prices
    Value(ValueArgs),

    /// Compute one-day historical Value at Risk
    Var(VarArgs),

    /// Show what the portfolio would have been worth historically
    Performance(PerformanceArgs),

    /// Write the daily risk report
    Report(ReportArgs),

    /// Load CSV prices into the embedded database
    Ingest(IngestArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
