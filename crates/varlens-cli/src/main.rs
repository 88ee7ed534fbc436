//! Varlens CLI - portfolio valuation and historical Value at Risk.
//!
//! # Usage
//!
//! ```bash
//! # Value a portfolio
//! varlens value AAPL=10 GOOG=2
//!
//! # 99% VaR over the last 500 trading days, with the P/L sample
//! varlens var AAPL=10 GOOG=2 --confidence 0.99 --lookback 500 --show-pl
//!
//! # Write reports/daily_risk_report.md for the configured portfolio
//! varlens report
//!
//! # Load a directory of per-ticker CSV files into the embedded database
//! varlens ingest --source data/stocks --db data/prices.redb
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let format = cli.format;
    let quiet = cli.quiet;
    let config_path = config::config_path(cli.config.as_deref())?;
    let context = || -> Result<Context> {
        Ok(Context {
            config: config::Config::load(&config_path)?,
            format,
            quiet,
        })
    };

    // Execute command. Config commands run without loading the file so a
    // broken file can still be inspected and replaced.
    match cli.command {
        Commands::Value(args) => commands::value::execute(args, &context()?).await?,
        Commands::Var(args) => commands::var::execute(args, &context()?).await?,
        Commands::Performance(args) => commands::performance::execute(args, &context()?).await?,
        Commands::Report(args) => commands::report::execute(args, &context()?).await?,
        Commands::Ingest(args) => commands::ingest::execute(args, &context()?).await?,
        Commands::Config(args) => commands::config::execute(args, &config_path, format, quiet)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn,varlens=info",
        (false, 1) => "warn,varlens=debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
