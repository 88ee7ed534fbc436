//! Performance command implementation.
//!
//! Prints what the current holdings would have been worth on each day of
//! the lookback window.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use varlens::{compute_historical_performance, HistoricalRiskEngine, PortfolioValuator};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_money, print_header, print_json, print_output, KeyValue};

/// Arguments for the performance command.
#[derive(Args, Debug)]
pub struct PerformanceArgs {
    /// Positions as TICKER=QUANTITY. Defaults to the configured portfolio.
    pub positions: Vec<String>,

    /// Lookback window in trading days (default from config)
    #[arg(short, long)]
    pub lookback: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Tabled)]
struct PerformanceRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Value", display_with = "display_money")]
    value: f64,
}

fn display_money(value: &f64) -> String {
    format_money(*value)
}

/// Execute the performance command.
pub async fn execute(args: PerformanceArgs, ctx: &Context) -> Result<()> {
    let params = ctx.risk_parameters(None, args.lookback)?;
    let holdings = ctx.holdings(&args.positions)?;
    let store = ctx.store()?;

    let engine = HistoricalRiskEngine::new(PortfolioValuator::new(holdings, store));
    let prices = engine.historical_prices(params.lookback_days).await?;
    let series = compute_historical_performance(engine.valuator().holdings(), &prices);

    let rows: Vec<PerformanceRow> = series
        .iter()
        .map(|p| PerformanceRow {
            date: p.date.to_string(),
            value: p.value,
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Historical Performance");
            }
            print_output(&rows, ctx.format)?;
            if let Some(change) = series.change() {
                print_output(&[KeyValue::money("Change Over Window", change)], ctx.format)?;
            }
        }
        OutputFormat::Json => print_json(series.points())?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => {
            if let Some(last) = series.last() {
                println!("{:.2}", last.value);
            }
        }
    }

    Ok(())
}
