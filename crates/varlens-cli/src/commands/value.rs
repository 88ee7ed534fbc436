//! Value command implementation.
//!
//! Values a portfolio at the latest close of each ticker.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use varlens::{value_portfolio, Holdings, MarketValuation};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{
    format_money, print_header, print_json, print_output, print_warning, KeyValue,
};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Positions as TICKER=QUANTITY. Defaults to the configured portfolio.
    pub positions: Vec<String>,
}

/// One priced position.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PositionRow {
    #[tabled(rename = "Ticker")]
    pub ticker: String,
    #[tabled(rename = "Quantity")]
    pub quantity: f64,
    #[tabled(rename = "Market Value", display_with = "display_money")]
    pub market_value: f64,
    #[tabled(rename = "Weight", display_with = "display_weight")]
    pub weight: f64,
}

fn display_money(value: &f64) -> String {
    format_money(*value)
}

fn display_weight(value: &f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Rows for every priced ticker, in ticker order.
pub fn position_rows(holdings: &Holdings, valuation: &MarketValuation) -> Vec<PositionRow> {
    valuation
        .per_ticker()
        .iter()
        .map(|(ticker, value)| PositionRow {
            ticker: ticker.to_string(),
            quantity: holdings.quantity(ticker).unwrap_or_default(),
            market_value: *value,
            weight: valuation.weight(ticker).unwrap_or_default(),
        })
        .collect()
}

#[derive(Serialize)]
struct ValueOutput<'a> {
    total_market_value: f64,
    positions: &'a [PositionRow],
}

/// Execute the value command.
pub async fn execute(args: ValueArgs, ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings(&args.positions)?;
    let store = ctx.store()?;

    let valuation = value_portfolio(store, holdings.clone()).await?;
    let rows = position_rows(&holdings, &valuation);

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Portfolio Valuation");
            }
            print_output(&rows, ctx.format)?;
            print_output(
                &[KeyValue::money("Total Market Value", valuation.total())],
                ctx.format,
            )?;

            let missing: Vec<&str> = holdings
                .iter()
                .filter(|(ticker, _)| valuation.value(ticker).is_none())
                .map(|(ticker, _)| ticker.as_str())
                .collect();
            if !missing.is_empty() && !ctx.quiet {
                print_warning(&format!("No price for {}", missing.join(", ")));
            }
        }
        OutputFormat::Json => print_json(&ValueOutput {
            total_market_value: valuation.total(),
            positions: &rows,
        })?,
        OutputFormat::Csv => print_output(&rows, ctx.format)?,
        OutputFormat::Minimal => println!("{:.2}", valuation.total()),
    }

    Ok(())
}
