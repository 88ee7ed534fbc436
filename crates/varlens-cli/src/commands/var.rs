//! VaR command implementation.
//!
//! Runs the historical simulation and prints VaR with a summary of the
//! simulated P/L sample.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use varlens::{HistoricalRiskEngine, PortfolioValuator, VaRResult};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_money, print_header, print_json, print_output, KeyValue};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Positions as TICKER=QUANTITY. Defaults to the configured portfolio.
    pub positions: Vec<String>,

    /// Confidence level, e.g. 0.95 (default from config)
    #[arg(long)]
    pub confidence: Option<f64>,

    /// Lookback window in trading days (default from config)
    #[arg(short, long)]
    pub lookback: Option<usize>,

    /// Also print every simulated daily P/L
    #[arg(long)]
    pub show_pl: bool,
}

/// One simulated day.
#[derive(Debug, Clone, Serialize, Tabled)]
struct PlRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Simulated P/L")]
    pl: String,
}

#[derive(Serialize)]
struct VarOutput<'a> {
    total_market_value: f64,
    #[serde(flatten)]
    result: &'a VaRResult,
}

/// Summary rows shared with the report command.
pub fn summary_rows(total: f64, result: &VaRResult) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Confidence", format!("{:.1}%", result.confidence_level * 100.0)),
        KeyValue::new("Lookback", format!("{} days", result.lookback_days)),
        KeyValue::money("Total Market Value", total),
        KeyValue::money("Historical VaR (1-day)", result.var),
        KeyValue::new("Observations", result.simulated_pl.len().to_string()),
    ];
    if let (Some(worst), Some(best), Some(mean)) =
        (result.worst_pl(), result.best_pl(), result.mean_pl())
    {
        rows.push(KeyValue::money("Worst Day P/L", worst));
        rows.push(KeyValue::money("Best Day P/L", best));
        rows.push(KeyValue::money("Mean P/L", mean));
    }
    rows
}

/// Execute the var command.
pub async fn execute(args: VarArgs, ctx: &Context) -> Result<()> {
    let params = ctx.risk_parameters(args.confidence, args.lookback)?;
    let holdings = ctx.holdings(&args.positions)?;
    let store = ctx.store()?;

    let mut engine = HistoricalRiskEngine::new(PortfolioValuator::new(holdings, store));
    let sim = engine.simulate(&params).await?;
    let total = sim.valuation.total();

    match ctx.format {
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header("Historical Value at Risk");
            }
            print_output(&summary_rows(total, &sim.var), ctx.format)?;

            if args.show_pl {
                let rows: Vec<PlRow> = sim
                    .pl_dates
                    .iter()
                    .zip(&sim.var.simulated_pl)
                    .map(|(date, pl)| PlRow {
                        date: date.to_string(),
                        pl: format_money(*pl),
                    })
                    .collect();
                print_header("Simulated Daily P/L");
                print_output(&rows, ctx.format)?;
            }
        }
        OutputFormat::Json => print_json(&VarOutput {
            total_market_value: total,
            result: &sim.var,
        })?,
        OutputFormat::Csv => {
            if args.show_pl {
                let mut wtr = csv::Writer::from_writer(std::io::stdout());
                wtr.write_record(["date", "pl"])?;
                for (date, pl) in sim.pl_dates.iter().zip(&sim.var.simulated_pl) {
                    wtr.write_record([date.to_string(), pl.to_string()])?;
                }
                wtr.flush()?;
            } else {
                print_output(&summary_rows(total, &sim.var), ctx.format)?;
            }
        }
        OutputFormat::Minimal => println!("{:.2}", sim.var.var),
    }

    Ok(())
}
