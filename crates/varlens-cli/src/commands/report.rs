//! Report command implementation.
//!
//! Writes `daily_risk_report.md` with the portfolio's total market value and
//! 1-day historical VaR.

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;
use tracing::info;

use varlens::{analyze_portfolio, Holdings, RiskAnalysis};

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::output::{format_money, print_success};

/// File name of the generated report.
pub const REPORT_FILE_NAME: &str = "daily_risk_report.md";

/// Arguments for the report command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Positions as TICKER=QUANTITY. Defaults to the configured portfolio.
    pub positions: Vec<String>,

    /// Directory to write the report to (default from config)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Renders the report as Markdown.
pub fn render_report(holdings: &Holdings, analysis: &RiskAnalysis, generated_at: &str) -> String {
    let tickers: Vec<&str> = holdings.iter().map(|(t, _)| t.as_str()).collect();
    let confidence = analysis.var.confidence_level * 100.0;
    let var = format_money(analysis.var.var);

    format!(
        "# Daily Risk Report\n\
         \n\
         **Report Generated:** {generated_at}\n\
         \n\
         ---\n\
         \n\
         ## Overview\n\
         \n\
         - **Portfolio:** `{tickers}`\n\
         - **Total Market Value:** `{total}`\n\
         - **{confidence:.0}% Historical VaR (1-day):** `{var}`\n\
         \n\
         ---\n\
         \n\
         ## Details\n\
         \n\
         At {confidence:.0}% confidence the portfolio should not lose more than **{var}** \
         over one trading day, judged against {observations} simulated days drawn from \
         the last {lookback} trading days of price history.\n",
        tickers = tickers.join(", "),
        total = format_money(analysis.total_market_value()),
        observations = analysis.var.simulated_pl.len(),
        lookback = analysis.var.lookback_days,
    )
}

/// Execute the report command.
pub async fn execute(args: ReportArgs, ctx: &Context) -> Result<()> {
    let holdings = ctx.holdings(&args.positions)?;
    let store = ctx.store()?;
    let params = ctx.config.risk;
    params.validate()?;

    let analysis = analyze_portfolio(store, holdings.clone(), params).await?;
    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let content = render_report(&holdings, &analysis, &generated_at);

    let output_dir = args
        .output_dir
        .unwrap_or_else(|| ctx.config.report.output_dir.clone());
    std::fs::create_dir_all(&output_dir)?;
    let path = output_dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, content)?;
    info!(path = %path.display(), "risk report written");

    match ctx.format {
        OutputFormat::Minimal => println!("{}", path.display()),
        OutputFormat::Json => crate::output::print_json(&serde_json::json!({
            "path": path,
            "total_market_value": analysis.total_market_value(),
            "var": analysis.var.var,
        }))?,
        OutputFormat::Table | OutputFormat::Csv => {
            if !ctx.quiet {
                print_success(&format!("Report written to {}", path.display()));
            }
        }
    }

    Ok(())
}
