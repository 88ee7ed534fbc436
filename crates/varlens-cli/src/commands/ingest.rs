//! Ingest command implementation.
//!
//! Loads closing prices from CSV into the embedded redb store.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::info;

use varlens::PriceWriter;
use varlens_ext_file::read_prices;
use varlens_ext_redb::create_redb_price_store;

use crate::cli::OutputFormat;
use crate::commands::Context;
use crate::config::StoreKind;
use crate::output::{print_json, print_success};

/// Arguments for the ingest command.
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// CSV file (ticker,date,close) or directory of per-ticker OHLCV files
    #[arg(short, long)]
    pub source: PathBuf,

    /// Database path (default: the configured redb store)
    #[arg(short, long)]
    pub db: Option<PathBuf>,
}

/// Execute the ingest command.
pub async fn execute(args: IngestArgs, ctx: &Context) -> Result<()> {
    let db_path = match args.db {
        Some(path) => path,
        None if ctx.config.store.kind == StoreKind::Redb => ctx.config.store.path.clone(),
        None => anyhow::bail!("no database given; pass --db or set [store] kind = \"redb\""),
    };

    let points = read_prices(&args.source)
        .with_context(|| format!("reading {}", args.source.display()))?;

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let store = create_redb_price_store(&db_path)?;
    let written = store.save_batch(&points).await?;
    let total = store.count().await?;
    info!(written, total, db = %db_path.display(), "ingestion complete");

    match ctx.format {
        OutputFormat::Minimal => println!("{written}"),
        OutputFormat::Json => print_json(&serde_json::json!({
            "db": db_path,
            "written": written,
            "stored": total,
        }))?,
        OutputFormat::Table | OutputFormat::Csv => {
            if !ctx.quiet {
                print_success(&format!(
                    "Loaded {written} prices into {} ({total} stored)",
                    db_path.display()
                ));
            }
        }
    }

    Ok(())
}
