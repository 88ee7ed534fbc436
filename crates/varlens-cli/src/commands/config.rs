//! Config command implementation.
//!
//! Shows, locates and creates the TOML configuration file.

use std::path::Path;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_json, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show configuration file location
    Path,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, path: &Path, format: OutputFormat, quiet: bool) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(path, format),
        ConfigCommand::Path => execute_path(path, format),
        ConfigCommand::Init(init_args) => execute_init(init_args, path, quiet),
    }
}

/// Show the effective configuration.
fn execute_show(path: &Path, format: OutputFormat) -> Result<()> {
    let config = Config::load(path)?;

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let portfolio = config
                .portfolio
                .iter()
                .map(|(ticker, qty)| format!("{ticker}={qty}"))
                .collect::<Vec<_>>()
                .join(" ");
            let rows = vec![
                KeyValue::new("store.kind", format!("{:?}", config.store.kind).to_lowercase()),
                KeyValue::new("store.path", config.store.path.display().to_string()),
                KeyValue::new("risk.confidence_level", config.risk.confidence_level.to_string()),
                KeyValue::new("risk.lookback_days", config.risk.lookback_days.to_string()),
                KeyValue::new("report.output_dir", config.report.output_dir.display().to_string()),
                KeyValue::new("portfolio", portfolio),
            ];
            if format == OutputFormat::Table {
                print_header("Current Configuration");
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json(&config)?,
        OutputFormat::Minimal => print!("{}", config.to_toml()?),
    }

    Ok(())
}

/// Show configuration file path.
fn execute_path(path: &Path, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Minimal {
        println!("{}", path.display());
        return Ok(());
    }
    print_info(&format!("Config file: {}", path.display()));
    if path.exists() {
        print_info("Status: exists");
    } else {
        print_info("Status: not created yet (using defaults)");
    }
    Ok(())
}

/// Write the default configuration.
fn execute_init(args: InitArgs, path: &Path, quiet: bool) -> Result<()> {
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path.to_path_buf()).into());
    }
    Config::default().save(path)?;
    if !quiet {
        print_success(&format!("Wrote default configuration to {}", path.display()));
    }
    Ok(())
}
