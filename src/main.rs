//! pydoc-scout main entry point
//!
//! This is the command-line interface for the Python documentation scraper.

use anyhow::Context;
use clap::Parser;
use pydoc_scout::config::{load_config_with_hash, load_or_default, Config};
use pydoc_scout::logging::setup_logging;
use pydoc_scout::output::{emit, FileTarget, OutputMode};
use pydoc_scout::scrape::{run_mode, Mode};
use pydoc_scout::{CachedSession, ConfigResult};
use std::path::PathBuf;

/// pydoc-scout: a scraper for the Python documentation portal
///
/// Collects release notes, documentation versions and PEP statuses, or
/// downloads the PDF documentation archive.
#[derive(Parser, Debug)]
#[command(name = "pydoc-scout")]
#[command(version)]
#[command(about = "A scraper for the Python documentation portal", long_about = None)]
struct Cli {
    /// What to scrape
    #[arg(value_enum)]
    mode: Mode,

    /// Clear the response cache before running
    #[arg(short, long)]
    clear_cache: bool,

    /// Additional output mode (default: plain terminal output)
    #[arg(short, long, value_enum)]
    output: Option<OutputMode>,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration decides where the log file lives, so load it first
    let (config, config_hash, config_error) = match load_configuration(&cli) {
        Ok((config, hash)) => (config, hash, None),
        Err(e) => (Config::default(), None, Some(e)),
    };

    setup_logging(&config.paths.log(), cli.verbose, cli.quiet);
    tracing::info!("Parser started");
    tracing::info!("Command line arguments: {:?}", cli);

    if let Some(e) = config_error {
        tracing::error!("Failed to load configuration: {}", e);
        return;
    }
    if let Some(hash) = config_hash {
        tracing::info!("Configuration loaded (hash: {})", hash);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!("Parser failed: {:#}", e);
    }

    tracing::info!("Parser finished");
}

/// Loads the config file given on the command line, or the built-in defaults
fn load_configuration(cli: &Cli) -> ConfigResult<(Config, Option<String>)> {
    match &cli.config {
        Some(path) => {
            let (config, hash) = load_config_with_hash(path)?;
            Ok((config, Some(hash)))
        }
        None => Ok((load_or_default(None)?, None)),
    }
}

/// Runs the selected mode and emits its results
async fn run(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let mut session = CachedSession::from_config(config).context("Failed to open session")?;
    if cli.clear_cache {
        session.clear_cache().context("Failed to clear cache")?;
    }

    let results = run_mode(cli.mode, &mut session, config)
        .await
        .with_context(|| format!("Mode '{}' failed", cli.mode))?;

    if let Some(table) = results.filter(|_| cli.mode.produces_table()) {
        let target = FileTarget {
            results_dir: config.paths.results(),
            prefix: cli.mode.as_str().to_string(),
            datetime_format: config.output.datetime_format.clone(),
        };
        emit(&table, cli.output.unwrap_or_default(), target).context("Failed to emit results")?;
    }

    Ok(())
}
