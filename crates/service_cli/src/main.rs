//! Freight CLI - Command Line Operations for the Freight-Rate Simulator
//!
//! This is the operational entry point for the freight-rate simulator.
//!
//! # Commands
//!
//! - `freight simulate` - Simulate weekly rate paths and report bands and risk
//! - `freight option` - Value a call or put on the simulated paths
//! - `freight demand --run <file>` - Before/after demand shock analysis
//! - `freight check --run <file>` - Validate a run file
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the model and pricing
//! layers to a command-line interface. Logs go to stderr so `--format json`
//! output on stdout stays machine-readable.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::option::OptionArgs;
use commands::{OutputFormat, SimulationArgs};
use config::{LogLevel, RunConfig};

/// Freight-rate simulator CLI
#[derive(Parser)]
#[command(name = "freight")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Run file (TOML) with [simulation], [option], [demand] and [supply] tables
    #[arg(short, long, global = true)]
    run: Option<PathBuf>,

    /// Log level (overrides the run file and FREIGHT_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate weekly rate paths
    Simulate {
        #[command(flatten)]
        simulation: SimulationArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Value an option on simulated paths
    Option {
        #[command(flatten)]
        simulation: SimulationArgs,

        #[command(flatten)]
        option: OptionArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Fit before/after demand curves and compare market equilibria
    Demand {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate the run file and print the merged configuration
    Check,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = RunConfig::load(cli.run.as_deref()).context("failed to load configuration")?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.verbose {
        config.log_level = LogLevel::Debug;
    }
    init_tracing(config.log_level);

    match &cli.run {
        Some(path) => info!(run_file = %path.display(), "configuration loaded"),
        None => debug!("no run file, using defaults"),
    }

    let outcome = match cli.command {
        Commands::Simulate { simulation, format } => {
            commands::simulate::run(&config, &simulation, format)
        }
        Commands::Option {
            simulation,
            option,
            format,
        } => commands::option::run(&config, &simulation, &option, format),
        Commands::Demand { format } => commands::demand::run(&config, format),
        Commands::Check => commands::check::run(&config, cli.run.as_deref()),
    };
    outcome.context("command failed")
}

/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter_str()));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
