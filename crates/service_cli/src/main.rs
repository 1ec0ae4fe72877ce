//! Area Estimator CLI - Monte Carlo estimation of the area inside a curve
//!
//! # Commands
//!
//! - `area-estimator threads <samples> <left> <bottom> <right> <top> <iterations>`
//!   - shared-memory worker pool
//! - `area-estimator sequential <samples> <left> <bottom> <right> <top> <iterations>`
//!   - single worker baseline
//! - `area-estimator distributed <samples> <left> <bottom> <right> <top>`
//!   - one participant per rank, collective sum to rank 0
//!
//! Results go to stdout; diagnostics go to stderr through `tracing`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::EstimateArgs;
use config::{build_config, CliOverrides};

/// Monte Carlo curve-area estimator
#[derive(Parser)]
#[command(name = "area-estimator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug log level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to area-estimator.toml if present)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run identifier the worker seeds are derived from
    #[arg(long, global = true)]
    run_id: Option<u64>,

    /// Remainder policy (drop, first-worker, spread, strict)
    #[arg(long, global = true)]
    remainder: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate on a pool of worker threads
    #[command(alias = "shared")]
    Threads {
        #[command(flatten)]
        args: EstimateArgs,

        /// Number of timed iterations
        iteration_count: u32,

        /// Worker threads (overrides the config file)
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Estimate on a single worker
    Sequential {
        #[command(flatten)]
        args: EstimateArgs,

        /// Number of timed iterations
        iteration_count: u32,
    },

    /// Estimate with independent participants joined by a collective sum
    Distributed {
        #[command(flatten)]
        args: EstimateArgs,

        /// Participants (overrides the config file)
        #[arg(short, long)]
        ranks: Option<usize>,

        /// Number of timed iterations
        #[arg(short, long, default_value = "1")]
        iterations: u32,
    },
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config_file: self.config.clone(),
            run_id: self.run_id,
            remainder: self.remainder.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = build_config(&cli.overrides()).context("Failed to load configuration")?;

    init_tracing(settings.log_level.as_filter_str());
    debug!(?settings, "Configuration loaded");

    match &cli.command {
        Commands::Threads {
            args,
            iteration_count,
            workers,
        } => {
            let workers = workers.unwrap_or(settings.workers);
            commands::threads::run(&settings, args, workers, *iteration_count)
                .context("Shared-memory estimation failed")
        }
        Commands::Sequential {
            args,
            iteration_count,
        } => commands::threads::run(&settings, args, 1, *iteration_count)
            .context("Sequential estimation failed"),
        Commands::Distributed {
            args,
            ranks,
            iterations,
        } => {
            let ranks = ranks.unwrap_or(settings.ranks);
            commands::distributed::run(&settings, args, ranks, *iterations)
                .context("Distributed estimation failed")
        }
    }
}
