//! confgrid CLI: print classification metrics over a grid of confusion matrices.
//!
//! Without arguments it prints the reference report: population 100, true
//! negatives 7, false negatives 0..=6 and false positives 0..=FN.

mod commands;

use anyhow::Context;
use clap::Parser;
use confgrid_core::config::{ConfigOverrides, GridOverrides, MetricsOverrides, OutputOverrides};
use confgrid_core::{ReportFormat, ZeroDivision};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// confgrid: precision, accuracy, recall and F1 over a grid of confusion matrices
#[derive(Parser, Debug)]
#[command(name = "confgrid", version, about, long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short, long, global = true)]
    format: Option<ReportFormat>,

    /// Print the title banner before the text header
    #[arg(long, global = true)]
    banner: bool,

    /// Size of the classified population
    #[arg(long, global = true)]
    total: Option<u32>,

    /// True negatives, held constant across the grid
    #[arg(long, global = true)]
    true_negatives: Option<u32>,

    /// Largest false-negative count to enumerate
    #[arg(long, global = true)]
    max_false_negatives: Option<u32>,

    /// Zero-denominator policy: zero, nan, skip, error
    #[arg(long, global = true)]
    zero_division: Option<ZeroDivision>,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Subcommand (defaults to `report`)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Enumerate the grid and print one row per (FN, FP) pair
    Report,
    /// Score a single confusion matrix
    Score {
        /// True positives
        #[arg(long)]
        tp: u32,
        /// True negatives
        #[arg(long)]
        tn: u32,
        /// False positives
        #[arg(long)]
        fp: u32,
        /// False negatives
        #[arg(long = "fn")]
        fn_: u32,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
enum ConfigAction {
    /// Show the effective configuration as TOML
    Show,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            grid: GridOverrides {
                total: self.total,
                true_negatives: self.true_negatives,
                max_false_negatives: self.max_false_negatives,
            },
            metrics: MetricsOverrides {
                zero_division: self.zero_division,
            },
            output: OutputOverrides {
                format: self.format,
                banner: self.banner.then_some(true),
            },
        }
    }

    fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report. RUST_LOG wins when set.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter);
    tracing_subscriber::registry().with(stderr_layer).init();

    let config = confgrid_core::load_config(cli.config.as_deref(), &cli.overrides())
        .context("Failed to load configuration")?;

    let stdout = std::io::stdout();
    let mut out = std::io::BufWriter::new(stdout.lock());
    commands::handle_command(cli.command.unwrap_or(Commands::Report), &config, &mut out)?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}
