use chrono::NaiveDateTime;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum, ValueHint};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Synthetic grid blackout traces and reliability KPIs",
    long_about = None
)]
pub struct Cli {
    /// Set the logging level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: tracing::Level,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a blackout trace and report its KPIs
    Generate {
        /// Scenario file (see `init-config`); flags below override it
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        /// Mean blackouts per month
        #[arg(long)]
        frequency: Option<f64>,
        /// Mean blackout duration in hours
        #[arg(long)]
        duration: Option<f64>,
        /// Standard deviation of the monthly frequency, as a fraction of the mean
        #[arg(long)]
        std_frequency: Option<f64>,
        /// Standard deviation of the duration, as a fraction of the mean
        #[arg(long)]
        std_duration: Option<f64>,
        /// Evaluate this many hourly days from 2024-01-01
        #[arg(long, conflicts_with = "periods")]
        days: Option<u32>,
        /// Evaluate an explicit index with this many timestamps
        #[arg(long)]
        periods: Option<usize>,
        /// First timestamp of the explicit index (e.g. 2024-06-01T00:00:00)
        #[arg(long, requires = "periods")]
        start: Option<NaiveDateTime>,
        /// Timestep of the explicit index in minutes
        #[arg(long, requires = "periods")]
        step_minutes: Option<u32>,
        /// Random seed for a reproducible trace
        #[arg(long)]
        seed: Option<u64>,
        /// Availability trace output (.csv or .parquet)
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// Also write the drawn events (.csv or .parquet)
        #[arg(long, value_hint = ValueHint::FilePath)]
        events_out: Option<PathBuf>,
        /// KPI report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
        /// Skip writing the run manifest next to the output
        #[arg(long)]
        no_manifest: bool,
    },
    /// Compute KPIs of an existing availability trace
    Kpi {
        /// Trace with `timestamp` and `availability` columns
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// KPI report format
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Show the start-time weights a scenario resolves to
    Likelihood {
        /// Scenario file; defaults are used when omitted
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
        format: OutputFormat,
    },
    /// Write a scenario file with the default settings
    InitConfig {
        /// Destination path
        #[arg(default_value = "blackout.toml", value_hint = ValueHint::FilePath)]
        out: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: Shell,
        /// Write output to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned table
    Plain,
    /// Pretty-printed JSON
    Json,
}

pub fn build_cli_command() -> clap::Command {
    Cli::command()
}
