//! CLI command definitions and argument parsing.

use crate::config::OutputFormat;
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Mirror - compare what a self-model claims with what the logs show.
#[derive(Debug, Parser)]
#[command(name = "mirror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (defaults to ./mirror.toml when present)
    #[arg(short, long, global = true, env = "MIRROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
        }
    }
}

/// Threshold presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PresetArg {
    /// Balanced defaults
    Default,
    /// Fewer, better supported findings
    Strict,
    /// Smaller gaps surface earlier
    Lenient,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare a self-model document against a directory of daily logs
    Analyze(AnalyzeArgs),

    /// List the categories and keywords used for classification
    Taxonomy,

    /// Show the effective configuration
    Config(ConfigArgs),
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Self-model document (e.g. will.md)
    #[arg(short, long)]
    pub self_model: PathBuf,

    /// Directory of YYYY-MM-DD.md logs, or a single file with `# YYYY-MM-DD` sections
    #[arg(short, long)]
    pub logs: PathBuf,

    /// Reference date for decay (defaults to today)
    #[arg(long, value_parser = parse_day)]
    pub now: Option<NaiveDate>,

    /// Write the report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show aligned and insufficient-evidence categories too
    #[arg(short, long)]
    pub all: bool,

    /// Replace configured thresholds with a preset
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Override the decay half-life in days (both corpora)
    #[arg(long)]
    pub half_life: Option<u32>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Only validate the configuration
    #[arg(long)]
    pub check: bool,
}

fn parse_day(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| format!("'{}' is not a YYYY-MM-DD date", value))
}
