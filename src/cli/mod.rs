//! Command-line parsing for the `fansel` fan-selection tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! selection engine. Catalog locations and service URLs can also come from the
//! environment (or a `.env` file), so deployments don't have to repeat them.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::{DriveType, PressureBasis};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fansel", version, about = "Fan selection from catalog performance curves")]
pub struct Cli {
    /// Log filter (e.g. `debug`, `fan_select=trace`). Overrides RUST_LOG.
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select fans for a duty point from a catalog.
    Select(SelectArgs),
    /// Summarize the loaded catalog (record count, columns, first record).
    Catalog(CatalogCmdArgs),
    /// Run a selection against a seeded synthetic catalog.
    Demo(DemoArgs),
}

/// Where the catalog data lives.
#[derive(Debug, Args, Clone)]
pub struct CatalogArgs {
    /// Fan catalog (CSV or JSON array of objects).
    #[arg(long, env = "FANSEL_CATALOG", value_name = "FILE")]
    pub catalog: PathBuf,

    /// Belt-drive speed table (CSV with `model` and `speed` columns).
    #[arg(long, env = "FANSEL_BELT_SCHEME", value_name = "CSV")]
    pub belt_scheme: Option<PathBuf>,

    /// Motor ratings (CSV with a `power_kw` column). Defaults to the standard IEC list.
    #[arg(long, env = "FANSEL_MOTORS", value_name = "CSV")]
    pub motors: Option<PathBuf>,

    /// Column schema override (JSON).
    #[arg(long, env = "FANSEL_SCHEMA", value_name = "JSON")]
    pub schema: Option<PathBuf>,
}

/// Duty point and options given directly as flags.
#[derive(Debug, Args, Clone)]
pub struct RequirementArgs {
    /// Requested flow (m³/h).
    #[arg(short = 'q', long)]
    pub flow: Option<f64>,

    /// Requested pressure (Pa).
    #[arg(short = 'p', long)]
    pub pressure: Option<f64>,

    /// Ambient temperature (°C).
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    pub temperature: f64,

    /// Site altitude (m).
    #[arg(long, default_value_t = 0.0)]
    pub altitude: f64,

    /// Pressure convention of the requested duty.
    #[arg(long, value_enum, default_value_t = PressureBasis::Total)]
    pub basis: PressureBasis,

    /// Allowed pressure overshoot (%).
    #[arg(long, default_value_t = 10.0)]
    pub up: f64,

    /// Allowed pressure undershoot (%).
    #[arg(long, default_value_t = 10.0)]
    pub down: f64,

    /// Motor power reserve (%).
    #[arg(long, default_value_t = 10.0)]
    pub reserve: f64,

    /// Motor drive.
    #[arg(long, value_enum, default_value_t = DriveType::Direct)]
    pub drive: DriveType,

    /// Belt transmission (belt-driven catalog variants only).
    #[arg(long)]
    pub belt: bool,

    /// Fan type filter, or `All`.
    #[arg(long = "type", default_value = "All")]
    pub fan_type: String,

    /// Series filter, or `All`.
    #[arg(long, default_value = "All")]
    pub series: String,

    /// Execution flag column that must be set, or `All`.
    #[arg(long, default_value = "All")]
    pub execution: String,
}

/// Engine tunables.
#[derive(Debug, Args, Clone)]
pub struct EngineArgs {
    /// Polynomial degree for curve fits.
    #[arg(long, default_value_t = 3)]
    pub degree: usize,

    /// Dense sampling steps per curve.
    #[arg(long, default_value_t = 1023)]
    pub steps: usize,

    /// Worker threads (default: one per core).
    #[arg(long, env = "FANSEL_THREADS")]
    pub threads: Option<usize>,
}

/// How accepted results are charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    None,
    /// Text plots in the terminal.
    Ascii,
    /// Hosted images through a QuickChart service.
    Quickchart,
}

/// Output options shared by `select` and `demo`.
#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    /// Chart renderer for accepted results.
    #[arg(long, value_enum, default_value_t = ChartKind::None)]
    pub chart: ChartKind,

    /// QuickChart base URL.
    #[arg(long, env = "FANSEL_CHART_URL", default_value = crate::chart::quickchart::DEFAULT_BASE_URL)]
    pub chart_url: String,

    /// Plot width (columns) for ASCII charts.
    #[arg(long, default_value_t = 72)]
    pub width: usize,

    /// Plot height (rows) for ASCII charts.
    #[arg(long, default_value_t = 18)]
    pub height: usize,

    /// List excluded records and why.
    #[arg(long)]
    pub diagnostics: bool,

    /// Export full results (curves included) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,

    /// Export a one-line-per-result summary to CSV.
    #[arg(long = "export-csv", value_name = "CSV")]
    pub export_csv: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Requirement JSON file; replaces the duty-point flags.
    #[arg(long, value_name = "JSON", conflicts_with_all = ["flow", "pressure"])]
    pub request: Option<PathBuf>,

    #[command(flatten)]
    pub requirement: RequirementArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct CatalogCmdArgs {
    #[command(flatten)]
    pub catalog: CatalogArgs,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DemoArgs {
    /// Number of synthetic fans.
    #[arg(short = 'n', long, default_value_t = 200)]
    pub count: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[command(flatten)]
    pub requirement: RequirementArgs,

    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}
