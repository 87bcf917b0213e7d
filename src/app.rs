//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs logging
//! - parses CLI arguments
//! - loads the catalog (or generates a synthetic one)
//! - runs the selection and prints reports/charts
//! - writes optional exports

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::catalog::Catalog;
use crate::chart::Chart;
use crate::cli::{CatalogCmdArgs, Command, DemoArgs, OutputArgs, SelectArgs};
use crate::config::{EngineConfig, catalog_paths, load_dotenv, requirement_from_args};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fansel` binary.
pub fn run() -> Result<(), AppError> {
    load_dotenv();
    let cli = crate::cli::Cli::parse();
    init_tracing(cli.log.as_deref());

    match cli.command {
        Command::Select(args) => handle_select(args),
        Command::Catalog(args) => handle_catalog(args),
        Command::Demo(args) => handle_demo(args),
    }
}

/// Log to stderr; stdout carries reports only.
fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    // A second init (tests, embedding) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let config = EngineConfig::new(&args.engine, &args.output)?;
    let requirement = match &args.request {
        Some(path) => crate::io::read_requirement_json(path)?,
        None => requirement_from_args(&args.requirement)?,
    };
    let catalog = Catalog::load(&catalog_paths(&args.catalog))?;

    let run = pipeline::run_selection(&catalog, requirement, &config)?;
    present(&run, &args.output)
}

fn handle_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = EngineConfig::new(&args.engine, &args.output)?;
    let mut req_args = args.requirement.clone();
    req_args.flow = req_args.flow.or(Some(5000.0));
    req_args.pressure = req_args.pressure.or(Some(600.0));
    let requirement = requirement_from_args(&req_args)?;

    let catalog = crate::data::generate_catalog(args.count, args.seed)?;
    let started = std::time::Instant::now();
    let run = pipeline::run_selection(&catalog, requirement, &config)?;
    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "demo selection finished");

    present(&run, &args.output)
}

fn handle_catalog(args: CatalogCmdArgs) -> Result<(), AppError> {
    let catalog = Catalog::load(&catalog_paths(&args.catalog))?;
    let structure = catalog.structure();

    if args.json {
        let text = serde_json::to_string_pretty(&structure)
            .map_err(|e| AppError::new(4, format!("Failed to serialize catalog summary: {e}")))?;
        println!("{text}");
    } else {
        println!("{}", crate::report::format_catalog_structure(&catalog, &structure));
    }
    Ok(())
}

fn present(run: &pipeline::RunOutput, output: &OutputArgs) -> Result<(), AppError> {
    println!(
        "{}",
        crate::report::format_run_summary(&run.requirement, &run.report, run.catalog_size)
    );
    println!("{}", crate::report::format_results(&run.report.results));

    for result in &run.report.results {
        match &result.chart {
            Some(Chart::Text { body }) => println!("{body}"),
            Some(Chart::Url { url }) => println!("{}: {url}", result.fan.label()),
            None => {}
        }
    }
    if run.chart_failures > 0 {
        println!("{} chart(s) could not be rendered.", run.chart_failures);
    }

    if output.diagnostics {
        println!("{}", crate::report::format_diagnostics(&run.report.rejections));
    }

    if let Some(path) = &output.export {
        crate::io::write_results_json(path, &run.requirement, &run.report.results)?;
    }
    if let Some(path) = &output.export_csv {
        crate::io::write_results_csv(path, &run.report.results)?;
    }
    Ok(())
}
