//! Process-wide settings assembled from CLI flags and the environment.
//!
//! `.env` is read once at startup (see [`load_dotenv`]) so clap's `env` fallbacks
//! see its values; everything after that works from [`EngineConfig`].

use crate::catalog::CatalogPaths;
use crate::cli::{CatalogArgs, ChartKind, EngineArgs, OutputArgs, RequirementArgs};
use crate::domain::{CatalogFilter, Requirement};
use crate::error::AppError;
use crate::select::SelectOptions;

/// Load `.env` from the working directory, if present.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Resolved settings for one command.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub options: SelectOptions,
    pub chart: ChartKind,
    pub chart_url: String,
    pub plot_width: usize,
    pub plot_height: usize,
}

impl EngineConfig {
    pub fn new(engine: &EngineArgs, output: &OutputArgs) -> Result<Self, AppError> {
        if engine.degree == 0 {
            return Err(AppError::new(2, "Polynomial degree must be >= 1."));
        }
        if engine.steps == 0 {
            return Err(AppError::new(2, "Step count must be >= 1."));
        }
        if engine.threads == Some(0) {
            return Err(AppError::new(2, "Thread count must be >= 1."));
        }

        Ok(Self {
            options: SelectOptions {
                degree: engine.degree,
                step_count: engine.steps,
                threads: engine.threads,
            },
            chart: output.chart,
            chart_url: output.chart_url.clone(),
            plot_width: output.width,
            plot_height: output.height,
        })
    }
}

pub fn catalog_paths(args: &CatalogArgs) -> CatalogPaths {
    CatalogPaths {
        fans: args.catalog.clone(),
        belt_scheme: args.belt_scheme.clone(),
        motors: args.motors.clone(),
        schema: args.schema.clone(),
    }
}

/// Build and validate a requirement from duty-point flags.
pub fn requirement_from_args(args: &RequirementArgs) -> Result<Requirement, AppError> {
    let flow_rate = args
        .flow
        .ok_or_else(|| AppError::new(2, "Missing --flow (or pass --request <JSON>)."))?;
    let pressure = args
        .pressure
        .ok_or_else(|| AppError::new(2, "Missing --pressure (or pass --request <JSON>)."))?;

    let requirement = Requirement {
        flow_rate,
        pressure,
        temperature: args.temperature,
        height: args.altitude,
        pressure_basis: args.basis,
        fluctuation_up: args.up,
        fluctuation_down: args.down,
        power_reserve: args.reserve,
        drive_type: args.drive,
        belt: args.belt,
        fan_type: CatalogFilter::parse(&args.fan_type),
        series: CatalogFilter::parse(&args.series),
        execution: CatalogFilter::parse(&args.execution),
    };
    Ok(requirement.validate()?)
}
