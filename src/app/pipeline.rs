//! Shared selection pipeline used by the `select` and `demo` commands.
//!
//! select → charts (optional, after all math is done)
//!
//! The commands can then focus on where the catalog and requirement come from
//! and how results are presented.

use tracing::info;

use crate::catalog::Catalog;
use crate::chart::{AsciiChart, ChartRenderer, QuickChart, attach_charts};
use crate::cli::ChartKind;
use crate::config::EngineConfig;
use crate::domain::Requirement;
use crate::error::AppError;
use crate::select::{SelectionReport, select_fans_with_diagnostics};

/// All computed outputs of a single selection run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub requirement: Requirement,
    pub report: SelectionReport,
    pub catalog_size: usize,
    pub chart_failures: usize,
}

/// Renderer for the configured chart kind.
pub fn chart_renderer(config: &EngineConfig) -> Result<Option<Box<dyn ChartRenderer>>, AppError> {
    let renderer: Option<Box<dyn ChartRenderer>> = match config.chart {
        ChartKind::None => None,
        ChartKind::Ascii => Some(Box::new(AsciiChart::new(config.plot_width, config.plot_height))),
        ChartKind::Quickchart => {
            let qc = QuickChart::new(config.chart_url.clone())
                .map_err(|e| AppError::new(4, format!("Failed to set up chart client: {e}")))?;
            Some(Box::new(qc))
        }
    };
    Ok(renderer)
}

/// Execute a selection and render charts for the accepted results.
pub fn run_selection(catalog: &Catalog, requirement: Requirement, config: &EngineConfig) -> Result<RunOutput, AppError> {
    let mut report = select_fans_with_diagnostics(catalog, &requirement, &config.options)?;

    let mut chart_failures = 0;
    if let Some(renderer) = chart_renderer(config)? {
        chart_failures = attach_charts(&mut report.results, renderer.as_ref());
        info!(renderer = renderer.name(), failures = chart_failures, "charts rendered");
    }

    Ok(RunOutput {
        requirement,
        report,
        catalog_size: catalog.len(),
        chart_failures,
    })
}
