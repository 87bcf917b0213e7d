//! Request-level selection.
//!
//! [`select_fans`] is the engine's entry point: validate the requirement,
//! pre-filter the catalog, evaluate the survivors in parallel, and return the
//! accepted candidates in catalog order. Per-record failures only exclude that
//! record; [`select_fans_with_diagnostics`] also returns why each was excluded.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::catalog::filter::prefilter;
use crate::domain::{Rejection, Requirement, SelectionResult};
use crate::drive::rule_for;
use crate::error::SelectionError;
use crate::math::{DEFAULT_DEGREE, DEFAULT_STEP_COUNT};

mod candidate;

use candidate::Evaluator;

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOptions {
    /// Polynomial degree for every curve fit.
    pub degree: usize,
    /// Dense sampling steps (samples = steps + 1).
    pub step_count: usize,
    /// Worker threads; `None` uses rayon's global pool.
    pub threads: Option<usize>,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            step_count: DEFAULT_STEP_COUNT,
            threads: None,
        }
    }
}

/// Accepted results plus per-record exclusions for one request.
#[derive(Debug, Clone, Default)]
pub struct SelectionReport {
    /// Records left after pre-filtering.
    pub candidates: usize,
    pub results: Vec<SelectionResult>,
    pub rejections: Vec<Rejection>,
}

/// Run a selection with default options.
pub fn select_fans(catalog: &Catalog, requirement: &Requirement) -> Result<Vec<SelectionResult>, SelectionError> {
    select_fans_with_diagnostics(catalog, requirement, &SelectOptions::default()).map(|r| r.results)
}

/// Run a selection and keep the reason every evaluated record was excluded.
pub fn select_fans_with_diagnostics(
    catalog: &Catalog,
    requirement: &Requirement,
    options: &SelectOptions,
) -> Result<SelectionReport, SelectionError> {
    let requirement = requirement.clone().validate()?;
    let drive = requirement.drive_variant();

    let candidates = prefilter(&catalog.fans, &catalog.schema, &requirement);
    info!(
        catalog = catalog.len(),
        candidates = candidates.len(),
        drive = drive.display_name(),
        "pre-filter complete"
    );

    let rule = rule_for(drive, &catalog.belt);
    let evaluator = Evaluator {
        catalog,
        requirement: &requirement,
        rule: rule.as_ref(),
        options,
    };

    let outcomes = run_parallel(&candidates, options.threads, |index| evaluator.evaluate(index));

    let mut report = SelectionReport {
        candidates: candidates.len(),
        ..SelectionReport::default()
    };
    for (index, outcome) in candidates.iter().zip(outcomes) {
        match outcome {
            Ok(result) => report.results.push(result),
            Err(reason) => {
                let fan = catalog.identity(*index);
                debug!(fan = %fan.id, kind = reason.kind(), %reason, "record excluded");
                report.rejections.push(Rejection { fan, reason });
            }
        }
    }

    info!(accepted = report.results.len(), excluded = report.rejections.len(), "selection complete");
    Ok(report)
}

/// Map `f` over `indices` in parallel, preserving order.
fn run_parallel<T, F>(indices: &[usize], threads: Option<usize>, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    let run = || indices.par_iter().map(|&i| f(i)).collect::<Vec<T>>();
    match threads {
        None => run(),
        Some(n) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
            Ok(pool) => pool.install(run),
            Err(e) => {
                warn!(threads = n, error = %e, "could not build worker pool; using the global pool");
                run()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogFilter, DriveType, FanRecord, PressureBasis};

    fn requirement() -> Requirement {
        Requirement {
            flow_rate: 1000.0,
            pressure: 440.0,
            temperature: 20.0,
            height: 0.0,
            pressure_basis: PressureBasis::Total,
            fluctuation_up: 10.0,
            fluctuation_down: 10.0,
            power_reserve: 0.0,
            drive_type: DriveType::Direct,
            belt: false,
            fan_type: CatalogFilter::All,
            series: CatalogFilter::All,
            execution: CatalogFilter::All,
        }
    }

    #[test]
    fn malformed_requirement_is_escalated() {
        let catalog = Catalog::from_fans(vec![FanRecord::new().with_text("ID", "F-1")]);
        let mut req = requirement();
        req.flow_rate = f64::NAN;
        assert!(matches!(
            select_fans(&catalog, &req),
            Err(SelectionError::MalformedRequirement { .. })
        ));
    }

    #[test]
    fn record_without_curves_is_excluded_as_data_absent() {
        let catalog = Catalog::from_fans(vec![FanRecord::new().with_text("ID", "F-1").with_number("Max speed", 1450.0)]);
        let report = select_fans_with_diagnostics(&catalog, &requirement(), &SelectOptions::default()).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.candidates, 1);
        assert_eq!(report.rejections[0].reason, SelectionError::DataAbsent { curve: "pressure" });
    }

    #[test]
    fn parallel_map_preserves_order() {
        let out = run_parallel(&[5, 3, 9, 1], Some(2), |i| i * 10);
        assert_eq!(out, vec![50, 30, 90, 10]);
    }
}
