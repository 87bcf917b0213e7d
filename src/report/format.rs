//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine stays free of presentation concerns
//! - output changes are localized

use crate::catalog::{Catalog, CatalogStructure};
use crate::domain::{Rejection, Requirement, SelectionResult};
use crate::select::SelectionReport;

/// Header block: the request as the engine understood it, plus counts.
pub fn format_run_summary(requirement: &Requirement, report: &SelectionReport, catalog_size: usize) -> String {
    let mut out = String::new();
    let (min, max) = requirement.pressure_band();

    out.push_str("=== fansel - fan selection ===\n");
    out.push_str(&format!(
        "Duty: {:.0} m³/h @ {:.0} Pa ({:?}) | band [{min:.0}, {max:.0}] Pa\n",
        requirement.flow_rate, requirement.pressure, requirement.pressure_basis,
    ));
    out.push_str(&format!(
        "Air: {:.1} °C, {:.0} m | drive: {} | reserve: {:.0} %\n",
        requirement.temperature,
        requirement.height,
        requirement.drive_variant().display_name(),
        requirement.power_reserve,
    ));
    out.push_str(&format!(
        "Filters: type={} series={} execution={}\n",
        requirement.fan_type, requirement.series, requirement.execution
    ));
    out.push_str(&format!(
        "Catalog: {catalog_size} | candidates: {} | accepted: {} | excluded: {}\n",
        report.candidates,
        report.results.len(),
        report.rejections.len()
    ));
    out
}

/// Accepted results table.
pub fn format_results(results: &[SelectionResult]) -> String {
    if results.is_empty() {
        return "No fan satisfies the requested duty.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(
        format!(
            "{:<20} {:<10} {:>6} {:>8} {:>8} {:>6} {:>8} {:>8}\n",
            "model", "series", "rpm", "flow", "press.", "eff%", "shaft", "motor"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<20} {:-<10} {:->6} {:->8} {:->8} {:->6} {:->8} {:->8}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for r in results {
        let op = &r.operating_point;
        out.push_str(
            format!(
                "{:<20} {:<10} {:>6.0} {:>8.0} {:>8.0} {:>6.1} {:>8.2} {:>8}\n",
                truncate(&r.fan.label(), 20),
                truncate(r.fan.series.as_deref().unwrap_or(""), 10),
                r.speed,
                op.x,
                op.y,
                op.efficiency * 100.0,
                op.power,
                r.power,
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Excluded records grouped by reason kind, then listed.
pub fn format_diagnostics(rejections: &[Rejection]) -> String {
    let mut out = String::new();
    if rejections.is_empty() {
        return out;
    }

    let mut counts: Vec<(&'static str, usize)> = Vec::new();
    for r in rejections {
        let kind = r.reason.kind();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }

    out.push_str("Excluded:\n");
    for (kind, n) in &counts {
        out.push_str(&format!("  {kind:<20} {n}\n"));
    }
    out.push('\n');
    for r in rejections {
        out.push_str(&format!("  {:<20} {}\n", truncate(&r.fan.id, 20), r.reason));
    }
    out
}

/// Catalog overview for `fansel catalog`.
pub fn format_catalog_structure(catalog: &Catalog, structure: &CatalogStructure) -> String {
    let mut out = String::new();
    out.push_str(&format!("Fans: {}\n", structure.count));
    out.push_str(&format!("Motor ratings: {}\n", catalog.motors.ratings().len()));
    out.push_str(&format!("Belt scheme models: {}\n", catalog.belt.model_count()));
    out.push_str(&format!("Columns ({}):\n", structure.headers.len()));
    for h in &structure.headers {
        out.push_str(&format!("  {h}\n"));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
