//! Drive strategies.
//!
//! Every strategy answers the same question: given the speed the fan would need
//! to hit the requested flow (`base_speed`), which rotational speed is actually
//! available? The answer feeds the affinity rescaling in the selection pipeline.
//!
//! - [`FixedSpeed`]: synchronous motor speeds, with one relaxed retry.
//! - [`VariableFrequency`]: any speed inside the fan's rated range.
//! - [`BeltRatio`]: the discrete speeds a belt-scheme table lists for the model.

use crate::catalog::BeltScheme;
use crate::domain::DriveVariant;
use crate::error::SelectionError;

pub mod belt;
pub mod fixed;
pub mod vfd;

pub use belt::BeltRatio;
pub use fixed::{FixedSpeed, STANDARD_SPEEDS_RPM};
pub use vfd::VariableFrequency;

/// Per-record inputs to a speed rule.
#[derive(Debug, Clone, Copy)]
pub struct SpeedInputs<'a> {
    pub model: &'a str,
    /// Rated minimum speed (rpm), when the catalog lists one.
    pub rated_min: Option<f64>,
    /// Rated maximum speed (rpm); catalog curves are tabulated at this speed.
    pub rated_max: f64,
    /// `floor(N_max · Q_req / Q_cross)`.
    pub base_speed: f64,
    /// Allowed pressure undershoot (%).
    pub fluctuation_down: f64,
}

pub trait SpeedRule: Send + Sync {
    fn variant(&self) -> DriveVariant;

    /// Pick the running speed (rpm) or reject the record.
    fn choose_speed(&self, inputs: &SpeedInputs<'_>) -> Result<f64, SelectionError>;

    fn no_speed(&self, inputs: &SpeedInputs<'_>) -> SelectionError {
        SelectionError::NoAdmissibleSpeed {
            drive: self.variant().display_name(),
            base_speed: inputs.base_speed,
        }
    }
}

/// Strategy for a request's drive variant.
pub fn rule_for(variant: DriveVariant, belt: &BeltScheme) -> Box<dyn SpeedRule + '_> {
    match variant {
        DriveVariant::FixedSpeed => Box::new(FixedSpeed::standard()),
        DriveVariant::VariableFrequency => Box::new(VariableFrequency),
        DriveVariant::BeltRatio => Box::new(BeltRatio::new(belt)),
    }
}

/// Speed that would move the crossing flow onto the requested flow.
pub fn base_speed(rated_max: f64, requested_flow: f64, cross_flow: f64) -> f64 {
    (rated_max * requested_flow / cross_flow).floor()
}

/// Smallest speed in `[lo, hi]`, if any.
pub(crate) fn smallest_in_range(speeds: &[f64], lo: f64, hi: f64) -> Option<f64> {
    speeds
        .iter()
        .copied()
        .filter(|s| *s >= lo && *s <= hi)
        .min_by(f64::total_cmp)
}

/// Shaft power (kW) at an operating point, reserve included.
///
/// `flow` in m³/h, `pressure` in Pa, `efficiency` as a fraction. The bare power is
/// rounded to 0.1 kW before the reserve multiplier is applied.
pub fn shaft_power_kw(flow: f64, pressure: f64, efficiency: f64, reserve_pct: f64) -> Result<f64, SelectionError> {
    if !(efficiency.is_finite() && efficiency > 0.0) {
        return Err(SelectionError::invalid_field(
            "efficiency",
            format!("operating efficiency must be > 0, got {efficiency}"),
        ));
    }
    let kw = flow * pressure / (3600.0 * 1000.0 * efficiency);
    Ok((1.0 + reserve_pct / 100.0) * (10.0 * kw).round() / 10.0)
}
