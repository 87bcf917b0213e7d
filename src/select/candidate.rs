//! One catalog record through the full pipeline.
//!
//! extract → density-correct → fit → sample → cross → pick speed → rescale →
//! tolerance → power → motor.
//!
//! Everything here works on copies; the catalog record is only read.

use crate::catalog::Catalog;
use crate::curve::{
    DensityCorrector, extract_efficiency, extract_pressure, find_crossing, rescale_efficiency,
    rescale_operating_point, rescale_pressure, speed_ratio,
};
use crate::domain::{CurvePoint, Requirement, SelectionResult};
use crate::drive::{SpeedInputs, SpeedRule, base_speed, shaft_power_kw};
use crate::error::SelectionError;
use crate::math::{fit_polynomial, sample_over};
use crate::select::SelectOptions;

/// Shared, read-only context for evaluating records of one request.
pub(crate) struct Evaluator<'a> {
    pub catalog: &'a Catalog,
    pub requirement: &'a Requirement,
    pub rule: &'a dyn SpeedRule,
    pub options: &'a SelectOptions,
}

/// Fitted dense curve for one tabulated series.
fn dense_curve(
    points: &[CurvePoint],
    curve: &'static str,
    options: &SelectOptions,
) -> Result<Vec<CurvePoint>, SelectionError> {
    let poly = fit_polynomial(points, options.degree).map_err(|e| SelectionError::degenerate(curve, e.to_string()))?;
    sample_over(|x| poly.eval(x), points, options.step_count)
        .map_err(|e| SelectionError::degenerate(curve, e.to_string()))
}

fn sorted_by_flow(mut points: Vec<CurvePoint>) -> Vec<CurvePoint> {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
    points
}

impl Evaluator<'_> {
    pub fn evaluate(&self, index: usize) -> Result<SelectionResult, SelectionError> {
        let schema = &self.catalog.schema;
        let record = &self.catalog.fans[index];
        let req = self.requirement;
        let fan = self.catalog.identity(index);

        let raw_pressure = sorted_by_flow(extract_pressure(record, schema));
        if raw_pressure.is_empty() {
            return Err(SelectionError::DataAbsent { curve: "pressure" });
        }
        let raw_efficiency = sorted_by_flow(extract_efficiency(record, schema));
        if raw_efficiency.is_empty() {
            return Err(SelectionError::DataAbsent { curve: "efficiency" });
        }

        let rated_max = record
            .number(&schema.max_speed)
            .filter(|n| *n > 0.0)
            .ok_or_else(|| SelectionError::invalid_field(&schema.max_speed, "rated max speed must be > 0"))?;
        let rated_min = record.number(&schema.min_speed);

        let corrector = DensityCorrector::new(req, record.number(&schema.outlet_area), &schema.outlet_area)?;
        let base_curve = corrector.correct_pressure(&raw_pressure);
        let base_efficiency = corrector.correct_efficiency(&raw_pressure, &raw_efficiency);

        let dense = dense_curve(&base_curve, "pressure", self.options)?;
        let dense_efficiency = dense_curve(&base_efficiency, "efficiency", self.options)?;

        let crossing = find_crossing(&dense, &dense_efficiency, req.requested_point())?;
        let cross = crossing.operating_point();
        if cross.x < 1.0 {
            return Err(SelectionError::NoIntersection);
        }

        let inputs = SpeedInputs {
            model: &fan.model,
            rated_min,
            rated_max,
            base_speed: base_speed(rated_max, req.flow_rate, cross.x),
            fluctuation_down: req.fluctuation_down,
        };
        let speed = self.rule.choose_speed(&inputs)?;
        let k = speed_ratio(rated_max, speed);

        let mut operating_point = rescale_operating_point(cross, k);
        let (min, max) = req.pressure_band();
        if operating_point.y > max || operating_point.y < min {
            return Err(SelectionError::OutOfTolerance {
                pressure: operating_point.y,
                min,
                max,
            });
        }

        operating_point.power = shaft_power_kw(
            operating_point.x,
            operating_point.y,
            operating_point.efficiency,
            req.power_reserve,
        )?;
        let motor = self.catalog.motors.select(operating_point.power)?;

        Ok(SelectionResult {
            fan,
            drive: self.rule.variant(),
            base_curve: rescale_pressure(&base_curve, k),
            dense_curve: rescale_pressure(&dense, k),
            efficiency_curve: rescale_efficiency(&dense_efficiency, k),
            operating_point,
            requested_point: req.requested_point(),
            speed,
            power: motor,
            chart: None,
        })
    }
}
