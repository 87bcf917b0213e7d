//! Air-density and pressure-convention correction.
//!
//! Under the static convention the fan's dynamic pressure at the outlet,
//! `pd = ρ·v²/2` with `v = Q / A / 3600`, is subtracted from every tabulated
//! pressure. Efficiency drops in the same proportion as the pressure at that flow.

use crate::domain::{CurvePoint, PressureBasis, Requirement};
use crate::error::SelectionError;
use crate::math::interpolate_clamped;

/// Air density at 0 °C, sea level (kg/m³).
pub const REFERENCE_DENSITY: f64 = 1.2920;

const ZERO_CELSIUS_K: f64 = 273.15;

/// `ρ = 1.2920 · 273.15 / (273.15 + T) · (1 − H / 10000)`.
pub fn air_density(temperature_c: f64, height_m: f64) -> f64 {
    REFERENCE_DENSITY * (ZERO_CELSIUS_K / (ZERO_CELSIUS_K + temperature_c)) * (1.0 - height_m / 10_000.0)
}

/// Dynamic pressure (Pa) for flow `q` (m³/h) through outlet area `area` (m²).
pub fn dynamic_pressure(density: f64, q: f64, area: f64) -> f64 {
    let v = q / area / 3600.0;
    density * v * v / 2.0
}

/// Per-record density correction for one request.
#[derive(Debug, Clone, Copy)]
pub struct DensityCorrector {
    density: f64,
    /// Outlet area, only present under the static convention.
    outlet_area: Option<f64>,
}

impl DensityCorrector {
    /// Build the corrector for a record. `outlet_area` is only consulted under the
    /// static convention, where a missing or non-positive area rejects the record.
    pub fn new(req: &Requirement, outlet_area: Option<f64>, area_field: &str) -> Result<Self, SelectionError> {
        let density = air_density(req.temperature, req.height);
        let outlet_area = match req.pressure_basis {
            PressureBasis::Total => None,
            PressureBasis::Static => match outlet_area {
                Some(a) if a.is_finite() && a > 0.0 => Some(a),
                Some(a) => {
                    return Err(SelectionError::invalid_field(
                        area_field,
                        format!("outlet area must be > 0 for static pressure, got {a}"),
                    ));
                }
                None => {
                    return Err(SelectionError::invalid_field(
                        area_field,
                        "outlet area is required for static pressure",
                    ));
                }
            },
        };
        Ok(Self { density, outlet_area })
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    fn dynamic_at(&self, q: f64) -> f64 {
        self.outlet_area
            .map_or(0.0, |area| dynamic_pressure(self.density, q, area))
    }

    /// `floor(y − pd(x))` for every point.
    pub fn correct_pressure(&self, points: &[CurvePoint]) -> Vec<CurvePoint> {
        points
            .iter()
            .map(|p| CurvePoint::new(p.x, (p.y - self.dynamic_at(p.x)).floor()))
            .collect()
    }

    /// Scale efficiency by `(p − pd) / p`, with `p` the uncorrected pressure
    /// interpolated at each efficiency point's own flow.
    pub fn correct_efficiency(&self, raw_pressure: &[CurvePoint], efficiency: &[CurvePoint]) -> Vec<CurvePoint> {
        efficiency
            .iter()
            .map(|e| {
                let pd = self.dynamic_at(e.x);
                let ratio = match interpolate_clamped(raw_pressure, e.x) {
                    Some(p) if p > 0.0 && pd > 0.0 => (p - pd) / p,
                    _ => 1.0,
                };
                CurvePoint::new(e.x, e.y * ratio)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogFilter, DriveType};

    fn requirement(basis: PressureBasis) -> Requirement {
        Requirement {
            flow_rate: 1000.0,
            pressure: 440.0,
            temperature: 20.0,
            height: 0.0,
            pressure_basis: basis,
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
    fn density_at_twenty_degrees() {
        assert!((air_density(20.0, 0.0) - 1.20385).abs() < 1e-4);
        assert!((air_density(0.0, 1000.0) - 1.1628).abs() < 1e-4);
    }

    #[test]
    fn static_convention_subtracts_dynamic_pressure() {
        let c = DensityCorrector::new(&requirement(PressureBasis::Static), Some(0.1), "Outlet area").unwrap();
        // 3600 m³/h through 0.1 m² is 10 m/s: pd ≈ 60.19 Pa.
        let pts = c.correct_pressure(&[CurvePoint::new(3600.0, 500.0), CurvePoint::new(0.0, 600.0)]);
        assert_eq!(pts[0].y, 439.0);
        assert_eq!(pts[1].y, 600.0);
    }

    #[test]
    fn efficiency_scales_with_interpolated_pressure_ratio() {
        let c = DensityCorrector::new(&requirement(PressureBasis::Static), Some(0.1), "Outlet area").unwrap();
        let raw = [CurvePoint::new(0.0, 600.0), CurvePoint::new(7200.0, 600.0)];
        let eff = c.correct_efficiency(&raw, &[CurvePoint::new(3600.0, 0.7)]);
        let expected = 0.7 * (600.0 - dynamic_pressure(c.density(), 3600.0, 0.1)) / 600.0;
        assert!((eff[0].y - expected).abs() < 1e-12);
    }

    #[test]
    fn total_convention_only_floors() {
        let c = DensityCorrector::new(&requirement(PressureBasis::Total), None, "Outlet area").unwrap();
        let pts = c.correct_pressure(&[CurvePoint::new(1000.0, 450.7)]);
        assert_eq!(pts[0].y, 450.0);
        let eff = c.correct_efficiency(&pts, &[CurvePoint::new(1000.0, 0.7)]);
        assert_eq!(eff[0].y, 0.7);
    }

    #[test]
    fn static_convention_rejects_bad_area() {
        let req = requirement(PressureBasis::Static);
        assert!(matches!(
            DensityCorrector::new(&req, Some(0.0), "Outlet area"),
            Err(SelectionError::InvalidField { .. })
        ));
        assert!(DensityCorrector::new(&req, None, "Outlet area").is_err());
    }
}
