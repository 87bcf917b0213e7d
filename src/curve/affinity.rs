//! Fan affinity laws.
//!
//! Moving from rated speed `N_max` to speed `N` with `k = N_max / N`:
//! flow scales as `1/k`, pressure as `1/k²`, power as `1/k³`. Efficiency is
//! speed-invariant, so efficiency curves only move along the flow axis.

use crate::domain::{CurvePoint, OperatingPoint};

/// Speed ratio `k = from / to`.
pub fn speed_ratio(from_rpm: f64, to_rpm: f64) -> f64 {
    from_rpm / to_rpm
}

/// Pressure curve at the new speed.
pub fn rescale_pressure(points: &[CurvePoint], k: f64) -> Vec<CurvePoint> {
    points
        .iter()
        .map(|p| CurvePoint::new(p.x / k, p.y / (k * k)))
        .collect()
}

/// Efficiency curve at the new speed.
pub fn rescale_efficiency(points: &[CurvePoint], k: f64) -> Vec<CurvePoint> {
    points.iter().map(|p| CurvePoint::new(p.x / k, p.y)).collect()
}

/// Operating point at the new speed; flow and pressure are floored.
pub fn rescale_operating_point(op: OperatingPoint, k: f64) -> OperatingPoint {
    OperatingPoint {
        x: (op.x / k).floor(),
        y: (op.y / (k * k)).floor(),
        efficiency: op.efficiency,
        power: op.power / (k * k * k),
    }
}
