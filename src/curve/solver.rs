//! Operating point: where the fan curve meets the system curve `p = k·q²`.
//!
//! The dense fan curve is assumed to fall with flow while the system curve rises,
//! so the residual `r(i) = y_i − k·x_i²` changes sign exactly once. We check the
//! bracket at both ends, then bisect on sample indices until the bracket is one
//! sample wide. With the default 1024 samples that is 10 halvings, which keeps the
//! search tied to the sampling resolution.

use crate::domain::{CurvePoint, OperatingPoint};
use crate::error::SelectionError;
use crate::math::interpolate_clamped;

/// Unfloored intersection on the dense curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    /// Index of the chosen dense sample.
    pub index: usize,
    /// The dense sample itself.
    pub point: CurvePoint,
    /// System coefficient `k` used for the search.
    pub k: f64,
    /// Efficiency (fraction) at `point.x`.
    pub efficiency: f64,
}

impl Crossing {
    /// Operating point with flow and pressure floored; pressure is read off the
    /// system curve at the crossing flow.
    pub fn operating_point(&self) -> OperatingPoint {
        let x = self.point.x;
        OperatingPoint {
            x: x.floor(),
            y: (self.k * x * x).floor(),
            efficiency: self.efficiency,
            power: 0.0,
        }
    }
}

/// Find the crossing of `curve` with the system curve through `requested`.
///
/// `efficiency` is the dense efficiency curve, looked up by flow (clamped at its ends).
pub fn find_crossing(
    curve: &[CurvePoint],
    efficiency: &[CurvePoint],
    requested: CurvePoint,
) -> Result<Crossing, SelectionError> {
    let k = requested.y / (requested.x * requested.x);
    if !k.is_finite() || curve.is_empty() {
        return Err(SelectionError::NoIntersection);
    }
    let residual = |i: usize| {
        let p = curve[i];
        p.y - k * p.x * p.x
    };

    let (mut lo, mut hi) = (0, curve.len() - 1);
    if residual(lo) < 0.0 || residual(hi) > 0.0 {
        return Err(SelectionError::NoIntersection);
    }

    // Invariant: r(lo) >= 0 >= r(hi).
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        if residual(mid) >= 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let index = if residual(lo).abs() <= residual(hi).abs() { lo } else { hi };
    let point = curve[index];

    let efficiency = interpolate_clamped(efficiency, point.x).ok_or(SelectionError::DataAbsent { curve: "efficiency" })?;

    Ok(Crossing {
        index,
        point,
        k,
        efficiency,
    })
}
