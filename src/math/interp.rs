//! Piecewise-linear lookup on ascending point sequences.

use crate::domain::CurvePoint;

/// Linear interpolation at `x`, clamped to the first/last sample outside the domain.
///
/// `points` must be sorted by ascending `x`. Returns `None` for an empty slice
/// or a non-finite `x`.
pub fn interpolate_clamped(points: &[CurvePoint], x: f64) -> Option<f64> {
    if !x.is_finite() {
        return None;
    }
    let first = points.first()?;
    let last = points.last()?;
    if x <= first.x {
        return Some(first.y);
    }
    if x >= last.x || points.len() < 2 {
        return Some(last.y);
    }

    // First index whose x is >= the query, kept in range for NaN-bearing slices.
    let hi = points.partition_point(|p| p.x < x).clamp(1, points.len() - 1);
    let (a, b) = (points[hi - 1], points[hi]);
    let span = b.x - a.x;
    if span <= 0.0 {
        return Some(b.y);
    }
    Some(a.y + (b.y - a.y) * (x - a.x) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_and_clamps() {
        let pts = [CurvePoint::new(0.0, 10.0), CurvePoint::new(10.0, 20.0), CurvePoint::new(20.0, 0.0)];
        assert_eq!(interpolate_clamped(&pts, 5.0), Some(15.0));
        assert_eq!(interpolate_clamped(&pts, 15.0), Some(10.0));
        assert_eq!(interpolate_clamped(&pts, 10.0), Some(20.0));
        assert_eq!(interpolate_clamped(&pts, -3.0), Some(10.0));
        assert_eq!(interpolate_clamped(&pts, 99.0), Some(0.0));
        assert_eq!(interpolate_clamped(&[], 1.0), None);
        assert_eq!(interpolate_clamped(&pts, f64::NAN), None);
    }

    #[test]
    fn nan_samples_do_not_index_out_of_range() {
        let pts = [CurvePoint::new(f64::NAN, 1.0), CurvePoint::new(10.0, 2.0), CurvePoint::new(20.0, 3.0)];
        assert!(interpolate_clamped(&pts, 5.0).is_some());
        let single = [CurvePoint::new(f64::NAN, 4.0)];
        assert_eq!(interpolate_clamped(&single, 5.0), Some(4.0));
    }
}
