//! Dense, evenly spaced sampling of a fitted model.
//!
//! The dense curve is what the operating-point search walks and what charts draw.
//! Its resolution is tied to the solver: 1023 steps give 1024 samples, which a
//! bracketing bisection narrows to a single sample in 10 halvings.

use thiserror::Error;

use crate::domain::CurvePoint;

/// Default number of steps (samples = steps + 1).
pub const DEFAULT_STEP_COUNT: usize = 1023;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SampleError {
    #[error("empty sampling domain [{x_min}, {x_max}]")]
    EmptyDomain { x_min: f64, x_max: f64 },

    #[error("step count must be >= 1")]
    NoSteps,
}

/// `step_count + 1` points from `x_min` to `x_max` inclusive, `y = model(x)`.
pub fn sample<F>(model: F, x_min: f64, x_max: f64, step_count: usize) -> Result<Vec<CurvePoint>, SampleError>
where
    F: Fn(f64) -> f64,
{
    if step_count == 0 {
        return Err(SampleError::NoSteps);
    }
    if !(x_min.is_finite() && x_max.is_finite() && x_max > x_min) {
        return Err(SampleError::EmptyDomain { x_min, x_max });
    }

    let step = (x_max - x_min) / step_count as f64;
    let points = (0..=step_count)
        .map(|i| {
            // Pin the last sample so rounding never leaves the domain short.
            let x = if i == step_count { x_max } else { x_min + i as f64 * step };
            CurvePoint::new(x, model(x))
        })
        .collect();
    Ok(points)
}

/// Sample `model` over the x-range spanned by `source`.
pub fn sample_over<F>(model: F, source: &[CurvePoint], step_count: usize) -> Result<Vec<CurvePoint>, SampleError>
where
    F: Fn(f64) -> f64,
{
    let (x_min, x_max) = x_range(source).unwrap_or((f64::NAN, f64::NAN));
    sample(model, x_min, x_max, step_count)
}

/// `(min x, max x)` of a point set.
pub fn x_range(points: &[CurvePoint]) -> Option<(f64, f64)> {
    points.iter().fold(None, |acc, p| match acc {
        None => Some((p.x, p.x)),
        Some((lo, hi)) => Some((lo.min(p.x), hi.max(p.x))),
    })
}
