//! Least-squares polynomial regression.
//!
//! We fit
//!
//! ```text
//! y(x) ≈ Σ c_i u^i,   u = (x - center) / scale
//! ```
//!
//! by solving the normal equations `X c = Y` with
//!
//! ```text
//! X[i][j] = Σ_k u_k^(i+j)      Y[i] = Σ_k y_k u_k^i
//! ```
//!
//! Implementation notes:
//! - `x` is mapped onto `[-1, 1]` before forming the sums. Raw flows reach
//!   thousands of m³/h and `Σ x^6` would otherwise swamp every other entry.
//! - Elimination uses partial pivoting (largest remaining magnitude in the column)
//!   followed by back-substitution.
//! - A pivot below `PIVOT_TOL × max|X|` means the system is singular for practical
//!   purposes; we report it instead of dividing through and emitting NaNs.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CurvePoint;

/// Degree used for every catalog curve.
pub const DEFAULT_DEGREE: usize = 3;

/// Relative pivot threshold for singularity detection.
const PIVOT_TOL: f64 = 1e-12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("need at least {needed} distinct x values, got {distinct}")]
    TooFewPoints { distinct: usize, needed: usize },

    #[error("non-finite input point")]
    NonFinite,

    #[error("singular normal equations (pivot {pivot:e} in column {column})")]
    Singular { column: usize, pivot: f64 },
}

/// A fitted polynomial, evaluable anywhere (meaningful on the fitted domain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    center: f64,
    scale: f64,
    /// Coefficients in the scaled variable, constant term first.
    coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn eval(&self, x: f64) -> f64 {
        let u = (x - self.center) / self.scale;
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc * u + c)
    }
}

/// Fit `points` with a polynomial of the given degree.
pub fn fit_polynomial(points: &[CurvePoint], degree: usize) -> Result<Polynomial, FitError> {
    let m = degree + 1;

    if points.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(FitError::NonFinite);
    }

    let mut xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    xs.sort_by(f64::total_cmp);
    xs.dedup();
    if xs.len() < m {
        return Err(FitError::TooFewPoints {
            distinct: xs.len(),
            needed: m,
        });
    }

    let (lo, hi) = (xs[0], xs[xs.len() - 1]);
    let center = 0.5 * (lo + hi);
    let scale = if hi > lo { 0.5 * (hi - lo) } else { 1.0 };

    let (mut x, mut y) = normal_equations(points, m, center, scale);
    let coefficients = solve_partial_pivot(&mut x, &mut y)?;

    Ok(Polynomial {
        center,
        scale,
        coefficients,
    })
}

fn normal_equations(points: &[CurvePoint], m: usize, center: f64, scale: f64) -> (DMatrix<f64>, DVector<f64>) {
    // Power sums Σ u^p for p = 0..2(m-1), shared by all X entries on an anti-diagonal.
    let mut power_sums = vec![0.0; 2 * m - 1];
    let mut y = DVector::<f64>::zeros(m);

    for p in points {
        let u = (p.x - center) / scale;
        let mut up = 1.0;
        for (k, sum) in power_sums.iter_mut().enumerate() {
            *sum += up;
            if k < m {
                y[k] += p.y * up;
            }
            up *= u;
        }
    }

    let x = DMatrix::from_fn(m, m, |i, j| power_sums[i + j]);
    (x, y)
}

/// Gaussian elimination with partial pivoting, then back-substitution.
fn solve_partial_pivot(x: &mut DMatrix<f64>, y: &mut DVector<f64>) -> Result<Vec<f64>, FitError> {
    let m = y.len();
    let magnitude = x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let tol = PIVOT_TOL * magnitude.max(f64::MIN_POSITIVE);

    for k in 0..m {
        let mut pivot_row = k;
        for i in (k + 1)..m {
            if x[(i, k)].abs() > x[(pivot_row, k)].abs() {
                pivot_row = i;
            }
        }
        let pivot = x[(pivot_row, k)];
        if !(pivot.abs() > tol) {
            return Err(FitError::Singular { column: k, pivot });
        }
        if pivot_row != k {
            x.swap_rows(k, pivot_row);
            y.swap_rows(k, pivot_row);
        }

        for i in (k + 1)..m {
            let c = -x[(i, k)] / x[(k, k)];
            x[(i, k)] = 0.0;
            for j in (k + 1)..m {
                x[(i, j)] += c * x[(k, j)];
            }
            y[i] += c * y[k];
        }
    }

    let mut coefficients = vec![0.0; m];
    for i in (0..m).rev() {
        let mut acc = y[i];
        for j in (i + 1)..m {
            acc -= x[(i, j)] * coefficients[j];
        }
        coefficients[i] = acc / x[(i, i)];
    }

    if coefficients.iter().all(|c| c.is_finite()) {
        Ok(coefficients)
    } else {
        Err(FitError::Singular {
            column: m - 1,
            pivot: f64::NAN,
        })
    }
}
