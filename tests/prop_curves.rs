//! Property tests for the numeric curve stages.

use fan_select::curve::{find_crossing, rescale_efficiency, rescale_pressure};
use fan_select::domain::CurvePoint;
use fan_select::math::{fit_polynomial, sample};
use proptest::prelude::*;

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    /// A cubic through well-spaced samples is reproduced by a cubic fit.
    #[test]
    fn cubic_fit_reproduces_cubic(
        c0 in -500.0f64..500.0,
        c1 in -2.0f64..2.0,
        c2 in -1e-3f64..1e-3,
        c3 in -1e-6f64..1e-6,
        x0 in 0.0f64..1000.0,
        step in 50.0f64..500.0,
        jitter in proptest::collection::vec(-0.2f64..0.2, 6),
    ) {
        let f = |x: f64| c0 + c1 * x + c2 * x * x + c3 * x * x * x;
        let points: Vec<CurvePoint> = jitter
            .iter()
            .enumerate()
            .map(|(i, j)| {
                let x = x0 + (i as f64 + j) * step;
                CurvePoint::new(x, f(x))
            })
            .collect();

        let poly = fit_polynomial(&points, 3).unwrap();
        for p in &points {
            prop_assert!(close(poly.eval(p.x), p.y, 1e-6), "fit({}) = {}, want {}", p.x, poly.eval(p.x), p.y);
        }
    }

    /// Dense sampling covers the domain exactly, in increasing order.
    #[test]
    fn sample_spans_domain(
        x_min in -1000.0f64..1000.0,
        width in 1.0f64..10_000.0,
        steps in 1usize..4096,
    ) {
        let x_max = x_min + width;
        let pts = sample(|x| 2.0 * x, x_min, x_max, steps).unwrap();

        prop_assert_eq!(pts.len(), steps + 1);
        prop_assert_eq!(pts[0].x, x_min);
        prop_assert_eq!(pts[steps].x, x_max);
        prop_assert!(pts.windows(2).all(|w| w[1].x > w[0].x));
        prop_assert!(pts.iter().all(|p| p.y == 2.0 * p.x));
    }

    /// Rescaling to another speed and back restores the curve.
    #[test]
    fn affinity_round_trip(
        k in 0.2f64..5.0,
        ys in proptest::collection::vec(0.0f64..5000.0, 1..12),
    ) {
        let pts: Vec<CurvePoint> = ys
            .iter()
            .enumerate()
            .map(|(i, y)| CurvePoint::new(100.0 * (i as f64 + 1.0), *y))
            .collect();

        let back = rescale_pressure(&rescale_pressure(&pts, k), 1.0 / k);
        for (a, b) in pts.iter().zip(&back) {
            prop_assert!(close(a.x, b.x, 1e-9));
            prop_assert!(close(a.y, b.y, 1e-9));
        }

        let eff = rescale_efficiency(&pts, k);
        for (a, b) in pts.iter().zip(&eff) {
            prop_assert_eq!(a.y, b.y);
            prop_assert!(close(a.x / k, b.x, 1e-12));
        }
    }

    /// On a falling parabola the crossing is within one sample of the analytic one.
    #[test]
    fn crossing_matches_parabola(
        p0 in 100.0f64..5000.0,
        a in 1e-5f64..1e-3,
        k in 1e-5f64..1e-3,
        overshoot in 1.2f64..3.0,
        steps in 64usize..2048,
    ) {
        let exact = (p0 / (a + k)).sqrt();
        let x_max = exact * overshoot;
        let curve = sample(|x| p0 - a * x * x, 0.0, x_max, steps).unwrap();
        let efficiency = [CurvePoint::new(0.0, 0.7), CurvePoint::new(x_max, 0.7)];
        let requested = CurvePoint::new(1000.0, k * 1e6);

        let crossing = find_crossing(&curve, &efficiency, requested).unwrap();
        let spacing = x_max / steps as f64;
        prop_assert!((crossing.point.x - exact).abs() <= spacing + 1e-9);
        prop_assert!((crossing.efficiency - 0.7).abs() < 1e-12);
    }
}
