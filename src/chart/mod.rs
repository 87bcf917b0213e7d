//! Chart rendering for accepted selections.
//!
//! Rendering runs after the math pipeline, once per accepted result. A failing
//! renderer never drops a result: the error is logged and the result keeps
//! `chart = None`.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{CurvePoint, SelectionResult};

pub mod ascii;
pub mod quickchart;

pub use ascii::AsciiChart;
pub use quickchart::QuickChart;

/// A rendered chart attached to a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum Chart {
    /// Terminal plot.
    Text { body: String },
    /// Hosted image.
    Url { url: String },
}

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("chart service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("chart service response has no url")]
    MissingUrl,

    #[error("nothing to draw")]
    Empty,
}

/// Everything a renderer needs to draw one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Tabulated points after correction and rescaling.
    pub base_points: Vec<CurvePoint>,
    /// Dense fitted curve.
    pub dense_curve: Vec<CurvePoint>,
    pub operating_point: CurvePoint,
    pub requested_point: CurvePoint,
}

impl ChartSpec {
    pub fn for_result(result: &SelectionResult) -> Self {
        Self {
            title: format!("{} {}", result.fan.label(), result.speed),
            x_label: "Flow, m³/h".to_string(),
            y_label: "Pressure, Pa".to_string(),
            base_points: result.base_curve.clone(),
            dense_curve: result.dense_curve.clone(),
            operating_point: CurvePoint::new(result.operating_point.x, result.operating_point.y),
            requested_point: result.requested_point,
        }
    }
}

pub trait ChartRenderer {
    fn name(&self) -> &'static str;

    fn render(&self, spec: &ChartSpec) -> Result<Chart, ChartError>;
}

/// Render a chart for every result. Returns how many renders failed.
pub fn attach_charts(results: &mut [SelectionResult], renderer: &dyn ChartRenderer) -> usize {
    let mut failures = 0;
    for result in results.iter_mut() {
        let spec = ChartSpec::for_result(result);
        match renderer.render(&spec) {
            Ok(chart) => {
                debug!(fan = %result.fan.id, renderer = renderer.name(), "chart rendered");
                result.chart = Some(chart);
            }
            Err(err) => {
                warn!(fan = %result.fan.id, renderer = renderer.name(), error = %err, "chart rendering failed; continuing without chart");
                result.chart = None;
                failures += 1;
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DriveVariant, FanIdentity, OperatingPoint};

    struct Failing;

    impl ChartRenderer for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn render(&self, _spec: &ChartSpec) -> Result<Chart, ChartError> {
            Err(ChartError::MissingUrl)
        }
    }

    fn result() -> SelectionResult {
        SelectionResult {
            fan: FanIdentity {
                id: "F-1".into(),
                model: "VR-80".into(),
                series: None,
                fan_type: None,
            },
            drive: DriveVariant::FixedSpeed,
            base_curve: vec![CurvePoint::new(0.0, 600.0), CurvePoint::new(2000.0, 100.0)],
            dense_curve: vec![CurvePoint::new(0.0, 600.0), CurvePoint::new(2000.0, 100.0)],
            efficiency_curve: vec![],
            operating_point: OperatingPoint {
                x: 1000.0,
                y: 440.0,
                efficiency: 0.7,
                power: 0.2,
            },
            requested_point: CurvePoint::new(1000.0, 440.0),
            speed: 1450.0,
            power: 0.25,
            chart: None,
        }
    }

    #[test]
    fn failed_render_keeps_result() {
        let mut results = vec![result()];
        assert_eq!(attach_charts(&mut results, &Failing), 1);
        assert_eq!(results.len(), 1);
        assert!(results[0].chart.is_none());
    }

    #[test]
    fn spec_title_uses_model_and_speed() {
        let spec = ChartSpec::for_result(&result());
        assert_eq!(spec.title, "VR-80 1450");
        assert_eq!(spec.operating_point, CurvePoint::new(1000.0, 440.0));
    }

    #[test]
    fn ascii_chart_attaches_text() {
        let mut results = vec![result()];
        assert_eq!(attach_charts(&mut results, &AsciiChart::new(20, 6)), 0);
        assert!(matches!(results[0].chart, Some(Chart::Text { .. })));
    }
}
