//! QuickChart adapter: posts a Chart.js config and keeps the short URL.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::chart::{Chart, ChartError, ChartRenderer, ChartSpec};
use crate::domain::CurvePoint;

pub const DEFAULT_BASE_URL: &str = "https://quickchart.io";

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    url: Option<String>,
}

pub struct QuickChart {
    client: Client,
    base_url: String,
}

impl QuickChart {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ChartError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chart/create", self.base_url)
    }
}

impl ChartRenderer for QuickChart {
    fn name(&self) -> &'static str {
        "quickchart"
    }

    fn render(&self, spec: &ChartSpec) -> Result<Chart, ChartError> {
        if spec.dense_curve.is_empty() {
            return Err(ChartError::Empty);
        }
        let body = json!({
            "chart": chart_config(spec),
            "width": WIDTH,
            "height": HEIGHT,
            "backgroundColor": "white",
        });

        let resp = self.client.post(self.endpoint()).json(&body).send()?;
        if !resp.status().is_success() {
            return Err(ChartError::Status(resp.status()));
        }
        let parsed: CreateResponse = resp.json()?;
        parsed
            .url
            .map(|url| Chart::Url { url })
            .ok_or(ChartError::MissingUrl)
    }
}

fn points(data: &[CurvePoint]) -> Value {
    Value::Array(data.iter().map(|p| json!({ "x": p.x, "y": p.y })).collect())
}

/// Chart.js line chart: tabulated points, fitted curve, operating and requested points.
pub fn chart_config(spec: &ChartSpec) -> Value {
    json!({
        "type": "line",
        "data": {
            "datasets": [
                {
                    "label": "Catalog points",
                    "data": points(&spec.base_points),
                    "borderColor": "#4BC0C0",
                    "pointRadius": 2,
                    "showLine": true,
                },
                {
                    "label": "Fitted curve",
                    "data": points(&spec.dense_curve),
                    "borderColor": "#FF6384",
                    "pointRadius": 0,
                    "showLine": true,
                },
                {
                    "label": "Operating point",
                    "data": points(&[spec.operating_point]),
                    "borderColor": "#1F6386",
                    "pointRadius": 4,
                    "showLine": false,
                },
                {
                    "label": "Requested point",
                    "data": points(&[spec.requested_point]),
                    "borderColor": "#16753B",
                    "pointRadius": 4,
                    "showLine": false,
                },
            ]
        },
        "options": {
            "scales": {
                "x": { "type": "linear", "title": { "display": true, "text": spec.x_label } },
                "y": { "title": { "display": true, "text": spec.y_label }, "beginAtZero": false },
            },
            "plugins": {
                "title": { "display": true, "text": spec.title },
                "legend": { "display": true, "position": "top" },
            },
        },
    })
}
