//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built fresh per selection request from the read-only catalog
//! - exported to JSON/CSV
//! - handed to chart renderers without further conversion

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::chart::Chart;

/// A single `(flow, value)` sample. `y` is pressure (Pa) or efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A raw catalog cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Bool(bool),
    Text(String),
}

impl FieldValue {
    /// Numeric view of the cell. Text is parsed leniently (`"1,5"` reads as 1.5);
    /// non-finite numbers read as absent.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v).filter(|v| v.is_finite()),
            FieldValue::Bool(_) => None,
            FieldValue::Text(s) => parse_number(s),
        }
    }

    /// Boolean view: `true`, non-zero numbers, and `"1"`/`"true"`/`"yes"` are set.
    pub fn as_flag(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Number(v) => *v != 0.0,
            FieldValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "y"
            ),
        }
    }

    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Number(v) => format!("{v}"),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Text(s) => s.clone(),
        }
    }
}

pub(crate) fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>()
        .ok()
        .or_else(|| s.replace(',', ".").parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// One catalog entry: a mapping from column name to cell.
///
/// Records are never mutated by the selection pipeline; derived curves live in
/// [`SelectionResult`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FanRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl FanRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and synthetic catalogs.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn with_number(self, name: impl Into<String>, value: f64) -> Self {
        self.with(name, FieldValue::Number(value))
    }

    pub fn with_text(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.with(name, FieldValue::Text(value.into()))
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FieldValue::as_number)
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(FieldValue::as_text)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(FieldValue::as_flag)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Which pressure the requested duty refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PressureBasis {
    /// Static pressure: dynamic pressure at the outlet is subtracted from the curve.
    Static,
    /// Total pressure: catalog curves are used as tabulated.
    Total,
}

/// How the motor drives the impeller, as requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriveType {
    /// Direct drive on a mains-fed motor (synchronous speed steps).
    Direct,
    /// Motor fed from a frequency converter (continuous speed).
    Vfd,
}

/// Concrete drive configuration a request is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriveVariant {
    FixedSpeed,
    VariableFrequency,
    BeltRatio,
}

impl DriveVariant {
    pub fn display_name(self) -> &'static str {
        match self {
            DriveVariant::FixedSpeed => "fixed speed",
            DriveVariant::VariableFrequency => "variable frequency",
            DriveVariant::BeltRatio => "belt ratio",
        }
    }
}

/// A catalog filter. Only the explicit `All` sentinel disables filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogFilter {
    All,
    Only(String),
}

impl CatalogFilter {
    pub const ALL_SENTINEL: &'static str = "All";

    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case(Self::ALL_SENTINEL) {
            CatalogFilter::All
        } else {
            CatalogFilter::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CatalogFilter::All)
    }
}

impl std::fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogFilter::All => write!(f, "{}", Self::ALL_SENTINEL),
            CatalogFilter::Only(v) => write!(f, "{v}"),
        }
    }
}

/// The resolved duty point on a (possibly rescaled) fan curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperatingPoint {
    /// Flow (m³/h), floored.
    pub x: f64,
    /// Pressure (Pa), floored.
    pub y: f64,
    /// Efficiency as a fraction (0–1).
    pub efficiency: f64,
    /// Shaft power including reserve (kW). Zero until a drive speed is fixed.
    pub power: f64,
}

/// Identifying fields copied from the source record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FanIdentity {
    pub id: String,
    pub model: String,
    pub series: Option<String>,
    pub fan_type: Option<String>,
}

impl FanIdentity {
    pub fn label(&self) -> String {
        if self.model.is_empty() {
            self.id.clone()
        } else {
            self.model.clone()
        }
    }
}

/// One accepted candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    pub fan: FanIdentity,
    pub drive: DriveVariant,
    /// Extracted (density-corrected, speed-rescaled) pressure points.
    pub base_curve: Vec<CurvePoint>,
    /// Dense fitted pressure curve at the chosen speed.
    pub dense_curve: Vec<CurvePoint>,
    /// Dense fitted efficiency curve (fraction) at the chosen speed.
    pub efficiency_curve: Vec<CurvePoint>,
    pub operating_point: OperatingPoint,
    pub requested_point: CurvePoint,
    /// Chosen rotational speed (rpm).
    pub speed: f64,
    /// Chosen motor rating (kW).
    pub power: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<Chart>,
}

/// A record excluded from the result set, kept for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub fan: FanIdentity,
    pub reason: crate::error::SelectionError,
}
