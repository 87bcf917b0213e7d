//! Column schema for fan catalogs.
//!
//! Catalog spreadsheets name their columns freely, and curve data is spread over
//! indexed columns (`Flow 1`, `Flow 2`, ...). Rather than building lookup keys
//! ad hoc at selection time, every column the engine reads is named here and
//! validated once when the catalog is loaded.

use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// An indexed column name: `prefix + i + suffix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplate {
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl FieldTemplate {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn name(&self, index: usize) -> String {
        format!("{}{index}{}", self.prefix, self.suffix)
    }
}

/// The pair of templates that make up one curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveColumns {
    pub x: FieldTemplate,
    pub y: FieldTemplate,
}

/// How a zero flow value inside an indexed curve is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZeroFlowPolicy {
    /// Any zero flow ends the curve, including the very first column.
    #[default]
    Sentinel,
    /// A zero flow in the first column is a shut-off point; later zeros end the curve.
    LeadingShutoff,
}

/// Unit of the efficiency columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EfficiencyUnit {
    /// Percent when any tabulated value exceeds 1, fraction otherwise.
    Auto,
    #[default]
    Percent,
    Fraction,
}

impl EfficiencyUnit {
    /// Factor that converts tabulated values to a fraction.
    pub fn to_fraction_factor(self, values: &[f64]) -> f64 {
        match self {
            EfficiencyUnit::Percent => 0.01,
            EfficiencyUnit::Fraction => 1.0,
            EfficiencyUnit::Auto => {
                if values.iter().any(|v| *v > 1.0) {
                    0.01
                } else {
                    1.0
                }
            }
        }
    }
}

/// Names of every catalog column the engine reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSchema {
    pub id: String,
    pub model: String,
    pub series: String,
    pub fan_type: String,
    pub min_speed: String,
    pub max_speed: String,
    pub outlet_area: String,
    pub min_flow: String,
    pub max_flow: String,
    pub max_pressure: String,
    pub belt_driven: String,
    pub pressure_curve: CurveColumns,
    pub efficiency_curve: CurveColumns,
    pub zero_flow: ZeroFlowPolicy,
    pub efficiency_unit: EfficiencyUnit,
}

impl Default for CatalogSchema {
    fn default() -> Self {
        Self {
            id: "ID".to_string(),
            model: "Model".to_string(),
            series: "Series".to_string(),
            fan_type: "Type".to_string(),
            min_speed: "Min speed".to_string(),
            max_speed: "Max speed".to_string(),
            outlet_area: "Outlet area".to_string(),
            min_flow: "Min flow".to_string(),
            max_flow: "Max flow".to_string(),
            max_pressure: "Max pressure".to_string(),
            belt_driven: "Belt driven".to_string(),
            pressure_curve: CurveColumns {
                x: FieldTemplate::new("Flow ", ""),
                y: FieldTemplate::new("Pressure ", ""),
            },
            efficiency_curve: CurveColumns {
                x: FieldTemplate::new("EfficiencyFlow ", ""),
                y: FieldTemplate::new("EfficiencyValue ", ""),
            },
            zero_flow: ZeroFlowPolicy::default(),
            efficiency_unit: EfficiencyUnit::default(),
        }
    }
}

impl CatalogSchema {
    /// Read a schema override from JSON. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open schema '{}': {e}", path.display())))?;
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid schema JSON: {e}")))
    }

    /// Columns that must be present for the catalog to be usable at all.
    pub fn required_columns(&self) -> Vec<String> {
        vec![
            self.max_speed.clone(),
            self.pressure_curve.x.name(1),
            self.pressure_curve.y.name(1),
            self.efficiency_curve.x.name(1),
            self.efficiency_curve.y.name(1),
        ]
    }

    /// Fail fast when the catalog's column set does not match this schema.
    pub fn validate_columns(&self, columns: &BTreeSet<String>) -> Result<(), AppError> {
        let mut missing: Vec<String> = self
            .required_columns()
            .into_iter()
            .filter(|c| !columns.contains(c))
            .collect();

        if !columns.contains(&self.id) && !columns.contains(&self.model) {
            missing.push(format!("{} or {}", self.id, self.model));
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::new(
                2,
                format!("Catalog is missing required column(s): {}", missing.join(", ")),
            ))
        }
    }
}
