//! Belt-drive ("scheme 5") speed table.
//!
//! For belt-driven fans the impeller speed is set by the pulley ratio, so the
//! admissible speeds are a per-model list of nominal speeds (one per fan/motor
//! pairing) rather than the motor's synchronous speeds.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AppError;

/// Fan model → ascending nominal speeds (rpm).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeltScheme {
    speeds: HashMap<String, Vec<f64>>,
}

impl BeltScheme {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut speeds: HashMap<String, Vec<f64>> = HashMap::new();
        for (model, speed) in pairs {
            if speed.is_finite() && speed > 0.0 {
                speeds.entry(model.into()).or_default().push(speed);
            }
        }
        for list in speeds.values_mut() {
            list.sort_by(f64::total_cmp);
            list.dedup();
        }
        Self { speeds }
    }

    /// Load from a CSV with `model` and `speed` columns (extra columns are ignored).
    pub fn from_csv_path(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open belt scheme '{}': {e}", path.display())))?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader
            .headers()
            .map_err(|e| AppError::new(2, format!("Failed to read belt scheme headers: {e}")))?
            .clone();

        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}').eq_ignore_ascii_case(name))
                .ok_or_else(|| AppError::new(2, format!("Belt scheme is missing the `{name}` column.")))
        };
        let model_col = find("model")?;
        let speed_col = find("speed")?;

        let mut pairs = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row.map_err(|e| AppError::new(2, format!("Belt scheme line {}: {e}", idx + 2)))?;
            let model = row.get(model_col).unwrap_or("").to_string();
            let cell = row.get(speed_col).unwrap_or("");
            let speed = cell
                .parse::<f64>()
                .map_err(|_| AppError::new(2, format!("Belt scheme line {}: '{cell}' is not a speed", idx + 2)))?;
            if !model.is_empty() {
                pairs.push((model, speed));
            }
        }
        Ok(Self::from_pairs(pairs))
    }

    pub fn speeds_for(&self, model: &str) -> &[f64] {
        self.speeds.get(model).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn model_count(&self) -> usize {
        self.speeds.len()
    }
}
