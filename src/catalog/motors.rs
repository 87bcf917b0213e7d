//! Motor catalog and motor sizing.

use std::fs::File;
use std::path::Path;

use crate::error::{AppError, SelectionError};

/// Standard IEC motor ratings (kW), ascending.
pub const STANDARD_RATINGS_KW: [f64; 32] = [
    0.06, 0.09, 0.12, 0.18, 0.25, 0.37, 0.55, 0.75, 1.1, 1.5, 2.2, 3.0, 4.0, 5.5, 7.5, 11.0, 15.0, 18.5, 22.0,
    30.0, 37.0, 45.0, 55.0, 75.0, 90.0, 110.0, 132.0, 160.0, 200.0, 250.0, 315.0, 400.0,
];

/// Ascending list of available motor ratings.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorCatalog {
    ratings_kw: Vec<f64>,
}

impl Default for MotorCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl MotorCatalog {
    pub fn standard() -> Self {
        Self {
            ratings_kw: STANDARD_RATINGS_KW.to_vec(),
        }
    }

    /// Build from arbitrary ratings; they are sorted and deduplicated.
    pub fn from_ratings(mut ratings_kw: Vec<f64>) -> Result<Self, AppError> {
        if ratings_kw.is_empty() {
            return Err(AppError::new(2, "Motor catalog is empty."));
        }
        if ratings_kw.iter().any(|r| !(r.is_finite() && *r > 0.0)) {
            return Err(AppError::new(2, "Motor ratings must be finite and > 0."));
        }
        ratings_kw.sort_by(f64::total_cmp);
        ratings_kw.dedup();
        Ok(Self { ratings_kw })
    }

    /// Read ratings from a CSV file with a `power_kw` column.
    pub fn from_csv(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open motor list '{}': {e}", path.display())))?;
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| AppError::new(2, format!("Failed to read motor list headers: {e}")))?
            .clone();
        let col = headers
            .iter()
            .position(|h| h.trim_start_matches('\u{feff}') == "power_kw")
            .ok_or_else(|| AppError::new(2, "Motor list is missing the `power_kw` column."))?;

        let mut ratings = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let row = row.map_err(|e| AppError::new(2, format!("Motor list line {}: {e}", idx + 2)))?;
            let cell = row.get(col).unwrap_or("");
            let value = cell
                .parse::<f64>()
                .map_err(|_| AppError::new(2, format!("Motor list line {}: '{cell}' is not a number", idx + 2)))?;
            ratings.push(value);
        }
        Self::from_ratings(ratings)
    }

    pub fn ratings(&self) -> &[f64] {
        &self.ratings_kw
    }

    /// Smallest rating strictly greater than `required_kw`.
    pub fn select(&self, required_kw: f64) -> Result<f64, SelectionError> {
        self.ratings_kw
            .iter()
            .copied()
            .find(|&r| r > required_kw)
            .ok_or(SelectionError::NoMotorFits { power_kw: required_kw })
    }
}
