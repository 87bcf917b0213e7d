//! Requirement JSON files.

use std::fs::File;
use std::path::Path;

use serde_json::Value;

use crate::domain::Requirement;
use crate::error::AppError;

/// Read and validate a requirement payload.
pub fn read_requirement_json(path: &Path) -> Result<Requirement, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open request JSON '{}': {e}", path.display())))?;
    let value: Value =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid request JSON: {e}")))?;
    Ok(Requirement::from_json(&value)?)
}
