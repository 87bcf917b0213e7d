//! Catalog ingest (CSV or JSON) and schema validation.
//!
//! Spreadsheet exports are the usual source, so ingest is lenient at the cell
//! level and strict at the schema level:
//! - **Strict schema**: required columns are checked once, before any row is used
//! - **Row-level validation**: unparseable rows are skipped and reported
//! - **No selection logic here**: records come out exactly as tabulated

use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::catalog::schema::CatalogSchema;
use crate::domain::{FanRecord, FieldValue};
use crate::domain::types::parse_number;
use crate::error::AppError;

/// A row-level problem encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: records in file order plus anything that was skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<FanRecord>,
    pub columns: BTreeSet<String>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load fan records from a `.csv` or `.json` file and validate them against `schema`.
pub fn load_fan_records(path: &Path, schema: &CatalogSchema) -> Result<LoadedRecords, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open catalog '{}': {e}", path.display())))?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let loaded = match ext.as_str() {
        "csv" => read_csv_records(file, schema)?,
        "json" => read_json_records(file, schema)?,
        other => {
            return Err(AppError::new(
                2,
                format!("Unsupported catalog format '.{other}' (expected .csv or .json)."),
            ));
        }
    };

    for err in &loaded.row_errors {
        warn!(line = err.line, "skipped catalog row: {}", err.message);
    }
    info!(
        path = %path.display(),
        rows = loaded.rows_read,
        fans = loaded.records.len(),
        "catalog loaded"
    );
    Ok(loaded)
}

/// Parse CSV catalog content.
pub fn read_csv_records<R: Read>(reader: R, schema: &CatalogSchema) -> Result<LoadedRecords, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read catalog headers: {e}")))?
        .iter()
        .map(normalize_header_name)
        .collect();

    let columns: BTreeSet<String> = headers.iter().cloned().collect();
    schema.validate_columns(&columns)?;

    let mut out = LoadedRecords {
        columns,
        ..LoadedRecords::default()
    };

    for (idx, result) in reader.records().enumerate() {
        // +2: header line, 1-based numbering.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                out.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        let mut fan = FanRecord::new();
        for (name, cell) in headers.iter().zip(record.iter()) {
            if let Some(value) = parse_cell(cell, is_text_column(schema, name)) {
                fan.insert(name.clone(), value);
            }
        }

        match check_identity(&fan, schema) {
            Ok(()) => out.records.push(fan),
            Err(message) => out.row_errors.push(RowError { line, message }),
        }
    }

    Ok(out)
}

/// Parse a JSON catalog: an array of flat objects.
pub fn read_json_records<R: Read>(reader: R, schema: &CatalogSchema) -> Result<LoadedRecords, AppError> {
    let root: Value =
        serde_json::from_reader(reader).map_err(|e| AppError::new(2, format!("Invalid catalog JSON: {e}")))?;
    let rows = root
        .as_array()
        .ok_or_else(|| AppError::new(2, "Catalog JSON must be an array of objects."))?;

    let mut out = LoadedRecords::default();
    let mut records = Vec::with_capacity(rows.len());

    for (idx, row) in rows.iter().enumerate() {
        let line = idx + 1;
        out.rows_read += 1;

        let Some(obj) = row.as_object() else {
            out.row_errors.push(RowError {
                line,
                message: "entry is not an object".to_string(),
            });
            continue;
        };

        let mut fan = FanRecord::new();
        for (name, value) in obj {
            let name = normalize_header_name(name);
            out.columns.insert(name.clone());
            let text_column = is_text_column(schema, &name);
            let cell = match value {
                Value::Null => None,
                Value::Bool(b) => Some(FieldValue::Bool(*b)),
                Value::Number(n) if text_column => Some(FieldValue::Text(n.to_string())),
                Value::Number(n) => n.as_f64().map(FieldValue::Number),
                Value::String(s) => parse_cell(s, text_column),
                nested => Some(FieldValue::Text(nested.to_string())),
            };
            if let Some(cell) = cell {
                fan.insert(name, cell);
            }
        }

        match check_identity(&fan, schema) {
            Ok(()) => records.push(fan),
            Err(message) => out.row_errors.push(RowError { line, message }),
        }
    }

    schema.validate_columns(&out.columns)?;
    out.records = records;
    Ok(out)
}

fn normalize_header_name(name: &str) -> String {
    // Excel likes to prefix the first header with a UTF-8 BOM.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Identifier columns keep their cell text verbatim (`"1.10"` stays `"1.10"`).
fn is_text_column(schema: &CatalogSchema, name: &str) -> bool {
    [&schema.id, &schema.model, &schema.series, &schema.fan_type]
        .iter()
        .any(|c| c.as_str() == name)
}

fn parse_cell(cell: &str, text_column: bool) -> Option<FieldValue> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if text_column {
        return Some(FieldValue::Text(cell.to_string()));
    }
    if let Some(v) = parse_number(cell) {
        return Some(FieldValue::Number(v));
    }
    match cell.to_ascii_lowercase().as_str() {
        "true" => Some(FieldValue::Bool(true)),
        "false" => Some(FieldValue::Bool(false)),
        _ => Some(FieldValue::Text(cell.to_string())),
    }
}

fn check_identity(fan: &FanRecord, schema: &CatalogSchema) -> Result<(), String> {
    if fan.contains(&schema.id) || fan.contains(&schema.model) {
        Ok(())
    } else {
        Err(format!("row has neither `{}` nor `{}`", schema.id, schema.model))
    }
}
