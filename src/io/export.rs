//! Export selection results.
//!
//! - JSON: the full result set, curves included, for downstream rendering.
//! - CSV: one summary line per accepted fan, easy to open in a spreadsheet.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Requirement, SelectionResult};
use crate::error::AppError;

/// Top-level JSON export document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub requirement: Requirement,
    pub results: Vec<SelectionResult>,
}

impl ResultsFile {
    pub fn new(requirement: &Requirement, results: &[SelectionResult]) -> Self {
        Self {
            tool: format!("fansel {}", env!("CARGO_PKG_VERSION")),
            generated_at: Utc::now(),
            requirement: requirement.clone(),
            results: results.to_vec(),
        }
    }
}

/// Write the full result set to a JSON file.
pub fn write_results_json(path: &Path, requirement: &Requirement, results: &[SelectionResult]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, &ResultsFile::new(requirement, results))
        .map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))
}

/// Read a JSON export back.
pub fn read_results_json(path: &Path) -> Result<ResultsFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open results JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid results JSON: {e}")))
}

const CSV_HEADER: [&str; 10] = [
    "id",
    "model",
    "series",
    "drive",
    "speed_rpm",
    "flow_m3h",
    "pressure_pa",
    "efficiency_pct",
    "shaft_power_kw",
    "motor_kw",
];

/// Write one summary row per result.
pub fn write_results_csv(path: &Path, results: &[SelectionResult]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results_csv_to(file, results)
}

pub fn write_results_csv_to<W: std::io::Write>(writer: W, results: &[SelectionResult]) -> Result<(), AppError> {
    let row_err = |e: csv::Error| AppError::new(2, format!("Failed to write export CSV row: {e}"));

    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CSV_HEADER).map_err(row_err)?;
    for r in results {
        let op = &r.operating_point;
        w.write_record([
            r.fan.id.clone(),
            r.fan.model.clone(),
            r.fan.series.clone().unwrap_or_default(),
            r.drive.display_name().to_string(),
            format!("{:.0}", r.speed),
            format!("{:.0}", op.x),
            format!("{:.0}", op.y),
            format!("{:.1}", op.efficiency * 100.0),
            format!("{:.2}", op.power),
            format!("{}", r.power),
        ])
        .map_err(row_err)?;
    }
    w.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CatalogFilter, CurvePoint, DriveType, DriveVariant, FanIdentity, OperatingPoint, PressureBasis};

    fn result() -> SelectionResult {
        SelectionResult {
            fan: FanIdentity {
                id: "F-1".into(),
                model: "VR-80, rev. 2".into(),
                series: Some("VR".into()),
                fan_type: None,
            },
            drive: DriveVariant::FixedSpeed,
            base_curve: vec![CurvePoint::new(0.0, 600.0)],
            dense_curve: vec![],
            efficiency_curve: vec![],
            operating_point: OperatingPoint {
                x: 1000.0,
                y: 440.0,
                efficiency: 0.712,
                power: 0.2,
            },
            requested_point: CurvePoint::new(1000.0, 440.0),
            speed: 1450.0,
            power: 0.25,
            chart: None,
        }
    }

    #[test]
    fn csv_quotes_model_names_with_commas() {
        let mut buf = Vec::new();
        write_results_csv_to(&mut buf, &[result()]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,model,series,drive,speed_rpm,flow_m3h,pressure_pa,efficiency_pct,shaft_power_kw,motor_kw"
        );
        assert_eq!(
            lines.next().unwrap(),
            "F-1,\"VR-80, rev. 2\",VR,fixed speed,1450,1000,440,71.2,0.20,0.25"
        );
    }

    #[test]
    fn json_document_round_trips() {
        let req = Requirement {
            flow_rate: 1000.0,
            pressure: 440.0,
            temperature: 20.0,
            height: 0.0,
            pressure_basis: PressureBasis::Total,
            fluctuation_up: 10.0,
            fluctuation_down: 10.0,
            power_reserve: 0.0,
            drive_type: DriveType::Direct,
            belt: false,
            fan_type: CatalogFilter::All,
            series: CatalogFilter::All,
            execution: CatalogFilter::All,
        };
        let doc = ResultsFile::new(&req, &[result()]);
        let text = serde_json::to_string(&doc).unwrap();
        let back: ResultsFile = serde_json::from_str(&text).unwrap();
        assert_eq!(back.requirement, req);
        assert_eq!(back.results[0].fan.model, "VR-80, rev. 2");
        assert!(back.tool.starts_with("fansel"));
    }
}
