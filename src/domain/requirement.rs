//! The selection request.
//!
//! A [`Requirement`] is either built directly (CLI flags, tests) or parsed from a
//! JSON payload. Payloads coming from web forms tend to carry numbers as strings,
//! so numeric fields accept both.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::types::parse_number;
use crate::domain::{CatalogFilter, CurvePoint, DriveType, DriveVariant, PressureBasis};
use crate::error::SelectionError;

/// Requested duty, ambient conditions, tolerances and catalog filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    /// Requested flow (m³/h).
    pub flow_rate: f64,
    /// Requested pressure (Pa).
    pub pressure: f64,
    /// Ambient temperature (°C).
    pub temperature: f64,
    /// Site altitude (m).
    pub height: f64,
    pub pressure_basis: PressureBasis,
    /// Allowed overshoot of the requested pressure (%).
    pub fluctuation_up: f64,
    /// Allowed undershoot of the requested pressure (%).
    pub fluctuation_down: f64,
    /// Motor power reserve (%).
    pub power_reserve: f64,
    pub drive_type: DriveType,
    /// Belt transmission ("scheme 5") requested.
    pub belt: bool,
    pub fan_type: CatalogFilter,
    pub series: CatalogFilter,
    /// Name of a catalog flag column that must be set, or `All`.
    pub execution: CatalogFilter,
}

impl Requirement {
    /// Parse a JSON object payload and validate it.
    pub fn from_json(value: &Value) -> Result<Self, SelectionError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SelectionError::malformed("<root>", "expected a JSON object"))?;

        let requirement = Requirement {
            flow_rate: number_field(obj, &["flow_rate", "flowRate"])?,
            pressure: number_field(obj, &["pressure"])?,
            temperature: number_field(obj, &["temperature"])?,
            height: number_field(obj, &["height", "altitude"])?,
            pressure_basis: basis_field(obj, &["calc_type", "calcType", "pressure_basis"])?,
            fluctuation_up: number_field(obj, &["fluctuation_up", "fluctuationPercentUp"])?,
            fluctuation_down: number_field(obj, &["fluctuation_down", "fluctuationPercentDown"])?,
            power_reserve: number_field(obj, &["power_reserve", "powerReserve"])?,
            drive_type: drive_field(obj, &["drive_type", "startType"])?,
            belt: flag_field(obj, &["belt", "five"])?,
            fan_type: filter_field(obj, &["type", "fan_type"])?,
            series: filter_field(obj, &["series"])?,
            execution: filter_field(obj, &["execution"])?,
        };
        requirement.validate()
    }

    /// Check numeric ranges and option combinations.
    pub fn validate(self) -> Result<Self, SelectionError> {
        let finite = [
            ("flow_rate", self.flow_rate),
            ("pressure", self.pressure),
            ("temperature", self.temperature),
            ("height", self.height),
            ("fluctuation_up", self.fluctuation_up),
            ("fluctuation_down", self.fluctuation_down),
            ("power_reserve", self.power_reserve),
        ];
        for (field, v) in finite {
            if !v.is_finite() {
                return Err(SelectionError::malformed(field, "must be a finite number"));
            }
        }
        if self.flow_rate <= 0.0 {
            return Err(SelectionError::malformed("flow_rate", "must be > 0"));
        }
        if self.pressure <= 0.0 {
            return Err(SelectionError::malformed("pressure", "must be > 0"));
        }
        if self.temperature <= -273.15 {
            return Err(SelectionError::malformed("temperature", "below absolute zero"));
        }
        if self.height >= 10_000.0 {
            return Err(SelectionError::malformed("height", "must be < 10000 m"));
        }
        if self.fluctuation_up < 0.0 {
            return Err(SelectionError::malformed("fluctuation_up", "must be >= 0"));
        }
        if !(0.0..100.0).contains(&self.fluctuation_down) {
            return Err(SelectionError::malformed("fluctuation_down", "must be in [0, 100)"));
        }
        if self.power_reserve < 0.0 {
            return Err(SelectionError::malformed("power_reserve", "must be >= 0"));
        }
        if self.belt && self.drive_type == DriveType::Vfd {
            return Err(SelectionError::malformed(
                "belt",
                "belt drive and frequency converter are mutually exclusive",
            ));
        }
        Ok(self)
    }

    pub fn drive_variant(&self) -> DriveVariant {
        match (self.belt, self.drive_type) {
            (true, _) => DriveVariant::BeltRatio,
            (false, DriveType::Direct) => DriveVariant::FixedSpeed,
            (false, DriveType::Vfd) => DriveVariant::VariableFrequency,
        }
    }

    pub fn requested_point(&self) -> CurvePoint {
        CurvePoint::new(self.flow_rate, self.pressure)
    }

    /// Accepted operating pressure band `(min, max)` in Pa.
    pub fn pressure_band(&self) -> (f64, f64) {
        (
            self.pressure * (1.0 - self.fluctuation_down / 100.0),
            self.pressure * (1.0 + self.fluctuation_up / 100.0),
        )
    }
}

fn lookup<'a>(obj: &'a Map<String, Value>, keys: &[&'static str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn number_field(obj: &Map<String, Value>, keys: &[&'static str]) -> Result<f64, SelectionError> {
    let field = keys[0];
    match lookup(obj, keys) {
        None => Err(SelectionError::malformed(field, "missing")),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| SelectionError::malformed(field, "not representable as f64")),
        Some(Value::String(s)) => {
            parse_number(s).ok_or_else(|| SelectionError::malformed(field, format!("'{s}' is not a number")))
        }
        Some(other) => Err(SelectionError::malformed(field, format!("expected a number, got {other}"))),
    }
}

fn text_field<'a>(obj: &'a Map<String, Value>, keys: &[&'static str]) -> Result<&'a str, SelectionError> {
    let field = keys[0];
    match lookup(obj, keys) {
        None => Err(SelectionError::malformed(field, "missing")),
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(other) => Err(SelectionError::malformed(field, format!("expected a string, got {other}"))),
    }
}

fn flag_field(obj: &Map<String, Value>, keys: &[&'static str]) -> Result<bool, SelectionError> {
    let field = keys[0];
    match lookup(obj, keys) {
        None => Err(SelectionError::malformed(field, "missing")),
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => Ok(n.as_f64().is_some_and(|v| v != 0.0)),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(SelectionError::malformed(field, format!("'{s}' is not a boolean"))),
        },
        Some(other) => Err(SelectionError::malformed(field, format!("expected a boolean, got {other}"))),
    }
}

fn basis_field(obj: &Map<String, Value>, keys: &[&'static str]) -> Result<PressureBasis, SelectionError> {
    let raw = text_field(obj, keys)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "static" => Ok(PressureBasis::Static),
        "total" => Ok(PressureBasis::Total),
        _ => Err(SelectionError::malformed(keys[0], format!("'{raw}' is neither 'static' nor 'total'"))),
    }
}

fn drive_field(obj: &Map<String, Value>, keys: &[&'static str]) -> Result<DriveType, SelectionError> {
    let raw = text_field(obj, keys)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "direct" | "fixed" | "fixed-speed" => Ok(DriveType::Direct),
        "vfd" | "frequency" | "variable-frequency" => Ok(DriveType::Vfd),
        _ => Err(SelectionError::malformed(keys[0], format!("unknown drive type '{raw}'"))),
    }
}

fn filter_field(obj: &Map<String, Value>, keys: &[&'static str]) -> Result<CatalogFilter, SelectionError> {
    text_field(obj, keys).map(CatalogFilter::parse)
}
