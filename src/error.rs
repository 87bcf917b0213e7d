//! Error types.
//!
//! Two layers:
//!
//! - [`SelectionError`]: why a single catalog record (or a whole request) did not
//!   produce a selection. Per-record variants are recovered locally by excluding
//!   the record; only [`SelectionError::MalformedRequirement`] escalates.
//! - [`AppError`]: process-level failure carrying the exit code of the `fansel`
//!   binary.

use thiserror::Error;

/// Outcome taxonomy for one record passing through the selection pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectionError {
    #[error("no {curve} curve data in record")]
    DataAbsent { curve: &'static str },

    #[error("degenerate {curve} fit: {reason}")]
    DegenerateFit { curve: &'static str, reason: String },

    #[error("fan curve does not cross the system curve")]
    NoIntersection,

    #[error("no admissible {drive} speed (base speed {base_speed} rpm)")]
    NoAdmissibleSpeed { drive: &'static str, base_speed: f64 },

    #[error("required power {power_kw} kW exceeds the motor catalog")]
    NoMotorFits { power_kw: f64 },

    #[error("operating pressure {pressure} Pa outside [{min}, {max}] Pa")]
    OutOfTolerance { pressure: f64, min: f64, max: f64 },

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("malformed requirement field '{field}': {reason}")]
    MalformedRequirement { field: String, reason: String },
}

impl SelectionError {
    pub fn degenerate(curve: &'static str, reason: impl Into<String>) -> Self {
        SelectionError::DegenerateFit {
            curve,
            reason: reason.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SelectionError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SelectionError::MalformedRequirement {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-friendly label used in diagnostics output.
    pub fn kind(&self) -> &'static str {
        match self {
            SelectionError::DataAbsent { .. } => "data-absent",
            SelectionError::DegenerateFit { .. } => "degenerate-fit",
            SelectionError::NoIntersection => "no-intersection",
            SelectionError::NoAdmissibleSpeed { .. } => "no-admissible-speed",
            SelectionError::NoMotorFits { .. } => "no-motor-fits",
            SelectionError::OutOfTolerance { .. } => "out-of-tolerance",
            SelectionError::InvalidField { .. } => "invalid-field",
            SelectionError::MalformedRequirement { .. } => "malformed-requirement",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

impl From<SelectionError> for AppError {
    fn from(e: SelectionError) -> Self {
        match e {
            SelectionError::MalformedRequirement { .. } => AppError::new(2, e.to_string()),
            other => AppError::new(4, other.to_string()),
        }
    }
}
