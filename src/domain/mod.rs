//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - catalog records and their cells (`FanRecord`, `FieldValue`)
//! - curve samples and operating points (`CurvePoint`, `OperatingPoint`)
//! - the selection request (`Requirement`) and its enums
//! - selection outputs (`SelectionResult`, `Rejection`)

pub mod requirement;
pub mod types;

pub use requirement::*;
pub use types::*;
