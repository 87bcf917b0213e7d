//! Curve pipeline stages: extraction from a record, density correction,
//! operating-point search and affinity rescaling.

pub mod affinity;
pub mod density;
pub mod extract;
pub mod solver;

pub use affinity::{rescale_efficiency, rescale_operating_point, rescale_pressure, speed_ratio};
pub use density::{DensityCorrector, air_density, dynamic_pressure};
pub use extract::{CurveExtractor, extract_efficiency, extract_pressure};
pub use solver::{Crossing, find_crossing};
