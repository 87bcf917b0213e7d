//! Indexed-column curve extraction.
//!
//! Catalog curves are stored as `Flow 1, Pressure 1, Flow 2, Pressure 2, ...`.
//! Walking stops at the first missing flow column or at a zero flow (the
//! catalog's "no more data" marker). Nothing here fails: an empty curve is a
//! valid result and is rejected later as `DataAbsent`.

use crate::catalog::schema::{CatalogSchema, CurveColumns, ZeroFlowPolicy};
use crate::domain::{CurvePoint, FanRecord};

/// Upper bound on the column index walked, so a malformed record cannot spin.
const MAX_POINTS: usize = 256;

/// Reads one curve from a record according to a column pair and zero-flow policy.
#[derive(Debug, Clone, Copy)]
pub struct CurveExtractor<'a> {
    columns: &'a CurveColumns,
    zero_flow: ZeroFlowPolicy,
}

impl<'a> CurveExtractor<'a> {
    pub fn new(columns: &'a CurveColumns, zero_flow: ZeroFlowPolicy) -> Self {
        Self { columns, zero_flow }
    }

    pub fn extract(&self, record: &FanRecord) -> Vec<CurvePoint> {
        let mut points = Vec::new();
        for i in 1..=MAX_POINTS {
            let Some(raw_x) = record.get(&self.columns.x.name(i)) else {
                break;
            };
            let x = raw_x.as_number().unwrap_or(0.0);
            let leading_shutoff = i == 1 && self.zero_flow == ZeroFlowPolicy::LeadingShutoff;
            if x == 0.0 && !leading_shutoff {
                break;
            }
            let y = record.number(&self.columns.y.name(i)).unwrap_or(0.0);
            points.push(CurvePoint::new(x, y));
        }
        points
    }
}

/// Pressure curve (Pa) as tabulated.
pub fn extract_pressure(record: &FanRecord, schema: &CatalogSchema) -> Vec<CurvePoint> {
    CurveExtractor::new(&schema.pressure_curve, schema.zero_flow).extract(record)
}

/// Efficiency curve, converted to a fraction.
pub fn extract_efficiency(record: &FanRecord, schema: &CatalogSchema) -> Vec<CurvePoint> {
    let mut points = CurveExtractor::new(&schema.efficiency_curve, schema.zero_flow).extract(record);
    let values: Vec<f64> = points.iter().map(|p| p.y).collect();
    let factor = schema.efficiency_unit.to_fraction_factor(&values);
    for p in &mut points {
        p.y *= factor;
    }
    points
}
