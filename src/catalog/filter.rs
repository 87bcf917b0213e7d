//! Candidate pre-filtering.
//!
//! Cheap column checks that run before any curve math: catalog classification
//! (type/series/execution), the catalog's own flow/pressure envelope, and the
//! physical drive arrangement.

use crate::catalog::schema::CatalogSchema;
use crate::domain::{CatalogFilter, DriveVariant, FanRecord, Requirement};

fn matches_text(record: &FanRecord, column: &str, filter: &CatalogFilter) -> bool {
    match filter {
        CatalogFilter::All => true,
        CatalogFilter::Only(value) => record.text(column).is_some_and(|v| v.trim() == value),
    }
}

fn matches_execution(record: &FanRecord, filter: &CatalogFilter) -> bool {
    match filter {
        CatalogFilter::All => true,
        CatalogFilter::Only(column) => record.flag(column),
    }
}

fn within_envelope(record: &FanRecord, schema: &CatalogSchema, req: &Requirement) -> bool {
    if let Some(max) = record.number(&schema.max_flow) {
        if req.flow_rate > max {
            return false;
        }
    }
    if let Some(min) = record.number(&schema.min_flow) {
        if req.flow_rate < min {
            return false;
        }
    }
    if let Some(max) = record.number(&schema.max_pressure) {
        if req.pressure > max {
            return false;
        }
    }
    true
}

fn matches_drive(record: &FanRecord, schema: &CatalogSchema, drive: DriveVariant) -> bool {
    let belt_driven = record.flag(&schema.belt_driven);
    match drive {
        DriveVariant::FixedSpeed | DriveVariant::VariableFrequency => !belt_driven,
        DriveVariant::BeltRatio => belt_driven,
    }
}

/// Does `record` survive every pre-filter for this request?
pub fn accepts(record: &FanRecord, schema: &CatalogSchema, req: &Requirement) -> bool {
    matches_text(record, &schema.fan_type, &req.fan_type)
        && matches_text(record, &schema.series, &req.series)
        && matches_execution(record, &req.execution)
        && within_envelope(record, schema, req)
        && matches_drive(record, schema, req.drive_variant())
}

/// Indices of the records that survive pre-filtering, in catalog order.
pub fn prefilter(records: &[FanRecord], schema: &CatalogSchema, req: &Requirement) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| accepts(r, schema, req))
        .map(|(i, _)| i)
        .collect()
}
