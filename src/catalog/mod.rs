//! Read-only catalogs: fans, motors and the belt-drive speed table.
//!
//! A [`Catalog`] is loaded once at startup (load-or-fail) and then shared
//! immutably between requests; nothing in the selection pipeline writes to it.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{FanIdentity, FanRecord};
use crate::error::AppError;

pub mod belt;
pub mod filter;
pub mod load;
pub mod motors;
pub mod schema;

pub use belt::BeltScheme;
pub use motors::MotorCatalog;
pub use schema::{CatalogSchema, CurveColumns, EfficiencyUnit, FieldTemplate, ZeroFlowPolicy};

/// Where the catalog pieces come from.
#[derive(Debug, Clone, Default)]
pub struct CatalogPaths {
    pub fans: PathBuf,
    pub belt_scheme: Option<PathBuf>,
    pub motors: Option<PathBuf>,
    pub schema: Option<PathBuf>,
}

/// Immutable snapshot of all reference data used by the engine.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub schema: CatalogSchema,
    pub fans: Vec<FanRecord>,
    pub motors: MotorCatalog,
    pub belt: BeltScheme,
}

/// Shape of the loaded fan catalog, for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStructure {
    pub count: usize,
    pub headers: Vec<String>,
    pub sample: Option<FanRecord>,
}

impl Catalog {
    pub fn new(schema: CatalogSchema, fans: Vec<FanRecord>, motors: MotorCatalog, belt: BeltScheme) -> Self {
        Self {
            schema,
            fans,
            motors,
            belt,
        }
    }

    /// Catalog with the default schema, standard motors and no belt table.
    pub fn from_fans(fans: Vec<FanRecord>) -> Self {
        Self::new(CatalogSchema::default(), fans, MotorCatalog::standard(), BeltScheme::empty())
    }

    /// Load every configured source, failing on the first problem.
    pub fn load(paths: &CatalogPaths) -> Result<Self, AppError> {
        let schema = match &paths.schema {
            Some(p) => CatalogSchema::from_json_file(p)?,
            None => CatalogSchema::default(),
        };
        let loaded = load::load_fan_records(&paths.fans, &schema)?;
        if loaded.records.is_empty() {
            return Err(AppError::new(
                3,
                format!("Catalog '{}' contains no usable fans.", paths.fans.display()),
            ));
        }
        let motors = match &paths.motors {
            Some(p) => MotorCatalog::from_csv(p)?,
            None => MotorCatalog::standard(),
        };
        let belt = match &paths.belt_scheme {
            Some(p) => BeltScheme::from_csv_path(p)?,
            None => BeltScheme::empty(),
        };
        Ok(Self::new(schema, loaded.records, motors, belt))
    }

    pub fn len(&self) -> usize {
        self.fans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fans.is_empty()
    }

    /// Identifying fields of the record at `index`.
    pub fn identity(&self, index: usize) -> FanIdentity {
        let record = &self.fans[index];
        let model = record.text(&self.schema.model).unwrap_or_default();
        let id = record
            .text(&self.schema.id)
            .or_else(|| (!model.is_empty()).then(|| model.clone()))
            .unwrap_or_else(|| format!("#{}", index + 1));
        FanIdentity {
            id,
            model,
            series: record.text(&self.schema.series),
            fan_type: record.text(&self.schema.fan_type),
        }
    }

    pub fn structure(&self) -> CatalogStructure {
        let mut headers: Vec<String> = self
            .fans
            .iter()
            .flat_map(|f| f.keys().map(str::to_string))
            .collect();
        headers.sort();
        headers.dedup();
        CatalogStructure {
            count: self.fans.len(),
            headers,
            sample: self.fans.first().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_falls_back_to_model_then_position() {
        let catalog = Catalog::from_fans(vec![
            FanRecord::new().with_text("ID", "F-1").with_text("Model", "VR-80"),
            FanRecord::new().with_text("Model", "VR-86"),
            FanRecord::new(),
        ]);
        assert_eq!(catalog.identity(0).id, "F-1");
        assert_eq!(catalog.identity(1).id, "VR-86");
        assert_eq!(catalog.identity(2).id, "#3");
    }

    #[test]
    fn structure_lists_union_of_headers() {
        let catalog = Catalog::from_fans(vec![
            FanRecord::new().with_text("ID", "F-1"),
            FanRecord::new().with_number("Max speed", 1450.0),
        ]);
        let s = catalog.structure();
        assert_eq!(s.count, 2);
        assert_eq!(s.headers, vec!["ID".to_string(), "Max speed".to_string()]);
        assert!(s.sample.is_some());
    }
}
