//! Seeded synthetic fan catalogs for demos and timing runs.
//!
//! Each fan gets a parabolic pressure curve `p0·(1 − 0.25u − 0.75u²)` over
//! `u = Q/Qmax`, a bell-shaped efficiency curve peaking near 55 % of `Qmax`,
//! and a little multiplicative noise on the pressure points.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::catalog::{BeltScheme, Catalog, CatalogSchema, MotorCatalog};
use crate::domain::FanRecord;
use crate::error::AppError;

/// Rated speeds sit just above synchronous speeds so fixed-speed drives have room.
const RATED_SPEEDS: [f64; 4] = [990.0, 1460.0, 1500.0, 2950.0];
const SERIES: [&str; 3] = ["VR", "VC", "VO"];
const TYPES: [&str; 2] = ["radial", "axial"];
const PRESSURE_POINTS: usize = 6;
const EFFICIENCY_POINTS: usize = 5;
const BELT_RATIOS: [f64; 4] = [0.55, 0.7, 0.85, 1.0];

/// Name of the execution flag column in synthetic records.
pub const EXPLOSION_PROOF: &str = "Explosion-proof";

pub fn generate_catalog(count: usize, seed: u64) -> Result<Catalog, AppError> {
    if count == 0 {
        return Err(AppError::new(2, "Synthetic catalog size must be > 0."));
    }

    let schema = CatalogSchema::default();
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.01).map_err(|e| AppError::new(4, format!("Noise distribution error: {e}")))?;

    let mut fans = Vec::with_capacity(count);
    let mut belt_pairs = Vec::new();

    for i in 0..count {
        let model = format!("SYN-{:03}", i + 1);
        let q_max: f64 = rng.gen_range(1500.0..20_000.0);
        let p0: f64 = rng.gen_range(300.0..2500.0);
        let eta_max: f64 = rng.gen_range(60.0..85.0);
        let rated_max = RATED_SPEEDS[rng.gen_range(0..RATED_SPEEDS.len())];
        let belt_driven = rng.gen_bool(0.15);

        let mut record = FanRecord::new()
            .with_text(&schema.id, format!("syn-{}", i + 1))
            .with_text(&schema.model, model.clone())
            .with_text(&schema.series, SERIES[rng.gen_range(0..SERIES.len())])
            .with_text(&schema.fan_type, TYPES[rng.gen_range(0..TYPES.len())])
            .with_number(&schema.max_speed, rated_max)
            .with_number(&schema.min_speed, (rated_max * 0.3).round())
            .with_number(&schema.outlet_area, round_to(q_max / 3600.0 / 20.0, 3))
            .with_number(&schema.min_flow, (q_max * 0.1).round())
            .with_number(&schema.max_flow, (q_max * 0.95).round())
            .with_number(&schema.max_pressure, p0.round())
            .with_number(&schema.belt_driven, if belt_driven { 1.0 } else { 0.0 })
            .with_number(EXPLOSION_PROOF, if rng.gen_bool(0.3) { 1.0 } else { 0.0 });

        for j in 1..=PRESSURE_POINTS {
            let u = j as f64 / PRESSURE_POINTS as f64;
            let clean = p0 * (1.0 - 0.25 * u - 0.75 * u * u);
            let p = clean * (1.0 + noise.sample(&mut rng));
            record = record
                .with_number(schema.pressure_curve.x.name(j), (q_max * u).round())
                .with_number(schema.pressure_curve.y.name(j), p.max(0.0).round());
        }
        for j in 1..=EFFICIENCY_POINTS {
            let u = j as f64 / (PRESSURE_POINTS as f64);
            let bell = 1.0 - ((u - 0.55) / 0.6).powi(2);
            record = record
                .with_number(schema.efficiency_curve.x.name(j), (q_max * u).round())
                .with_number(schema.efficiency_curve.y.name(j), round_to((eta_max * bell).max(5.0), 1));
        }

        if belt_driven {
            for r in BELT_RATIOS {
                belt_pairs.push((model.clone(), (rated_max * r).round()));
            }
        }
        fans.push(record);
    }

    Ok(Catalog::new(
        schema,
        fans,
        MotorCatalog::standard(),
        BeltScheme::from_pairs(belt_pairs),
    ))
}

fn round_to(v: f64, digits: i32) -> f64 {
    let m = 10f64.powi(digits);
    (v * m).round() / m
}
