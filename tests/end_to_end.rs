use std::path::PathBuf;

use fan_select::catalog::{BeltScheme, Catalog, CatalogPaths, CatalogSchema, MotorCatalog, ZeroFlowPolicy};
use fan_select::domain::{CatalogFilter, DriveType, DriveVariant, FanRecord, PressureBasis, Requirement};
use fan_select::error::SelectionError;
use fan_select::io::{read_results_json, write_results_json};
use fan_select::{SelectOptions, select_fans, select_fans_with_diagnostics};

const PRESSURE: [(f64, f64); 5] = [(0.0, 600.0), (500.0, 550.0), (1000.0, 450.0), (1500.0, 300.0), (2000.0, 100.0)];
const EFFICIENCY: [(f64, f64); 4] = [(250.0, 55.0), (750.0, 68.0), (1250.0, 72.0), (1750.0, 65.0)];

fn fan(id: &str, flow_scale: f64, pressure_scale: f64) -> FanRecord {
    let mut r = FanRecord::new()
        .with_text("ID", id)
        .with_text("Model", format!("{id}-M"))
        .with_text("Series", "VR")
        .with_text("Type", "radial")
        .with_number("Max speed", 1461.0)
        .with_number("Min speed", 500.0);
    for (i, (q, p)) in PRESSURE.iter().enumerate() {
        r = r
            .with_number(format!("Flow {}", i + 1), q * flow_scale)
            .with_number(format!("Pressure {}", i + 1), p * pressure_scale);
    }
    for (i, (q, e)) in EFFICIENCY.iter().enumerate() {
        r = r
            .with_number(format!("EfficiencyFlow {}", i + 1), q * flow_scale)
            .with_number(format!("EfficiencyValue {}", i + 1), *e);
    }
    r
}

fn shutoff_schema() -> CatalogSchema {
    CatalogSchema {
        zero_flow: ZeroFlowPolicy::LeadingShutoff,
        ..CatalogSchema::default()
    }
}

fn catalog(fans: Vec<FanRecord>) -> Catalog {
    Catalog::new(shutoff_schema(), fans, MotorCatalog::standard(), BeltScheme::empty())
}

fn requirement() -> Requirement {
    Requirement {
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
    }
}

#[test]
fn single_fan_fixed_speed_duty_point() {
    let catalog = catalog(vec![fan("F-1", 1.0, 1.0)]);
    let results = select_fans(&catalog, &requirement()).unwrap();

    assert_eq!(results.len(), 1);
    let r = &results[0];
    assert_eq!(r.drive, DriveVariant::FixedSpeed);
    assert_eq!(r.speed, 1450.0);
    assert!((r.operating_point.x - 1000.0).abs() <= 1.0, "x = {}", r.operating_point.x);
    assert!((396.0..=484.0).contains(&r.operating_point.y), "y = {}", r.operating_point.y);
    assert!((r.operating_point.efficiency - 0.713).abs() < 0.01);
    assert!((r.operating_point.power - 0.2).abs() < 1e-9);
    assert_eq!(r.power, 0.25);
    assert_eq!(r.requested_point.x, 1000.0);
    assert_eq!(r.dense_curve.len(), 1024);
    assert_eq!(r.base_curve.len(), 5);
    assert!(r.chart.is_none());
}

#[test]
fn power_reserve_is_applied_before_motor_sizing() {
    let catalog = catalog(vec![fan("F-1", 1.0, 1.0)]);
    let mut req = requirement();
    req.power_reserve = 10.0;
    let r = &select_fans(&catalog, &req).unwrap()[0];
    assert!((r.operating_point.power - 0.22).abs() < 1e-9);
    assert_eq!(r.power, 0.25);
}

#[test]
fn zero_flow_sentinel_leaves_no_curve() {
    let catalog = Catalog::from_fans(vec![fan("F-1", 1.0, 1.0)]);
    let report = select_fans_with_diagnostics(&catalog, &requirement(), &SelectOptions::default()).unwrap();
    assert!(report.results.is_empty());
    assert_eq!(report.rejections[0].reason, SelectionError::DataAbsent { curve: "pressure" });
}

#[test]
fn variable_frequency_runs_at_base_speed() {
    let catalog = catalog(vec![fan("F-1", 1.0, 1.0)]);
    let mut req = requirement();
    req.drive_type = DriveType::Vfd;
    let results = select_fans(&catalog, &req).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].drive, DriveVariant::VariableFrequency);
    assert_eq!(results[0].speed, 1449.0);
    assert_eq!(results[0].operating_point.x, 999.0);
}

#[test]
fn belt_ratio_uses_scheme_speeds_and_belt_driven_records() {
    let belt_fan = fan("B-1", 1.0, 1.0).with_number("Belt driven", 1.0);
    let direct_fan = fan("D-1", 1.0, 1.0);
    let scheme = BeltScheme::from_pairs([("B-1-M", 1200.0), ("B-1-M", 1455.0)]);
    let catalog = Catalog::new(shutoff_schema(), vec![belt_fan, direct_fan], MotorCatalog::standard(), scheme);

    let mut req = requirement();
    req.belt = true;
    let results = select_fans(&catalog, &req).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fan.id, "B-1");
    assert_eq!(results[0].drive, DriveVariant::BeltRatio);
    assert_eq!(results[0].speed, 1455.0);

    // Fixed speed skips the belt-driven variant.
    let results = select_fans(&catalog, &requirement()).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].fan.id, "D-1");
}

#[test]
fn excluded_records_carry_reasons() {
    let catalog = catalog(vec![fan("small", 1.0, 1.0), fan("huge", 100.0, 30.0)]);

    // Slow duty: the nearest synchronous speed overshoots the pressure band.
    let mut req = requirement();
    req.flow_rate = 600.0;
    req.pressure = 160.0;
    let report = select_fans_with_diagnostics(&catalog, &req, &SelectOptions::default()).unwrap();
    assert!(report.results.is_empty());
    let small = report.rejections.iter().find(|r| r.fan.id == "small").unwrap();
    assert!(matches!(small.reason, SelectionError::OutOfTolerance { pressure, .. } if pressure > 176.0));

    // Big duty: over 500 kW at the shaft, beyond the motor list.
    let mut req = requirement();
    req.flow_rate = 100_000.0;
    req.pressure = 13_200.0;
    let report = select_fans_with_diagnostics(&catalog, &req, &SelectOptions::default()).unwrap();
    let huge = report.rejections.iter().find(|r| r.fan.id == "huge").unwrap();
    assert!(matches!(huge.reason, SelectionError::NoMotorFits { power_kw } if power_kw > 400.0));
}

#[test]
fn too_few_flows_is_a_degenerate_fit() {
    // A zero in column 4 ends the curve after three points; a cubic needs four.
    let short = fan("short", 1.0, 1.0).with_number("Flow 4", 0.0);
    let catalog = catalog(vec![short, fan("full", 1.0, 1.0)]);
    let report = select_fans_with_diagnostics(&catalog, &requirement(), &SelectOptions::default()).unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].fan.id, "full");
    assert_eq!(report.rejections.len(), 1);
    assert!(matches!(
        report.rejections[0].reason,
        SelectionError::DegenerateFit { curve: "pressure", .. }
    ));
}

#[test]
fn nan_cells_exclude_the_record_without_panicking() {
    let broken = fan("nan", 1.0, 1.0).with_number("EfficiencyFlow 2", f64::NAN);
    let catalog = catalog(vec![broken, fan("ok", 1.0, 1.0)]);
    let report = select_fans_with_diagnostics(&catalog, &requirement(), &SelectOptions::default()).unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].fan.id, "ok");
    let nan = report.rejections.iter().find(|r| r.fan.id == "nan").unwrap();
    assert!(matches!(nan.reason, SelectionError::DegenerateFit { curve: "efficiency", .. }));
}

#[test]
fn static_pressure_subtracts_outlet_dynamic_pressure() {
    let catalog = catalog(vec![fan("S", 1.0, 1.0).with_number("Outlet area", 0.05)]);
    let total = select_fans(&catalog, &requirement()).unwrap();

    let mut req = requirement();
    req.pressure_basis = PressureBasis::Static;
    let results = select_fans(&catalog, &req).unwrap();
    assert_eq!(results.len(), 1);
    let r = &results[0];

    // About 18.6 Pa of velocity pressure at 1000 m³/h pulls the crossing left.
    assert_eq!(r.speed, 1450.0);
    assert!((984.0..=986.0).contains(&r.operating_point.x), "x = {}", r.operating_point.x);
    assert!((425.0..=427.0).contains(&r.operating_point.y), "y = {}", r.operating_point.y);
    assert!((r.operating_point.efficiency - 0.685).abs() < 0.005);
    assert!(r.operating_point.efficiency < total[0].operating_point.efficiency);
    assert!(r.operating_point.x < total[0].operating_point.x);
}

#[test]
fn static_pressure_needs_a_usable_outlet_area() {
    let catalog = catalog(vec![
        fan("no-area", 1.0, 1.0),
        fan("zero-area", 1.0, 1.0).with_number("Outlet area", 0.0),
    ]);
    let mut req = requirement();
    req.pressure_basis = PressureBasis::Static;
    let report = select_fans_with_diagnostics(&catalog, &req, &SelectOptions::default()).unwrap();

    assert!(report.results.is_empty());
    assert_eq!(report.rejections.len(), 2);
    for rejection in &report.rejections {
        assert!(
            matches!(&rejection.reason, SelectionError::InvalidField { field, .. } if field == "Outlet area"),
            "{}: {:?}",
            rejection.fan.id,
            rejection.reason
        );
    }

    // The same records are fine under the total convention.
    assert_eq!(select_fans(&catalog, &requirement()).unwrap().len(), 2);
}

#[test]
fn filters_narrow_only_when_set() {
    let fans = vec![
        fan("A", 1.0, 1.0),
        fan("B", 1.0, 1.0).with_text("Type", "axial"),
        fan("C", 1.0, 1.0).with_text("Series", "VC").with_number("Ex", 1.0),
    ];
    let catalog = catalog(fans);
    let opts = SelectOptions::default();
    let candidates = |req: &Requirement| select_fans_with_diagnostics(&catalog, req, &opts).unwrap().candidates;

    assert_eq!(candidates(&requirement()), 3);

    let mut by_type = requirement();
    by_type.fan_type = CatalogFilter::Only("radial".into());
    assert_eq!(candidates(&by_type), 2);

    let mut by_series = requirement();
    by_series.series = CatalogFilter::Only("VC".into());
    assert_eq!(candidates(&by_series), 1);

    let mut by_execution = requirement();
    by_execution.execution = CatalogFilter::Only("Ex".into());
    assert_eq!(candidates(&by_execution), 1);

    // An empty value is a real filter, not "All".
    let mut empty = requirement();
    empty.series = CatalogFilter::parse("");
    assert_eq!(candidates(&empty), 0);
}

#[test]
fn catalog_is_not_modified_and_runs_are_repeatable() {
    let catalog = catalog(vec![fan("F-1", 1.0, 1.0), fan("F-2", 1.2, 1.1)]);
    let before = catalog.fans.clone();

    let first = select_fans(&catalog, &requirement()).unwrap();
    let opts = SelectOptions {
        threads: Some(2),
        ..SelectOptions::default()
    };
    let second = select_fans_with_diagnostics(&catalog, &requirement(), &opts).unwrap().results;

    assert_eq!(catalog.fans, before);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.fan, b.fan);
        assert_eq!(a.operating_point, b.operating_point);
        assert_eq!(a.speed, b.speed);
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fansel-{}-{name}", std::process::id()))
}

#[test]
fn csv_catalog_to_json_export() {
    let mut csv = String::from("ID,Model,Max speed,Flow 1,Pressure 1,Flow 2,Pressure 2,Flow 3,Pressure 3,Flow 4,Pressure 4,Flow 5,Pressure 5");
    csv.push_str(",EfficiencyFlow 1,EfficiencyValue 1,EfficiencyFlow 2,EfficiencyValue 2,EfficiencyFlow 3,EfficiencyValue 3,EfficiencyFlow 4,EfficiencyValue 4\n");
    csv.push_str("F-1,VR-80,1461,0,600,500,550,1000,450,1500,300,2000,100,250,55,750,68,1250,72,1750,65\n");
    let fans_path = temp_path("fans.csv");
    std::fs::write(&fans_path, csv).unwrap();

    let schema_path = temp_path("schema.json");
    std::fs::write(&schema_path, r#"{ "zero_flow": "leading-shutoff" }"#).unwrap();

    let catalog = Catalog::load(&CatalogPaths {
        fans: fans_path.clone(),
        belt_scheme: None,
        motors: None,
        schema: Some(schema_path.clone()),
    })
    .unwrap();
    assert_eq!(catalog.len(), 1);

    let req = requirement();
    let results = select_fans(&catalog, &req).unwrap();
    assert_eq!(results.len(), 1);

    let export_path = temp_path("results.json");
    write_results_json(&export_path, &req, &results).unwrap();
    let back = read_results_json(&export_path).unwrap();
    assert_eq!(back.requirement, req);
    assert_eq!(back.results.len(), 1);
    assert_eq!(back.results[0].speed, 1450.0);

    for p in [fans_path, schema_path, export_path] {
        let _ = std::fs::remove_file(p);
    }
}
