//! End-to-end console scenarios through the public API

use chrono::{TimeZone, Utc};
use cosma_console::config::ConsoleConfig;
use cosma_console::console::engine::{SAFETY_THRESHOLD, SECONDARY_HAZARD_LABEL};
use cosma_console::console::visual::{self, PARETO_SAMPLES};
use cosma_console::console::ConsoleAction;
use cosma_console::{Catalog, Console, ConsoleError};
use std::io::Write;

fn console_with(catalog: Catalog) -> Console {
    let config = ConsoleConfig {
        telemetry_seed: Some(42),
        ..ConsoleConfig::default()
    };
    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    Console::new(catalog, &config, now)
}

fn console() -> Console {
    console_with(Catalog::builtin())
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn default_risk_starts_unsafe() {
    let console = console();
    assert_eq!(console.selection().risk_id(), Some("R-1"));
    let outcome = console.outcome().unwrap();
    assert!(approx(outcome.simulated_probability, 0.8));
    assert!(!outcome.is_safe);
    assert_eq!(outcome.secondary_collision, None);
}

#[test]
fn recommended_burn_on_critical_risk_is_not_enough() {
    let mut console = console();
    console.execute_maneuver().unwrap();
    assert_eq!(console.delta_v(), 1.5);

    let outcome = console.outcome().unwrap();
    assert!(approx(outcome.simulated_probability, 0.575));
    assert!(!outcome.is_safe);
    assert_eq!(outcome.secondary_collision, None);
    assert_eq!(console.stats.maneuvers_executed, 1);
}

#[test]
fn small_burn_clears_low_risk_to_floor() {
    let mut console = console();
    console.select_risk("R-3").unwrap();
    console.set_delta_v(0.5).unwrap();

    let outcome = console.outcome().unwrap();
    assert_eq!(outcome.simulated_probability, 0.001);
    assert!(outcome.is_safe);
    assert!(outcome.simulated_probability < SAFETY_THRESHOLD);
}

#[test]
fn secondary_corridor_is_open_interval() {
    let mut console = console();
    for (dv, expect) in [(2.2, None), (3.0, Some(SECONDARY_HAZARD_LABEL)), (3.8, None), (4.0, None)] {
        console.set_delta_v(dv).unwrap();
        assert_eq!(console.outcome().unwrap().secondary_collision, expect, "dv {}", dv);
    }
}

#[test]
fn selecting_a_risk_resets_thrust() {
    let mut console = console();
    console.set_delta_v(2.0).unwrap();
    console.select_risk("R-2").unwrap();
    assert_eq!(console.delta_v(), 0.0);
    assert_eq!(console.current_satellite().unwrap().id, "SAT-01");
}

#[test]
fn unknown_risk_leaves_state_untouched() {
    let mut console = console();
    console.set_delta_v(1.2).unwrap();
    let before = console.selection().clone();

    let err = console
        .apply(ConsoleAction::SelectRisk("R-99".to_string()))
        .unwrap_err();
    assert_eq!(err, ConsoleError::UnknownRiskId("R-99".to_string()));
    assert_eq!(console.selection(), &before);
    assert_eq!(console.stats.rejected_actions, 1);
}

#[test]
fn thrust_is_clamped_to_slider_range() {
    let mut console = console();
    console.set_delta_v(9.0).unwrap();
    assert_eq!(console.delta_v(), 5.0);
    console.set_delta_v(-1.0).unwrap();
    assert_eq!(console.delta_v(), 0.0);
}

#[test]
fn no_selection_rejects_burns() {
    let mut console = console();
    console.clear_selection();
    assert!(console.outcome().is_none());
    assert_eq!(console.execute_maneuver().unwrap_err(), ConsoleError::NoRiskSelected);
    assert_eq!(console.set_delta_v(1.0).unwrap_err(), ConsoleError::NoRiskSelected);
    assert!(console.check_status().starts_with("Risk: NONE"));
}

#[test]
fn pareto_curve_is_monotone_and_restartable() {
    let catalog = Catalog::builtin();
    let risk = catalog.risk("R-1").unwrap();
    let curve = visual::pareto_curve(risk);
    assert_eq!(curve.len(), PARETO_SAMPLES);

    let points: Vec<_> = curve.clone().collect();
    assert_eq!(points.first().unwrap().delta_v, 0.0);
    assert!(approx(points.first().unwrap().probability, 0.8));
    assert!(approx(points.last().unwrap().delta_v, 5.0));
    assert!((points.last().unwrap().probability - 0.8 * (-5.0f64).exp()).abs() < 1e-6);
    assert!(points.windows(2).all(|w| w[1].probability <= w[0].probability));

    let again: Vec<_> = curve.collect();
    assert_eq!(points, again);
}

#[test]
fn dangling_satellite_falls_back_in_snapshot() {
    let mut catalog = Catalog::builtin();
    catalog.risks[0].object = "SAT-99".to_string();
    let mut console = console_with(catalog);
    console.set_delta_v(1.0).unwrap();

    let view = console.snapshot().derived.unwrap();
    assert_eq!(view.satellite_id, None);
    assert_eq!(view.orbit_ring_diameter, visual::FALLBACK_RING_DIAMETER);
    assert_eq!(view.maneuver_ring_diameter, 310.0);
    assert!(approx(view.maneuver_impact.new_altitude_km, 5.0));
    assert!(approx(view.maneuver_impact.fuel_consumed_pct, 2.5));
}

#[test]
fn snapshot_serializes_selection_and_derived_values() {
    let console = console();
    let json = console.snapshot().to_json_pretty().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["selection"]["state"], "selected");
    assert_eq!(value["selection"]["risk_id"], "R-1");
    assert_eq!(value["derived"]["orbit_ring_diameter"], 340.0);
    assert_eq!(value["derived"]["pareto_curve"].as_array().unwrap().len(), PARETO_SAMPLES);
    assert_eq!(value["catalog"]["risks"].as_array().unwrap().len(), 3);
}

#[test]
fn catalog_loads_from_file() {
    let json = r#"{
        "default_risk_id": "X-1",
        "satellites": [
            { "id": "S-1", "name": "PATHFINDER", "orbit": "GEO", "status": "nominal", "altitude_km": 35786.0, "fuel_pct": 60.0 }
        ],
        "risks": [
            { "id": "X-1", "object": "S-1", "probability": 0.3, "impact": 6.0, "recommended_dv": 1.0 }
        ]
    }"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let catalog = Catalog::from_file(file.path()).unwrap();
    assert!(catalog.alerts.is_empty());
    let console = console_with(catalog);
    let view = console.snapshot().derived.unwrap();
    assert_eq!(view.orbit_ring_diameter, 400.0);
}
