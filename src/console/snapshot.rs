//! Read-only view of the console for renderers and JSON export

use super::engine::{self, RiskBand, SimulationOutcome};
use super::selection::Selection;
use super::visual::{self, ManeuverImpact, ParetoPoint};
use super::Console;
use crate::data::Catalog;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub time: DateTime<Utc>,
    pub telemetry_rate_mbps: u32,
    pub catalog: &'a Catalog,
    pub selection: &'a Selection,
    /// `None` when no risk is selected
    pub derived: Option<DerivedView>,
}

/// Every value derived from the current selection
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView {
    pub risk_id: String,
    /// `None` when the risk's satellite reference does not resolve
    pub satellite_id: Option<String>,
    pub base_probability: f64,
    pub delta_v: f64,
    pub outcome: SimulationOutcome,
    pub risk_band: RiskBand,
    pub orbit_ring_diameter: f64,
    pub maneuver_ring_diameter: f64,
    pub debris_approach_angle: f64,
    pub pareto_curve: Vec<ParetoPoint>,
    pub pareto_marker: ParetoPoint,
    pub maneuver_impact: ManeuverImpact,
}

impl<'a> Snapshot<'a> {
    pub fn capture(console: &'a Console) -> Self {
        Self {
            time: console.clock,
            telemetry_rate_mbps: console.telemetry_rate(),
            catalog: &console.catalog,
            selection: console.selection(),
            derived: DerivedView::compute(console),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl DerivedView {
    pub fn compute(console: &Console) -> Option<Self> {
        let risk = console.current_risk()?;
        let satellite = console.current_satellite();
        let delta_v = console.delta_v();
        let outcome = engine::simulate(risk, delta_v);
        let orbit_ring_diameter = visual::orbit_ring_diameter(satellite);

        Some(Self {
            risk_id: risk.id.clone(),
            satellite_id: satellite.map(|s| s.id.clone()),
            base_probability: risk.probability,
            delta_v,
            outcome,
            risk_band: engine::risk_band(outcome.simulated_probability, risk.impact),
            orbit_ring_diameter,
            maneuver_ring_diameter: visual::maneuver_ring_diameter(orbit_ring_diameter, delta_v),
            debris_approach_angle: visual::debris_approach_angle(risk),
            pareto_curve: visual::pareto_curve(risk).collect(),
            pareto_marker: visual::pareto_marker(delta_v, outcome.simulated_probability),
            maneuver_impact: visual::maneuver_impact(
                delta_v,
                satellite.map(|s| s.altitude_km),
                risk.probability,
                outcome.simulated_probability,
            ),
        })
    }
}
