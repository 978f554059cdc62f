//! Derived visualization parameters
//!
//! Geometry the orbit view and risk charts draw from. All values are
//! recomputed from the current selection on every frame; the catalog is small
//! and static so nothing is cached.

use crate::data::{RiskEvent, Satellite};
use serde::Serialize;
use std::iter::FusedIterator;

/// Ring diameter used when the threatened satellite is unknown
pub const FALLBACK_RING_DIAMETER: f64 = 280.0;

/// Ring growth per m/s of delta-v ("orbit raising")
pub const MANEUVER_RING_PER_DV: f64 = 30.0;

pub const BACKGROUND_RING_BASE: f64 = 180.0;
pub const BACKGROUND_RING_SPACING: f64 = 60.0;

pub const PARETO_SAMPLES: usize = 51;
pub const PARETO_STEP_DV: f64 = 0.1;

pub const FUEL_PCT_PER_DV: f64 = 2.5;
pub const ALTITUDE_KM_PER_DV: f64 = 5.0;

pub fn orbit_ring_diameter(satellite: Option<&Satellite>) -> f64 {
    satellite
        .map(|s| s.orbit.ring_diameter())
        .unwrap_or(FALLBACK_RING_DIAMETER)
}

/// Rotation of the debris path in the orbit view, degrees.
///
/// Uses the catalog hint when present. Otherwise the id is hashed so the
/// angle stays stable across frames and runs.
pub fn debris_approach_angle(risk: &RiskEvent) -> f64 {
    risk.debris_angle_deg.unwrap_or_else(|| hashed_angle(&risk.id))
}

// FNV-1a, folded into [-90, 90)
fn hashed_angle(id: &str) -> f64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in id.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    (hash % 180) as f64 - 90.0
}

pub fn maneuver_ring_diameter(base_orbit_diameter: f64, delta_v: f64) -> f64 {
    base_orbit_diameter + delta_v * MANEUVER_RING_PER_DV
}

/// Ring for the `index`-th satellite not involved in the selected risk
pub fn background_ring_diameter(index: usize) -> f64 {
    BACKGROUND_RING_BASE + index as f64 * BACKGROUND_RING_SPACING
}

/// Idealized decay plotted on the Pareto chart.
///
/// Known inconsistency: the live figure uses `engine::linear_decay`. Both are
/// kept until product decides which one is right.
pub fn exponential_decay(base_probability: f64, delta_v: f64) -> f64 {
    base_probability * (-delta_v).exp()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParetoPoint {
    pub delta_v: f64,
    pub probability: f64,
}

/// Lazy Pareto curve: 51 samples at dv = 0.0, 0.1, ..., 5.0.
///
/// Cloning restarts from wherever the clone was taken; `pareto_curve` always
/// starts from dv = 0.
#[derive(Debug, Clone)]
pub struct ParetoCurve {
    base_probability: f64,
    next: usize,
}

impl Iterator for ParetoCurve {
    type Item = ParetoPoint;

    fn next(&mut self) -> Option<ParetoPoint> {
        if self.next >= PARETO_SAMPLES {
            return None;
        }
        let delta_v = self.next as f64 / 10.0;
        self.next += 1;
        Some(ParetoPoint {
            delta_v,
            probability: exponential_decay(self.base_probability, delta_v),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = PARETO_SAMPLES.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ParetoCurve {}
impl FusedIterator for ParetoCurve {}

pub fn pareto_curve(risk: &RiskEvent) -> ParetoCurve {
    ParetoCurve {
        base_probability: risk.probability,
        next: 0,
    }
}

/// Current-position marker on the Pareto chart
pub fn pareto_marker(delta_v: f64, simulated_probability: f64) -> ParetoPoint {
    ParetoPoint {
        delta_v,
        probability: simulated_probability,
    }
}

/// Summary numbers for the maneuver impact box
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ManeuverImpact {
    pub fuel_consumed_pct: f64,
    pub new_altitude_km: f64,
    pub risk_reduction_pct: f64,
}

/// `altitude_km` is `None` when the threatened satellite is unknown; the new
/// altitude is then reported relative to zero.
pub fn maneuver_impact(
    delta_v: f64,
    altitude_km: Option<f64>,
    base_probability: f64,
    simulated_probability: f64,
) -> ManeuverImpact {
    ManeuverImpact {
        fuel_consumed_pct: delta_v * FUEL_PCT_PER_DV,
        new_altitude_km: altitude_km.unwrap_or(0.0) + delta_v * ALTITUDE_KM_PER_DV,
        risk_reduction_pct: (base_probability - simulated_probability) * 100.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{OrbitClass, SatelliteStatus};

    fn risk(id: &str, probability: f64, angle: Option<f64>) -> RiskEvent {
        RiskEvent {
            id: id.to_string(),
            object: "SAT-01".to_string(),
            probability,
            impact: 5.0,
            recommended_dv: 1.0,
            debris_angle_deg: angle,
        }
    }

    fn satellite(orbit: OrbitClass) -> Satellite {
        Satellite {
            id: "SAT-X".to_string(),
            name: "X".to_string(),
            orbit,
            status: SatelliteStatus::Nominal,
            altitude_km: 700.0,
            fuel_pct: 50.0,
        }
    }

    #[test]
    fn orbit_ring_falls_back_without_satellite() {
        assert_eq!(orbit_ring_diameter(None), FALLBACK_RING_DIAMETER);
        assert_eq!(orbit_ring_diameter(Some(&satellite(OrbitClass::Geo))), 400.0);
        assert_eq!(orbit_ring_diameter(Some(&satellite(OrbitClass::Sso))), 340.0);
        assert_eq!(orbit_ring_diameter(Some(&satellite(OrbitClass::Leo))), 280.0);
    }

    #[test]
    fn debris_angle_prefers_catalog_hint() {
        assert_eq!(debris_approach_angle(&risk("R-1", 0.8, Some(45.0))), 45.0);
        assert_eq!(debris_approach_angle(&risk("R-2", 0.2, Some(-30.0))), -30.0);
    }

    #[test]
    fn hashed_debris_angle_is_stable_and_bounded() {
        let a = debris_approach_angle(&risk("R-77", 0.3, None));
        let b = debris_approach_angle(&risk("R-77", 0.3, None));
        assert_eq!(a, b);
        assert!((-90.0..90.0).contains(&a));
    }

    #[test]
    fn maneuver_ring_grows_with_delta_v() {
        assert_eq!(maneuver_ring_diameter(340.0, 0.0), 340.0);
        assert_eq!(maneuver_ring_diameter(340.0, 2.0), 400.0);
    }

    #[test]
    fn pareto_curve_has_51_strictly_decreasing_points() {
        let r = risk("R-1", 0.8, None);
        let points: Vec<ParetoPoint> = pareto_curve(&r).collect();
        assert_eq!(points.len(), PARETO_SAMPLES);
        assert_eq!(points[0].delta_v, 0.0);
        assert_eq!(points[0].probability, 0.8);
        assert_eq!(points[50].delta_v, 5.0);
        assert_eq!(points[50].probability, 0.8 * (-5.0f64).exp());
        for pair in points.windows(2) {
            assert!(pair[1].probability < pair[0].probability);
        }
    }

    #[test]
    fn pareto_curve_is_restartable_and_exact_size() {
        let r = risk("R-2", 0.2, None);
        let curve = pareto_curve(&r);
        assert_eq!(curve.len(), PARETO_SAMPLES);
        let first: Vec<_> = curve.clone().collect();
        let second: Vec<_> = curve.collect();
        assert_eq!(first, second);

        let mut partial = pareto_curve(&r);
        partial.nth(9);
        assert_eq!(partial.len(), PARETO_SAMPLES - 10);
    }

    #[test]
    fn maneuver_impact_numbers() {
        let impact = maneuver_impact(2.0, Some(780.0), 0.8, 0.5);
        assert_eq!(impact.fuel_consumed_pct, 5.0);
        assert_eq!(impact.new_altitude_km, 790.0);
        assert!((impact.risk_reduction_pct - 30.0).abs() < 1e-9);
    }

    #[test]
    fn maneuver_impact_without_satellite_uses_zero_altitude() {
        let impact = maneuver_impact(1.0, None, 0.2, 0.05);
        assert_eq!(impact.new_altitude_km, 5.0);
    }

    #[test]
    fn background_rings_are_spaced() {
        assert_eq!(background_ring_diameter(0), 180.0);
        assert_eq!(background_ring_diameter(2), 300.0);
    }
}
