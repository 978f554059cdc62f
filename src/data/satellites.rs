//! Operator satellites and the public tracked-object table

use serde::{Deserialize, Serialize};

/// Orbit regime of an operator satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrbitClass {
    Leo,
    Sso,
    Geo,
}

impl OrbitClass {
    /// Ring diameter used by the orbit view. A display scale, not a radius.
    pub fn ring_diameter(&self) -> f64 {
        match self {
            OrbitClass::Geo => 400.0,
            OrbitClass::Sso => 340.0,
            OrbitClass::Leo => 280.0,
        }
    }
}

impl std::fmt::Display for OrbitClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrbitClass::Leo => write!(f, "LEO"),
            OrbitClass::Sso => write!(f, "SSO"),
            OrbitClass::Geo => write!(f, "GEO"),
        }
    }
}

/// Health of an operator satellite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SatelliteStatus {
    Nominal,
    Warning,
    Critical,
}

impl SatelliteStatus {
    pub fn is_nominal(&self) -> bool {
        matches!(self, SatelliteStatus::Nominal)
    }
}

impl std::fmt::Display for SatelliteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SatelliteStatus::Nominal => write!(f, "NOMINAL"),
            SatelliteStatus::Warning => write!(f, "WARNING"),
            SatelliteStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A satellite in the operator's own fleet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Satellite {
    pub id: String,
    pub name: String,
    pub orbit: OrbitClass,
    pub status: SatelliteStatus,
    pub altitude_km: f64,
    pub fuel_pct: f64, // 0-100
}

impl Satellite {
    /// Fuel level the maneuver panel flags in red
    pub const LOW_FUEL_PCT: f64 = 20.0;

    /// Fuel level the fleet monitor flags in red
    pub const FLEET_FUEL_WARNING_PCT: f64 = 50.0;

    pub fn is_low_fuel(&self) -> bool {
        self.fuel_pct < Self::LOW_FUEL_PCT
    }
}

/// Average fuel across a fleet, or `None` for an empty fleet
pub fn fleet_average_fuel(satellites: &[Satellite]) -> Option<f64> {
    if satellites.is_empty() {
        return None;
    }
    let total: f64 = satellites.iter().map(|s| s.fuel_pct).sum();
    Some(total / satellites.len() as f64)
}

/// An entry in the public tracked-object table (assets view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedObject {
    pub designation: String,
    pub norad_id: u32,
    pub country: String,
    pub orbit: String, // "LEO", "VLEO", "MEO", "SSO"
    pub status: String,
}

impl TrackedObject {
    pub fn is_operational(&self) -> bool {
        self.status.eq_ignore_ascii_case("operational")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sat(id: &str, fuel: f64) -> Satellite {
        Satellite {
            id: id.to_string(),
            name: id.to_string(),
            orbit: OrbitClass::Leo,
            status: SatelliteStatus::Nominal,
            altitude_km: 550.0,
            fuel_pct: fuel,
        }
    }

    #[test]
    fn ring_diameter_by_orbit_class() {
        assert_eq!(OrbitClass::Geo.ring_diameter(), 400.0);
        assert_eq!(OrbitClass::Sso.ring_diameter(), 340.0);
        assert_eq!(OrbitClass::Leo.ring_diameter(), 280.0);
    }

    #[test]
    fn fleet_average_handles_empty_fleet() {
        assert_eq!(fleet_average_fuel(&[]), None);
        let fleet = [sat("A", 80.0), sat("B", 40.0)];
        assert_eq!(fleet_average_fuel(&fleet), Some(60.0));
    }

    #[test]
    fn low_fuel_threshold_is_exclusive() {
        assert!(sat("A", 19.9).is_low_fuel());
        assert!(!sat("A", 20.0).is_low_fuel());
    }

    #[test]
    fn orbit_class_uses_uppercase_wire_names() {
        let parsed: OrbitClass = serde_json::from_str("\"SSO\"").unwrap();
        assert_eq!(parsed, OrbitClass::Sso);
        assert_eq!(serde_json::to_string(&OrbitClass::Geo).unwrap(), "\"GEO\"");
    }
}
