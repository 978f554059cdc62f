//! The static catalog the console runs against
//!
//! A catalog is compiled into the binary and can be replaced at startup by a
//! JSON file with the same shape. Loading validates every entry so that the
//! simulation never has to deal with malformed risk events.

use super::{Alert, GroundStation, RiskEvent, Satellite, TrackedObject};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

pub const BUILTIN_CATALOG: &str = include_str!("builtin_catalog.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub version: u32,
    pub default_risk_id: String,
    pub satellites: Vec<Satellite>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    pub risks: Vec<RiskEvent>,
    #[serde(default)]
    pub ground_stations: Vec<GroundStation>,
    #[serde(default)]
    pub tracked_objects: Vec<TrackedObject>,
}

impl Catalog {
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG).expect("builtin catalog should parse and validate")
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn satellite(&self, id: &str) -> Option<&Satellite> {
        self.satellites.iter().find(|s| s.id == id)
    }

    pub fn risk(&self, id: &str) -> Option<&RiskEvent> {
        self.risks.iter().find(|r| r.id == id)
    }

    pub fn risk_index(&self, id: &str) -> Option<usize> {
        self.risks.iter().position(|r| r.id == id)
    }

    /// Satellite threatened by a risk event, if the reference resolves
    pub fn satellite_for(&self, risk: &RiskEvent) -> Option<&Satellite> {
        self.satellite(&risk.object)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for sat in &self.satellites {
            if !seen.insert(sat.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "satellite",
                    id: sat.id.clone(),
                });
            }
            // Altitude must be strictly positive
            if sat.altitude_km <= 0.0 {
                return Err(CatalogError::OutOfRange {
                    id: sat.id.clone(),
                    field: "altitude_km",
                    value: sat.altitude_km,
                });
            }
            check_range(&sat.id, "altitude_km", sat.altitude_km, 0.0, f64::MAX)?;
            check_range(&sat.id, "fuel_pct", sat.fuel_pct, 0.0, 100.0)?;
        }

        let mut seen = HashSet::new();
        for risk in &self.risks {
            if !seen.insert(risk.id.as_str()) {
                return Err(CatalogError::Duplicate {
                    kind: "risk",
                    id: risk.id.clone(),
                });
            }
            check_range(&risk.id, "probability", risk.probability, 0.0, 1.0)?;
            check_range(&risk.id, "impact", risk.impact, 0.0, RiskEvent::MAX_IMPACT)?;
            check_range(&risk.id, "recommended_dv", risk.recommended_dv, 0.0, f64::MAX)?;
            if self.satellite(&risk.object).is_none() {
                // Tolerated: satellite-dependent values fall back downstream.
                warn!(risk = %risk.id, object = %risk.object, "risk references unknown satellite");
            }
        }

        if self.risk(&self.default_risk_id).is_none() {
            return Err(CatalogError::UnknownDefaultRisk(self.default_risk_id.clone()));
        }
        Ok(())
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn check_range(id: &str, field: &'static str, value: f64, min: f64, max: f64) -> Result<(), CatalogError> {
    if value.is_nan() || value < min || value > max {
        return Err(CatalogError::OutOfRange {
            id: id.to_string(),
            field,
            value,
        });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read catalog from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("duplicate {kind} id {id}")]
    Duplicate { kind: &'static str, id: String },
    #[error("{id}: {field} out of range ({value})")]
    OutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },
    #[error("default risk {0} is not in the catalog")]
    UnknownDefaultRisk(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn builtin_json() -> Value {
        serde_json::from_str(BUILTIN_CATALOG).unwrap()
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.satellites.len(), 4);
        assert_eq!(catalog.risks.len(), 3);
        assert_eq!(catalog.alerts.len(), 3);
        assert_eq!(catalog.ground_stations.len(), 6);
        assert_eq!(catalog.tracked_objects.len(), 8);
        assert_eq!(catalog.default_risk_id, "R-1");
    }

    #[test]
    fn risks_resolve_to_satellites() {
        let catalog = Catalog::builtin();
        for risk in &catalog.risks {
            assert!(catalog.satellite_for(risk).is_some(), "{} unresolved", risk.id);
        }
        assert_eq!(catalog.risk_index("R-3"), Some(2));
    }

    #[test]
    fn duplicate_risk_id_is_rejected() {
        let mut doc = builtin_json();
        let first = doc["risks"][0].clone();
        doc["risks"].as_array_mut().unwrap().push(first);
        let err = Catalog::from_json_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { kind: "risk", .. }));
    }

    #[test]
    fn duplicate_satellite_id_is_rejected() {
        let mut doc = builtin_json();
        let first = doc["satellites"][0].clone();
        doc["satellites"].as_array_mut().unwrap().push(first);
        let err = Catalog::from_json_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate { kind: "satellite", .. }));
    }

    #[test]
    fn probability_above_one_is_rejected() {
        let mut doc = builtin_json();
        doc["risks"][1]["probability"] = json!(1.2);
        let err = Catalog::from_json_str(&doc.to_string()).unwrap_err();
        match err {
            CatalogError::OutOfRange { id, field, .. } => {
                assert_eq!(id, "R-2");
                assert_eq!(field, "probability");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn negative_recommended_dv_is_rejected() {
        let mut doc = builtin_json();
        doc["risks"][0]["recommended_dv"] = json!(-0.5);
        assert!(Catalog::from_json_str(&doc.to_string()).is_err());
    }

    #[test]
    fn zero_altitude_is_rejected() {
        let mut doc = builtin_json();
        doc["satellites"][1]["altitude_km"] = json!(0.0);
        let err = Catalog::from_json_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfRange { field: "altitude_km", .. }));
    }

    #[test]
    fn unknown_default_risk_is_rejected() {
        let mut doc = builtin_json();
        doc["default_risk_id"] = json!("R-404");
        let err = Catalog::from_json_str(&doc.to_string()).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDefaultRisk(id) if id == "R-404"));
    }

    #[test]
    fn dangling_satellite_reference_is_tolerated() {
        let mut doc = builtin_json();
        doc["risks"][2]["object"] = json!("SAT-99");
        let catalog = Catalog::from_json_str(&doc.to_string()).unwrap();
        let risk = catalog.risk("R-3").unwrap();
        assert!(catalog.satellite_for(risk).is_none());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Catalog::from_file(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
