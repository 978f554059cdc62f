//! Risk selection state machine
//!
//! `NoSelection` or `Selected(risk, delta_v)`. Selecting a risk always
//! resets delta-v so a burn planned for one event never leaks into another.

use crate::data::Catalog;
use crate::ConsoleError;
use serde::Serialize;

pub const DELTA_V_MIN: f64 = 0.0;
pub const DELTA_V_MAX: f64 = 5.0;

/// Slider resolution, m/s
pub const DELTA_V_STEP: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    NoSelection,
    Selected { risk_id: String, delta_v: f64 },
}

/// Clamp to the slider range. NaN reads as no burn.
pub fn clamp_delta_v(value: f64) -> f64 {
    if value.is_nan() {
        return DELTA_V_MIN;
    }
    value.clamp(DELTA_V_MIN, DELTA_V_MAX)
}

impl Selection {
    /// The catalog's default risk, no burn
    pub fn initial(catalog: &Catalog) -> Self {
        Selection::Selected {
            risk_id: catalog.default_risk_id.clone(),
            delta_v: 0.0,
        }
    }

    pub fn risk_id(&self) -> Option<&str> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected { risk_id, .. } => Some(risk_id),
        }
    }

    /// Zero when nothing is selected
    pub fn delta_v(&self) -> f64 {
        match self {
            Selection::NoSelection => 0.0,
            Selection::Selected { delta_v, .. } => *delta_v,
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected { .. })
    }

    pub fn select_risk(&mut self, catalog: &Catalog, id: &str) -> Result<(), ConsoleError> {
        if catalog.risk(id).is_none() {
            return Err(ConsoleError::UnknownRiskId(id.to_string()));
        }
        *self = Selection::Selected {
            risk_id: id.to_string(),
            delta_v: 0.0,
        };
        Ok(())
    }

    /// Returns the clamped value that was stored
    pub fn set_delta_v(&mut self, value: f64) -> Result<f64, ConsoleError> {
        match self {
            Selection::NoSelection => Err(ConsoleError::NoRiskSelected),
            Selection::Selected { delta_v, .. } => {
                *delta_v = clamp_delta_v(value);
                Ok(*delta_v)
            }
        }
    }

    /// Move the slider by `step`, snapped to slider resolution
    pub fn nudge_delta_v(&mut self, step: f64) -> Result<f64, ConsoleError> {
        let target = ((self.delta_v() + step) / DELTA_V_STEP).round() * DELTA_V_STEP;
        self.set_delta_v(target)
    }

    /// Apply the recommended burn of the selected risk
    pub fn execute_maneuver(&mut self, catalog: &Catalog) -> Result<f64, ConsoleError> {
        let recommended = match self.risk_id() {
            None => return Err(ConsoleError::NoRiskSelected),
            Some(id) => catalog
                .risk(id)
                .map(|risk| risk.recommended_dv)
                .ok_or_else(|| ConsoleError::UnknownRiskId(id.to_string()))?,
        };
        self.set_delta_v(recommended)
    }

    pub fn clear(&mut self) {
        *self = Selection::NoSelection;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_default_risk_without_burn() {
        let catalog = Catalog::builtin();
        let selection = Selection::initial(&catalog);
        assert_eq!(selection.risk_id(), Some("R-1"));
        assert_eq!(selection.delta_v(), 0.0);
    }

    #[test]
    fn unknown_risk_leaves_state_unchanged() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::initial(&catalog);
        selection.set_delta_v(2.0).unwrap();
        let before = selection.clone();

        let err = selection.select_risk(&catalog, "R-404").unwrap_err();
        assert_eq!(err, ConsoleError::UnknownRiskId("R-404".to_string()));
        assert_eq!(selection, before);
    }

    #[test]
    fn selecting_resets_delta_v() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::initial(&catalog);
        selection.set_delta_v(3.3).unwrap();
        selection.select_risk(&catalog, "R-2").unwrap();
        assert_eq!(selection.delta_v(), 0.0);

        // Reselecting the same risk also resets
        selection.set_delta_v(1.0).unwrap();
        selection.select_risk(&catalog, "R-2").unwrap();
        assert_eq!(selection.delta_v(), 0.0);
    }

    #[test]
    fn delta_v_is_clamped() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::initial(&catalog);
        assert_eq!(selection.set_delta_v(7.5), Ok(DELTA_V_MAX));
        assert_eq!(selection.set_delta_v(-1.0), Ok(DELTA_V_MIN));
        assert_eq!(selection.set_delta_v(f64::NAN), Ok(DELTA_V_MIN));
        assert_eq!(selection.set_delta_v(2.5), Ok(2.5));
    }

    #[test]
    fn transitions_without_selection_are_rejected() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::NoSelection;
        assert_eq!(selection.set_delta_v(1.0), Err(ConsoleError::NoRiskSelected));
        assert_eq!(selection.nudge_delta_v(0.1), Err(ConsoleError::NoRiskSelected));
        assert_eq!(selection.execute_maneuver(&catalog), Err(ConsoleError::NoRiskSelected));
        assert_eq!(selection, Selection::NoSelection);
    }

    #[test]
    fn execute_maneuver_applies_recommended_burn() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::initial(&catalog);
        assert_eq!(selection.execute_maneuver(&catalog), Ok(1.5));
        selection.select_risk(&catalog, "R-3").unwrap();
        assert_eq!(selection.execute_maneuver(&catalog), Ok(0.2));
    }

    #[test]
    fn nudge_snaps_to_slider_steps() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::initial(&catalog);
        for _ in 0..3 {
            selection.nudge_delta_v(DELTA_V_STEP).unwrap();
        }
        assert_eq!(selection.delta_v(), 3.0 * DELTA_V_STEP);
        assert_eq!(selection.nudge_delta_v(-1.0), Ok(0.0));
    }

    #[test]
    fn clear_then_select_recovers() {
        let catalog = Catalog::builtin();
        let mut selection = Selection::initial(&catalog);
        selection.clear();
        assert!(!selection.is_selected());
        assert_eq!(selection.delta_v(), 0.0);
        selection.select_risk(&catalog, "R-1").unwrap();
        assert!(selection.is_selected());
    }
}
