//! Collision probability engine
//!
//! Maps a risk event and a maneuver magnitude to the live probability figure,
//! the safety verdict, and the secondary conjunction warning. Everything here
//! is pure.

use crate::data::RiskEvent;
use serde::Serialize;

/// Lowest probability ever reported. Zero would read as "impossible".
pub const PROBABILITY_FLOOR: f64 = 0.001;

/// Linear probability reduction per m/s of delta-v
pub const LINEAR_DECAY_PER_DV: f64 = 0.15;

/// Probabilities strictly below this are within safety margins
pub const SAFETY_THRESHOLD: f64 = 0.05;

/// Open delta-v interval whose maneuver path crosses a second hazard
pub const SECONDARY_CORRIDOR: (f64, f64) = (2.2, 3.8);

pub const SECONDARY_HAZARD_LABEL: &str = "DEBRIS (COSMOS 1408)";

/// Result of simulating a burn against one risk event
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationOutcome {
    pub simulated_probability: f64,
    pub is_safe: bool,
    pub secondary_collision: Option<&'static str>,
}

impl SimulationOutcome {
    pub fn verdict(&self) -> &'static str {
        if self.is_safe {
            "WITHIN SAFETY MARGINS"
        } else {
            "CRITICAL THRESHOLD EXCEEDED"
        }
    }

    pub fn probability_pct(&self) -> f64 {
        self.simulated_probability * 100.0
    }
}

/// Live probability figure. Linear in delta-v, floored.
///
/// This intentionally differs from the exponential curve plotted on the
/// Pareto chart (see `visual::exponential_decay`).
pub fn linear_decay(base_probability: f64, delta_v: f64) -> f64 {
    (base_probability - delta_v * LINEAR_DECAY_PER_DV).max(PROBABILITY_FLOOR)
}

pub fn is_safe(probability: f64) -> bool {
    probability < SAFETY_THRESHOLD
}

pub fn secondary_collision(delta_v: f64) -> Option<&'static str> {
    let (low, high) = SECONDARY_CORRIDOR;
    if delta_v > low && delta_v < high {
        Some(SECONDARY_HAZARD_LABEL)
    } else {
        None
    }
}

pub fn simulate(risk: &RiskEvent, delta_v: f64) -> SimulationOutcome {
    let simulated_probability = linear_decay(risk.probability, delta_v);
    SimulationOutcome {
        simulated_probability,
        is_safe: is_safe(simulated_probability),
        secondary_collision: secondary_collision(delta_v),
    }
}

/// Risk matrix quadrant of a (probability, impact) point
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    Low,
    Elevated,
    Critical,
}

pub fn risk_band(probability: f64, impact: f64) -> RiskBand {
    let high_probability = probability >= 0.5;
    let high_impact = impact >= RiskEvent::MAX_IMPACT / 2.0;
    match (high_probability, high_impact) {
        (true, true) => RiskBand::Critical,
        (false, false) => RiskBand::Low,
        _ => RiskBand::Elevated,
    }
}
