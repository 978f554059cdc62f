//! Conjunction risk events

use serde::{Deserialize, Serialize};

/// A predicted conjunction between an operator satellite and a hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskEvent {
    pub id: String,
    /// Satellite id this event threatens
    pub object: String,
    /// Baseline collision probability, 0-1 (matrix Y axis)
    pub probability: f64,
    /// Impact severity, 0-10 (matrix X axis)
    pub impact: f64,
    /// Suggested avoidance burn, m/s
    pub recommended_dv: f64,
    /// Display hint for the debris path in the orbit view
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debris_angle_deg: Option<f64>,
}

impl RiskEvent {
    pub const MAX_IMPACT: f64 = 10.0;

    pub fn label(&self) -> String {
        format!("{} EVENT", self.object)
    }
}
