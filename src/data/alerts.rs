//! Alert center entries

use super::Severity;
use serde::{Deserialize, Serialize};

/// What raised the alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertKind {
    Asat,          // Anti-satellite weapon test
    Fragmentation, // Breakup event producing a debris cloud
    Conjunction,   // Predicted close approach
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertKind::Asat => write!(f, "ASAT"),
            AlertKind::Fragmentation => write!(f, "FRAGMENTATION"),
            AlertKind::Conjunction => write!(f, "CONJUNCTION"),
        }
    }
}

/// A single alert shown in the alert center
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub kind: AlertKind,
    pub message: String,
    pub severity: Severity,
    pub timestamp: String, // relative label, e.g. "T-00:02:00"
}

/// Alerts ordered most severe first, keeping catalog order within a level
pub fn by_severity(alerts: &[Alert]) -> Vec<&Alert> {
    let mut sorted: Vec<&Alert> = alerts.iter().collect();
    sorted.sort_by(|a, b| b.severity.cmp(&a.severity));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert(id: &str, severity: Severity) -> Alert {
        Alert {
            id: id.to_string(),
            kind: AlertKind::Conjunction,
            message: "CLOSE APPROACH".to_string(),
            severity,
            timestamp: "T-00:10:00".to_string(),
        }
    }

    #[test]
    fn most_severe_first_with_stable_ties() {
        let alerts = vec![
            alert("A", Severity::Medium),
            alert("B", Severity::Critical),
            alert("C", Severity::Info),
            alert("D", Severity::Medium),
        ];
        let ids: Vec<&str> = by_severity(&alerts).iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["B", "A", "D", "C"]);
    }
}
