//! Ground station network

use serde::{Deserialize, Serialize};

/// Operating status of a ground station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationStatus {
    Online,
    Offline,
    Maintenance,
}

impl StationStatus {
    /// Operator toggle order: Online -> Offline -> Maintenance -> Online
    pub fn next(self) -> Self {
        match self {
            StationStatus::Online => StationStatus::Offline,
            StationStatus::Offline => StationStatus::Maintenance,
            StationStatus::Maintenance => StationStatus::Online,
        }
    }
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationStatus::Online => write!(f, "ONLINE"),
            StationStatus::Offline => write!(f, "OFFLINE"),
            StationStatus::Maintenance => write!(f, "MAINTENANCE"),
        }
    }
}

/// A ground station and its current link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundStation {
    pub name: String,
    pub location: String,
    pub status: StationStatus,
    #[serde(default)]
    pub contact: Option<String>,
}

impl GroundStation {
    pub fn cycle_status(&mut self) -> StationStatus {
        self.status = self.status.next();
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_cycle_returns_to_online() {
        let mut station = GroundStation {
            name: "Troll".to_string(),
            location: "Antarctica".to_string(),
            status: StationStatus::Online,
            contact: None,
        };
        assert_eq!(station.cycle_status(), StationStatus::Offline);
        assert_eq!(station.cycle_status(), StationStatus::Maintenance);
        assert_eq!(station.cycle_status(), StationStatus::Online);
    }
}
