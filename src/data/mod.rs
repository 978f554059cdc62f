//! Catalog data for the console
//!
//! Defines satellites, alerts, risk events, ground stations, the tracked
//! object table, and the catalog loader that validates them.

pub mod alerts;
pub mod catalog;
pub mod risks;
pub mod satellites;
pub mod stations;

pub use alerts::*;
pub use catalog::*;
pub use risks::*;
pub use satellites::*;
pub use stations::*;

use serde::{Deserialize, Serialize};

/// Severity levels for alerts and console messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Medium => "◆",
            Severity::High => "▲",
            Severity::Critical => "⬤",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}
