//! COSMA // SSA Platform
//!
//! A terminal space situational awareness console. Shows the operator's
//! fleet, live alerts, and conjunction risk events, and lets the operator
//! rehearse a collision avoidance burn against a selected risk.
//!
//! # Architecture
//!
//! - `data` - Static catalog: satellites, alerts, risk events, ground stations
//! - `console` - Simulation core: risk selection, probability engine,
//!   derived visualization parameters, clock and scheduler
//! - `config` - Console settings loaded from JSON
//! - `tui` - Terminal user interface with ratatui

pub mod config;
pub mod console;
pub mod data;
pub mod tui;

pub use console::Console;
pub use data::*;

/// Console version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the binary edge
pub type Result<T> = anyhow::Result<T>;

/// Rejected console transitions
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown risk event: {0}")]
    UnknownRiskId(String),

    #[error("No risk event selected")]
    NoRiskSelected,
}
