//! Simulation core and state management
//!
//! [`Console`] owns the catalog, the risk selection, the clock reading and
//! the telemetry rate. The presentation layer only reads from it and sends
//! [`ConsoleAction`]s back.

pub mod clock;
pub mod engine;
pub mod selection;
pub mod snapshot;
pub mod visual;

use crate::config::ConsoleConfig;
use crate::data::*;
use crate::ConsoleError;
use chrono::{DateTime, Utc};
use clock::TelemetryRate;
use engine::SimulationOutcome;
use selection::Selection;
use serde::Serialize;
use snapshot::Snapshot;
use tracing::{debug, info, warn};

/// The console state
#[derive(Debug, Clone)]
pub struct Console {
    /// Catalog the console runs against (ground station status is mutable)
    pub catalog: Catalog,

    /// Which risk is selected and the planned burn
    selection: Selection,

    /// Last clock reading, refreshed by `tick`
    pub clock: DateTime<Utc>,

    telemetry: TelemetryRate,

    /// Message log (for UI display), oldest first
    pub message_log: Vec<ConsoleMessage>,

    log_capacity: usize,

    pub stats: ConsoleStats,
}

/// Operator intents accepted from the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    SelectRisk(String),
    SetDeltaV(f64),
    NudgeDeltaV(f64),
    ExecuteManeuver,
    ClearSelection,
    CycleStation(usize),
}

/// Session counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsoleStats {
    pub ticks: u64,
    pub selections: u32,
    pub maneuvers_executed: u32,
    pub rejected_actions: u32,
}

/// A line in the console message log
#[derive(Debug, Clone, Serialize)]
pub struct ConsoleMessage {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub source: String,
    pub message: String,
}

impl ConsoleMessage {
    pub fn info(timestamp: DateTime<Utc>, source: &str, message: &str) -> Self {
        Self::alert(timestamp, Severity::Info, source, message)
    }

    pub fn alert(timestamp: DateTime<Utc>, severity: Severity, source: &str, message: &str) -> Self {
        Self {
            timestamp,
            severity,
            source: source.to_string(),
            message: message.to_string(),
        }
    }
}

impl Console {
    pub fn new(catalog: Catalog, config: &ConsoleConfig, now: DateTime<Utc>) -> Self {
        let selection = Selection::initial(&catalog);
        let mut console = Self {
            selection,
            clock: now,
            telemetry: config.telemetry_rate(),
            message_log: Vec::new(),
            log_capacity: config.log_capacity.max(1),
            stats: ConsoleStats::default(),
            catalog,
        };

        let line = format!(
            "Console online. Tracking {} risk events across {} satellites.",
            console.catalog.risks.len(),
            console.catalog.satellites.len()
        );
        info!(
            risks = console.catalog.risks.len(),
            satellites = console.catalog.satellites.len(),
            "console initialized"
        );
        console.add_message(ConsoleMessage::info(now, "System", &line));
        console
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn delta_v(&self) -> f64 {
        self.selection.delta_v()
    }

    pub fn telemetry_rate(&self) -> u32 {
        self.telemetry.current()
    }

    pub fn current_risk(&self) -> Option<&RiskEvent> {
        self.selection.risk_id().and_then(|id| self.catalog.risk(id))
    }

    /// Satellite threatened by the selected risk. `None` when nothing is
    /// selected or the reference does not resolve.
    pub fn current_satellite(&self) -> Option<&Satellite> {
        self.current_risk().and_then(|risk| self.catalog.satellite_for(risk))
    }

    pub fn outcome(&self) -> Option<SimulationOutcome> {
        self.current_risk()
            .map(|risk| engine::simulate(risk, self.selection.delta_v()))
    }

    /// Add a message to the log
    pub fn add_message(&mut self, message: ConsoleMessage) {
        self.message_log.push(message);
        if self.message_log.len() > self.log_capacity {
            let excess = self.message_log.len() - self.log_capacity;
            self.message_log.drain(..excess);
        }
    }

    /// Apply an operator action, returning lines for the operator
    pub fn apply(&mut self, action: ConsoleAction) -> Result<Vec<String>, ConsoleError> {
        debug!(action = ?action, "console action");
        let result = match action {
            ConsoleAction::SelectRisk(id) => self.select_risk(&id),
            ConsoleAction::SetDeltaV(v) => self.set_delta_v(v),
            ConsoleAction::NudgeDeltaV(step) => self.nudge_delta_v(step),
            ConsoleAction::ExecuteManeuver => self.execute_maneuver(),
            ConsoleAction::ClearSelection => {
                self.clear_selection();
                Ok(vec!["Risk selection cleared.".to_string()])
            }
            ConsoleAction::CycleStation(index) => Ok(self
                .cycle_station_status(index)
                .map(|status| vec![format!("Ground station set to {}.", status)])
                .unwrap_or_default()),
        };

        if let Err(ref err) = result {
            self.stats.rejected_actions += 1;
            warn!(error = %err, "console action rejected");
            let now = self.clock;
            self.add_message(ConsoleMessage::alert(now, Severity::Medium, "Console", &err.to_string()));
        }
        result
    }

    pub fn select_risk(&mut self, id: &str) -> Result<Vec<String>, ConsoleError> {
        self.selection.select_risk(&self.catalog, id)?;
        self.stats.selections += 1;
        info!(risk = id, "risk selected");

        let mut lines = vec![format!("Risk {} selected. Thrust reset to 0.0 m/s.", id)];
        if self.current_satellite().is_none() {
            warn!(risk = id, "selected risk has no satellite data");
            lines.push("No satellite data for this event.".to_string());
        }
        lines.extend(self.outcome_lines());
        self.log_lines("Risk", &lines);
        Ok(lines)
    }

    pub fn set_delta_v(&mut self, value: f64) -> Result<Vec<String>, ConsoleError> {
        let before = self.outcome();
        let applied = self.selection.set_delta_v(value)?;
        debug!(delta_v = applied, "thrust set");
        Ok(self.after_burn_change(before))
    }

    pub fn nudge_delta_v(&mut self, step: f64) -> Result<Vec<String>, ConsoleError> {
        let before = self.outcome();
        let applied = self.selection.nudge_delta_v(step)?;
        debug!(delta_v = applied, "thrust nudged");
        Ok(self.after_burn_change(before))
    }

    pub fn execute_maneuver(&mut self) -> Result<Vec<String>, ConsoleError> {
        let applied = self.selection.execute_maneuver(&self.catalog)?;
        self.stats.maneuvers_executed += 1;
        info!(
            risk = self.selection.risk_id().unwrap_or_default(),
            delta_v = applied,
            "maneuver executed"
        );

        let mut lines = vec![format!("Executing recommended burn: {:.1} m/s.", applied)];
        lines.extend(self.outcome_lines());
        self.log_lines("Maneuver", &lines);
        Ok(lines)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        info!("risk selection cleared");
        let now = self.clock;
        self.add_message(ConsoleMessage::info(now, "Selection", "Risk selection cleared."));
    }

    /// Periodic refresh: clock reading and telemetry rate
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.clock = now;
        let rate = self.telemetry.sample();
        self.stats.ticks += 1;
        debug!(tick = self.stats.ticks, telemetry_mbps = rate, "tick");
    }

    /// Rotate a ground station's status. Out of range is a no-op.
    pub fn cycle_station_status(&mut self, index: usize) -> Option<StationStatus> {
        let station = self.catalog.ground_stations.get_mut(index)?;
        let status = station.cycle_status();
        let line = format!("{} is now {}", station.name, status);
        info!(station = %station.name, status = %status, "ground station toggled");
        let now = self.clock;
        self.add_message(ConsoleMessage::info(now, "Ground", &line));
        Some(status)
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot::capture(self)
    }

    /// One-line status summary for the status bar
    pub fn check_status(&self) -> String {
        let risk = self.selection.risk_id().unwrap_or("NONE");
        let probability = self
            .outcome()
            .map(|o| format!("{:.1}%", o.probability_pct()))
            .unwrap_or_else(|| "--".to_string());
        format!(
            "Risk: {} | Δv: {:.1} m/s | Pc: {} | Maneuvers: {} | {}",
            risk,
            self.delta_v(),
            probability,
            self.stats.maneuvers_executed,
            self.clock.format("%H:%M:%S UTC")
        )
    }

    fn after_burn_change(&mut self, before: Option<SimulationOutcome>) -> Vec<String> {
        let after = self.outcome();
        let mut lines = Vec::new();
        if let (Some(before), Some(after)) = (before, after) {
            if before.is_safe != after.is_safe || before.secondary_collision != after.secondary_collision {
                lines = self.outcome_lines();
                self.log_lines("Simulation", &lines);
            }
        }
        lines
    }

    fn outcome_lines(&self) -> Vec<String> {
        let Some(outcome) = self.outcome() else {
            return Vec::new();
        };
        let mut lines = vec![format!(
            "Projected risk {:.1}% - {}",
            outcome.probability_pct(),
            outcome.verdict()
        )];
        if let Some(hazard) = outcome.secondary_collision {
            lines.push(format!("Secondary conjunction: maneuver path intersects with {}.", hazard));
        }
        lines
    }

    fn log_lines(&mut self, source: &str, lines: &[String]) {
        let now = self.clock;
        let outcome = self.outcome();
        for line in lines {
            let severity = match outcome {
                Some(o) if o.secondary_collision.is_some() && line.starts_with("Secondary") => Severity::High,
                Some(o) if !o.is_safe && line.starts_with("Projected") => Severity::Critical,
                _ => Severity::Info,
            };
            self.add_message(ConsoleMessage::alert(now, severity, source, line));
        }
    }
}
