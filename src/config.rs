//! Console settings
//!
//! Loaded from an optional JSON file; every field has a default so an empty
//! object is a valid config. Policy constants (safety threshold, secondary
//! corridor) are deliberately not configurable here.

use crate::console::clock::TelemetryRate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Clock and telemetry refresh interval
    pub tick_interval_ms: u64,
    /// Blink rate of LIVE indicators and the TCA marker
    pub blink_interval_ms: u64,
    pub telemetry_min: u32,
    pub telemetry_max: u32,
    /// Fixed seed for the telemetry rate, for reproducible sessions
    pub telemetry_seed: Option<u64>,
    /// Console messages kept before the oldest are dropped
    pub log_capacity: usize,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 1000,
            blink_interval_ms: 500,
            telemetry_min: TelemetryRate::DEFAULT_MIN,
            telemetry_max: TelemetryRate::DEFAULT_MAX,
            telemetry_seed: None,
            log_capacity: 200,
        }
    }
}

impl ConsoleConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ConsoleConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive".to_string()));
        }
        if self.blink_interval_ms == 0 {
            return Err(ConfigError::Invalid("blink_interval_ms must be positive".to_string()));
        }
        if self.telemetry_min > self.telemetry_max {
            return Err(ConfigError::Invalid(format!(
                "telemetry range is inverted ({} > {})",
                self.telemetry_min, self.telemetry_max
            )));
        }
        if self.log_capacity == 0 {
            return Err(ConfigError::Invalid("log_capacity must be positive".to_string()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn telemetry_rate(&self) -> TelemetryRate {
        TelemetryRate::new(self.telemetry_min, self.telemetry_max, self.telemetry_seed)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse console config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read console config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid console config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_uses_defaults() {
        let config = ConsoleConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
    }

    #[test]
    fn partial_override() {
        let config = ConsoleConfig::from_json_str(r#"{ "tick_interval_ms": 250, "telemetry_seed": 9 }"#).unwrap();
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.telemetry_seed, Some(9));
        assert_eq!(config.log_capacity, 200);
    }

    #[test]
    fn zero_tick_is_invalid() {
        let err = ConsoleConfig::from_json_str(r#"{ "tick_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn inverted_telemetry_range_is_invalid() {
        let err = ConsoleConfig::from_json_str(r#"{ "telemetry_min": 200, "telemetry_max": 100 }"#).unwrap_err();
        assert!(err.to_string().contains("inverted"));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "log_capacity": 50 }}"#).unwrap();
        let config = ConsoleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_capacity, 50);
    }
}
