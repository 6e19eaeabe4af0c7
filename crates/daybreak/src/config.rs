//! # Host Configuration
//!
//! ```toml
//! input_capacity = 256
//! ambient_weather = true
//! ambient_interval_ms = 30000.0
//! utc_offset_hours = 2
//! enable_timing_logs = false
//!
//! [engine]
//! spawn_probability = 0.3
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use daybreak_effects::EngineConfig;

use crate::error::{HostError, HostResult};

/// Configuration for the frame loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Particle engine tunables.
    pub engine: EngineConfig,
    /// Input queue capacity. Events past this are dropped.
    pub input_capacity: usize,
    /// Run the time-of-day weather schedule.
    pub ambient_weather: bool,
    /// Milliseconds between ambient weather ticks.
    pub ambient_interval_ms: f64,
    /// Local time offset applied to frame timestamps when picking the hour.
    pub utc_offset_hours: i32,
    /// Log frames that blow the frame budget.
    pub enable_timing_logs: bool,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            input_capacity: 256,
            ambient_weather: true,
            ambient_interval_ms: 30_000.0,
            utc_offset_hours: 0,
            enable_timing_logs: false,
        }
    }
}

impl HostConfig {
    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// `ConfigParse` on malformed TOML, `InvalidConfig`/`Effects` on bad values.
    pub fn from_toml_str(text: &str) -> HostResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `ConfigIo` if the file cannot be read, otherwise as `from_toml_str`.
    pub fn from_toml_file(path: impl AsRef<Path>) -> HostResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HostError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges, including the nested engine config.
    ///
    /// # Errors
    ///
    /// The first offending field.
    pub fn validate(&self) -> HostResult<()> {
        self.engine.validate()?;
        if self.input_capacity == 0 {
            return Err(HostError::InvalidConfig("input_capacity must be positive".into()));
        }
        if !self.ambient_interval_ms.is_finite() || self.ambient_interval_ms <= 0.0 {
            return Err(HostError::InvalidConfig(format!(
                "ambient_interval_ms must be finite and positive, got {}",
                self.ambient_interval_ms
            )));
        }
        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(HostError::InvalidConfig(format!(
                "utc_offset_hours must be within [-12, 14], got {}",
                self.utc_offset_hours
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daybreak_effects::EffectsError;

    #[test]
    fn test_nested_engine_section() {
        let config = HostConfig::from_toml_str(
            "ambient_weather = false\n[engine]\nspawn_probability = 0.5\nseed = 3\n",
        )
        .expect("valid config");
        assert!(!config.ambient_weather);
        assert_eq!(config.engine.spawn_probability, 0.5);
        assert_eq!(config.engine.seed, Some(3));
        assert_eq!(config.input_capacity, 256);
    }

    #[test]
    fn test_engine_validation_propagates() {
        let err = HostConfig::from_toml_str("[engine]\nspawn_probability = 2.0\n").unwrap_err();
        assert!(matches!(err, HostError::Effects(EffectsError::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = HostConfig::from_toml_str("ambient_interval_ms = 0.0").unwrap_err();
        assert!(matches!(err, HostError::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_offset_rejected() {
        let err = HostConfig::from_toml_str("utc_offset_hours = 20").unwrap_err();
        assert!(matches!(err, HostError::InvalidConfig(_)));
    }
}
