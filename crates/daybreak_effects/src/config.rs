//! # Engine Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! file is a valid config.
//!
//! ```toml
//! spawn_probability = 0.3
//! offscreen_margin = 50.0
//! glow_blur = 10.0
//! default_intensity = 50
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EffectsError, EffectsResult};

/// Tunables for `ParticleEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Chance per frame that each active effect spawns one particle.
    pub spawn_probability: f32,
    /// Distance past each surface edge before a particle is culled.
    pub offscreen_margin: f32,
    /// Blur radius for glowing particles.
    pub glow_blur: f32,
    /// Particles seeded by `start_default`.
    pub default_intensity: u32,
    /// Fixed RNG seed. `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            spawn_probability: 0.3,
            offscreen_margin: 50.0,
            glow_blur: 10.0,
            default_intensity: 50,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Default config with a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// `ConfigParse` on malformed TOML or unknown keys, `InvalidConfig` on out-of-range values.
    pub fn from_toml_str(text: &str) -> EffectsResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// `ConfigIo` if the file cannot be read, otherwise as `from_toml_str`.
    pub fn from_toml_file(path: impl AsRef<Path>) -> EffectsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| EffectsError::ConfigIo {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> EffectsResult<()> {
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(EffectsError::InvalidConfig(format!(
                "spawn_probability must be within [0, 1], got {}",
                self.spawn_probability
            )));
        }
        if !self.offscreen_margin.is_finite() || self.offscreen_margin < 0.0 {
            return Err(EffectsError::InvalidConfig(format!(
                "offscreen_margin must be finite and non-negative, got {}",
                self.offscreen_margin
            )));
        }
        if !self.glow_blur.is_finite() || self.glow_blur < 0.0 {
            return Err(EffectsError::InvalidConfig(format!(
                "glow_blur must be finite and non-negative, got {}",
                self.glow_blur
            )));
        }
        Ok(())
    }
}
