//! Game settings and rule tuning
//!
//! Loaded once at startup. On native builds the JSON file named by
//! `COLOR_RUSH_SETTINGS` overrides the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{Color, Language, PALETTE};

/// Environment variable holding the settings file path
pub const SETTINGS_ENV: &str = "COLOR_RUSH_SETTINGS";

/// Gameplay rules for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Spawn interval at round start (ms)
    pub initial_spawn_interval_ms: u64,
    /// Spawn interval never drops below this (ms)
    pub min_spawn_interval_ms: u64,
    /// Interval multiplier applied at each threshold
    pub speedup_factor: f64,
    /// Score step that triggers a speed-up
    pub speedup_every: u32,
    /// Score awarded per correct tap
    pub points_per_hit: u32,
    /// Circle radius in surface units
    pub circle_radius: f32,
    /// Colors used for targets and circles
    pub palette: Vec<Color>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_spawn_interval_ms: INITIAL_SPAWN_INTERVAL_MS,
            min_spawn_interval_ms: MIN_SPAWN_INTERVAL_MS,
            speedup_factor: SPEEDUP_FACTOR,
            speedup_every: SPEEDUP_EVERY,
            points_per_hit: POINTS_PER_HIT,
            circle_radius: CIRCLE_RADIUS,
            palette: PALETTE.to_vec(),
        }
    }
}

impl Rules {
    /// Reject rule sets the round cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(self.circle_radius > 0.0 && self.circle_radius.is_finite()) {
            return Err(ConfigError::InvalidRadius(self.circle_radius));
        }
        if self.initial_spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        if self.min_spawn_interval_ms > self.initial_spawn_interval_ms {
            return Err(ConfigError::FloorAboveInitial {
                min: self.min_spawn_interval_ms,
                initial: self.initial_spawn_interval_ms,
            });
        }
        if !(self.speedup_factor > 0.0 && self.speedup_factor <= 1.0) {
            return Err(ConfigError::InvalidSpeedup(self.speedup_factor));
        }
        if self.points_per_hit == 0 {
            return Err(ConfigError::ZeroPoints);
        }
        if self.speedup_every == 0 || self.speedup_every % self.points_per_hit != 0 {
            return Err(ConfigError::InvalidThreshold(self.speedup_every));
        }
        Ok(())
    }

    /// Interval after one speed-up step (truncated, floored)
    pub fn sped_up(&self, interval_ms: u64) -> u64 {
        let next = (interval_ms as f64 * self.speedup_factor) as u64;
        next.max(self.min_spawn_interval_ms).max(1).min(interval_ms)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Gameplay rules
    pub rules: Rules,
    /// Label language
    pub language: Language,
    /// Fixed RNG seed (random per run if unset)
    pub seed: Option<u64>,
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()
    }

    /// Load settings from the file named by `COLOR_RUSH_SETTINGS` (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(SETTINGS_ENV) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)?;
                let settings = Self::from_json(&json).inspect_err(|e| {
                    log::warn!("Rejected settings from {}: {}", path.to_string_lossy(), e);
                })?;
                log::info!("Loaded settings from {}", path.to_string_lossy());
                Ok(settings)
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::default())
    }
}
