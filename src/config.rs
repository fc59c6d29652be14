//! Simulation configuration
//!
//! Loaded from JSON; any field left out keeps its default.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Physics and sizing parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Collisions ===
    /// Token-token restitution (1 = perfectly elastic)
    pub restitution_obj: f32,
    /// Token-wall restitution
    pub restitution_wall: f32,
    /// Padding added to the overlap when pushing tokens apart
    pub extra_separation: f32,
    /// Translational speed ceiling, also bounds fling velocity per axis
    pub max_speed: f32,

    // === Spawning ===
    pub spawn_speed_x: f32,
    pub spawn_speed_y: f32,
    pub spin_start_min: f32,
    pub spin_start_max: f32,

    // === Spin damping ===
    /// Multiplier applied to |spin| on a contact (< 1)
    pub spin_loss: f32,
    /// |spin| never drops below this once damped
    pub min_spin: f32,
    /// Steps during which repeated contacts do not damp again
    pub spin_cooldown_steps: u32,

    // === Responsive sizing ===
    pub size_ratio: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub reference_size: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            restitution_obj: RESTITUTION_OBJ,
            restitution_wall: RESTITUTION_WALL,
            extra_separation: EXTRA_SEPARATION,
            max_speed: MAX_SPEED,

            spawn_speed_x: SPAWN_SPEED_X,
            spawn_speed_y: SPAWN_SPEED_Y,
            spin_start_min: SPIN_START_MIN,
            spin_start_max: SPIN_START_MAX,

            spin_loss: COLLISION_SPIN_LOSS,
            min_spin: MIN_SPIN,
            spin_cooldown_steps: SPIN_LOSS_COOLDOWN_FRAMES,

            size_ratio: SIZE_RATIO,
            min_size: MIN_SIZE,
            max_size: MAX_SIZE,
            reference_size: REFERENCE_SIZE,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file, validating it
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load a config file, falling back to defaults on any failure
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = |name: &str, v: f32| {
            if v.is_finite() && (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be in [0, 1], got {v}")))
            }
        };
        let non_negative = |name: &str, v: f32| {
            if v.is_finite() && v >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be finite and >= 0, got {v}")))
            }
        };
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid(format!("{name} must be finite and > 0, got {v}")))
            }
        };

        unit("restitution_obj", self.restitution_obj)?;
        unit("restitution_wall", self.restitution_wall)?;
        non_negative("extra_separation", self.extra_separation)?;
        positive("max_speed", self.max_speed)?;
        non_negative("spawn_speed_x", self.spawn_speed_x)?;
        non_negative("spawn_speed_y", self.spawn_speed_y)?;
        non_negative("spin_start_min", self.spin_start_min)?;
        non_negative("spin_start_max", self.spin_start_max)?;
        non_negative("min_spin", self.min_spin)?;
        positive("size_ratio", self.size_ratio)?;
        positive("min_size", self.min_size)?;
        positive("max_size", self.max_size)?;
        positive("reference_size", self.reference_size)?;

        if !(self.spin_loss.is_finite() && self.spin_loss > 0.0 && self.spin_loss < 1.0) {
            return Err(ConfigError::Invalid(format!(
                "spin_loss must be in (0, 1), got {}",
                self.spin_loss
            )));
        }
        if self.spin_start_min > self.spin_start_max {
            return Err(ConfigError::Invalid(format!(
                "spin_start_min ({}) exceeds spin_start_max ({})",
                self.spin_start_min, self.spin_start_max
            )));
        }
        if self.min_size > self.max_size {
            return Err(ConfigError::Invalid(format!(
                "min_size ({}) exceeds max_size ({})",
                self.min_size, self.max_size
            )));
        }
        Ok(())
    }

    /// Token diameter for a viewport of the given size
    pub fn responsive_diameter(&self, width: f32, height: f32) -> f32 {
        (width.min(height) * self.size_ratio).clamp(self.min_size, self.max_size)
    }
}
