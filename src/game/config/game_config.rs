//! Game Configuration
//!
//! Every tunable of the garage in one serde document. Each section and field
//! falls back to its default, so a config file only lists what it changes:
//!
//! ```json
//! {
//!   "grid": { "grid_size": 4.0, "wheel_policy": "CenterSnap" },
//!   "vehicle": { "move_force": 2500.0 },
//!   "input": { "vehicle": { "start": "E" } }
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::builder::PlacementConfig;
use crate::game::vehicle::{StarterConfig, VehicleConfig};
use crate::player::LocomotionConfig;
use crate::world::{GridSnapConfig, HoldPoseConfig};

use super::input_config::InputConfig;

/// Failure to read or accept a config document.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Central configuration for a garage session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub grid: GridSnapConfig,
    pub hold: HoldPoseConfig,
    pub placement: PlacementConfig,
    pub locomotion: LocomotionConfig,
    pub vehicle: VehicleConfig,
    pub starter: StarterConfig,
    pub input: InputConfig,
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("[Config] Loaded {}", path.display());
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break snapping or placement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if !(self.grid.grid_size > 0.0) {
            return invalid("grid.grid_size", "must be positive");
        }
        if self.grid.wheel_radius < 0.0 || self.grid.wheel_width < 0.0 {
            return invalid("grid.wheel_radius/wheel_width", "must not be negative");
        }
        if !(self.hold.wheel_hold_scale > 0.0) {
            return invalid("hold.wheel_hold_scale", "must be positive");
        }
        if !(self.placement.place_distance > 0.0) {
            return invalid("placement.place_distance", "must be positive");
        }
        if !(self.placement.half_extent_factor > 0.0 && self.placement.half_extent_factor < 0.5) {
            return invalid(
                "placement.half_extent_factor",
                "must lie in (0, 0.5) so neighbouring cells do not overlap",
            );
        }
        if !(self.starter.ray_distance > 0.0) {
            return invalid("starter.ray_distance", "must be positive");
        }
        if self.locomotion.pitch_limit < 0.0 {
            return invalid("locomotion.pitch_limit", "must not be negative");
        }
        Ok(())
    }
}
