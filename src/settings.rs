//! Game settings
//!
//! Loaded from an optional JSON file; any field left out keeps its default.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::FPS;
use crate::error::ConfigError;
use crate::sim::{FieldConfig, PlayerConfig};

/// Where and how the player starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartPose {
    pub x: f64,
    pub y: f64,
    /// Radians, clockwise from the vertical axis
    pub angle: f64,
}

impl Default for StartPose {
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.0,
            angle: 0.0,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Nominal tick rate of the driving timer
    pub fps: u32,
    /// Circle field seed
    pub seed: u64,
    pub player: PlayerConfig,
    pub field: FieldConfig,
    pub start: StartPose,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            seed: 0,
            player: PlayerConfig::default(),
            field: FieldConfig::default(),
            start: StartPose::default(),
        }
    }
}

impl Settings {
    /// Defaults with a specific field seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::NonPositiveFps);
        }
        self.player.validate()?;
        self.field.validate()?;
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Wall-clock time between two ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1) as u64)
    }
}
