//! Run settings
//!
//! Loaded from an optional JSON file by the native runner. Every field has a
//! default, so a partial file only overrides what it names.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};

/// Smallest accepted play area edge; spawns need 25 units of margin each side
pub const MIN_PLAY_EXTENT: f32 = 50.0;

/// Errors raised while loading settings
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidPlayArea { width: f32, height: f32 },
    ZeroTickRate,
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read settings: {e}"),
            Self::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Self::InvalidPlayArea { width, height } => write!(
                f,
                "play area {width}x{height} is too small (each edge must exceed {MIN_PLAY_EXTENT})"
            ),
            Self::ZeroTickRate => write!(f, "tick rate must be greater than zero"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Play area width (enemies spawn at this x)
    pub width: f32,
    /// Play area height
    pub height: f32,
    /// RNG seed; `None` picks one from the OS
    pub seed: Option<u64>,
    /// Fixed ticks per second for the runner
    pub tick_rate: u32,
    /// Headless runner stops after this many ticks even if the run is alive
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: PLAY_WIDTH,
            height: PLAY_HEIGHT,
            seed: None,
            tick_rate: 60,
            max_ticks: 60 * 60 * 5,
        }
    }
}

impl Settings {
    /// Settings with a fixed seed and default everything else
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject play areas too small to spawn into and a zero tick rate
    pub fn validate(&self) -> Result<(), SettingsError> {
        // NaN fails both comparisons
        if !(self.width > MIN_PLAY_EXTENT && self.height > MIN_PLAY_EXTENT) {
            return Err(SettingsError::InvalidPlayArea {
                width: self.width,
                height: self.height,
            });
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::ZeroTickRate);
        }
        Ok(())
    }

    /// Fixed timestep in seconds
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }
}
