//! Gameplay tunables
//!
//! Defaults mirror [`crate::consts`]. Overrides are read from a JSON file on
//! native (`tyk-tyk.json`, or the path in `TYK_TYK_SETTINGS`) and from
//! LocalStorage on the web. Missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SettingsError, SettingsResult};

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Spawning ===
    /// Fewest circles a new game can start with
    pub min_circles: usize,
    /// Most circles a new game can start with (inclusive)
    pub max_circles: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Base speed range (pixels per tick before the multiplier)
    pub min_speed: f32,
    pub max_speed: f32,
    /// Lowest value for each color channel
    pub min_channel: u8,

    // === Popping ===
    /// Radius lost per frame while a circle pops
    pub pop_speed: f32,

    // === Difficulty ===
    pub initial_multiplier: f64,
    /// Added to the multiplier on every pop
    pub multiplier_step: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_circles: MIN_CIRCLES,
            max_circles: MAX_CIRCLES,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            min_speed: MIN_SPEED,
            max_speed: MAX_SPEED,
            min_channel: MIN_CHANNEL,
            pop_speed: POP_SPEED,
            initial_multiplier: INITIAL_MULTIPLIER,
            multiplier_step: MULTIPLIER_STEP,
        }
    }
}

impl Settings {
    /// Native settings file name (relative to the working directory)
    pub const FILE_NAME: &'static str = "tyk-tyk.json";
    /// Environment variable overriding the settings file path
    pub const PATH_ENV: &'static str = "TYK_TYK_SETTINGS";
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "tyk_tyk_settings";

    /// Parse and validate a JSON settings document
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every range is usable for spawning circles
    pub fn validate(&self) -> SettingsResult<()> {
        if self.min_circles == 0 {
            return Err(SettingsError::OutOfRange {
                name: "min_circles",
                value: 0.0,
                allowed: "[1, ∞)",
            });
        }
        if self.max_circles > CIRCLE_LIMIT {
            return Err(SettingsError::OutOfRange {
                name: "max_circles",
                value: self.max_circles as f32,
                allowed: "[1, 32]",
            });
        }
        if self.min_circles > self.max_circles {
            return Err(SettingsError::EmptyRange {
                name: "circles",
                min: self.min_circles as f32,
                max: self.max_circles as f32,
            });
        }

        // NaN fails every comparison, so the checks are written to reject it
        if !(self.min_radius > 0.0) {
            return Err(SettingsError::OutOfRange {
                name: "min_radius",
                value: self.min_radius,
                allowed: "(0, ∞)",
            });
        }
        if !(self.min_radius <= self.max_radius) {
            return Err(SettingsError::EmptyRange {
                name: "radius",
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        if self.max_radius * 2.0 > WIDTH.min(HEIGHT) {
            return Err(SettingsError::OutOfRange {
                name: "max_radius",
                value: self.max_radius,
                allowed: "small enough for the disc to fit the window",
            });
        }

        if !(self.min_speed >= 0.0) {
            return Err(SettingsError::OutOfRange {
                name: "min_speed",
                value: self.min_speed,
                allowed: "[0, ∞)",
            });
        }
        if !(self.min_speed <= self.max_speed) || !self.max_speed.is_finite() {
            return Err(SettingsError::EmptyRange {
                name: "speed",
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if !(self.pop_speed > 0.0) {
            return Err(SettingsError::OutOfRange {
                name: "pop_speed",
                value: self.pop_speed,
                allowed: "(0, ∞)",
            });
        }
        if !(self.initial_multiplier >= 0.0) {
            return Err(SettingsError::OutOfRange {
                name: "initial_multiplier",
                value: self.initial_multiplier as f32,
                allowed: "[0, ∞)",
            });
        }
        if !(self.multiplier_step >= 0.0) {
            return Err(SettingsError::OutOfRange {
                name: "multiplier_step",
                value: self.multiplier_step as f32,
                allowed: "[0, ∞)",
            });
        }

        Ok(())
    }

    /// Read settings from a file. `Ok(None)` when the file does not exist.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> SettingsResult<Option<Self>> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SettingsError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Load settings from disk (native only), falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = std::env::var_os(Self::PATH_ENV)
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from(Self::FILE_NAME));

        match Self::load_from_path(&path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("{}; using default settings", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}
