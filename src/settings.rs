//! Game settings and preferences
//!
//! Read from LocalStorage on the web, from a JSON file on native.
//! Missing or malformed settings never stop the game: they log a warning and
//! fall back to defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_VIEWPORT, TOUCH_FORCE_FIRST, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Gameplay ===
    /// Upward impulse per tap (the difficulty knob)
    pub touch_force: f32,
    /// Fixed run seed; time-based when absent
    pub seed: Option<u64>,

    // === Display ===
    /// Logical playfield size in points
    pub viewport_width: f32,
    pub viewport_height: f32,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Accessibility ===
    /// Reduced motion (no score pulse)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            touch_force: TOUCH_FORCE_FIRST,
            seed: None,

            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,

            show_fps: true,

            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::sanitized)
    }

    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.viewport_width, self.viewport_height)
    }

    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !self.touch_force.is_finite() {
            log::warn!("touch_force {} is not finite, using default", self.touch_force);
            self.touch_force = defaults.touch_force;
        }
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            log::warn!("viewport_width {} invalid, using default", self.viewport_width);
            self.viewport_width = defaults.viewport_width;
        } else if self.viewport_width > MAX_VIEWPORT {
            log::warn!("viewport_width {} too large, clamping to {}", self.viewport_width, MAX_VIEWPORT);
            self.viewport_width = MAX_VIEWPORT;
        }
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            log::warn!("viewport_height {} invalid, using default", self.viewport_height);
            self.viewport_height = defaults.viewport_height;
        } else if self.viewport_height > MAX_VIEWPORT {
            log::warn!("viewport_height {} too large, clamping to {}", self.viewport_height, MAX_VIEWPORT);
            self.viewport_height = MAX_VIEWPORT;
        }
        self
    }

    /// Parse, or warn and fall back to defaults
    fn parse_or_default(json: &str, source: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", source);
                settings
            }
            Err(e) => {
                log::warn!("Bad settings in {}: {}, using defaults", source, e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "shrimp_swim_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                return Self::parse_or_default(&json, "LocalStorage");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Settings file path, overridable through `SHRIMP_SWIM_SETTINGS`
    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> std::path::PathBuf {
        std::env::var_os("SHRIMP_SWIM_SETTINGS")
            .map(std::path::PathBuf::from)
            .unwrap_or_else(|| std::path::PathBuf::from("shrimp_swim.json"))
    }

    /// Load settings from the JSON file (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let path = Self::path();
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::parse_or_default(&json, &path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Can't read {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }
}
