//! Persistent viewer settings.
//!
//! Settings live in a JSON file under the platform config directory. Every
//! section uses `#[serde(default)]`, so partial files load and missing keys
//! fall back to the documented defaults in `constants`.

use crate::constants::{
    DEFAULT_CLICK_TIMEOUT_MS, DEFAULT_CLICK_TOLERANCE_PX, DEFAULT_DBLCLICK_WINDOW_MS,
    DEFAULT_PLANE_SIZE, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME,
};
use crate::error::{SceneError, SceneResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Click/drag policy and initial enable flags for the input mediator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub click_tolerance_px: f32,
    pub click_timeout_ms: u64,
    pub dblclick_window_ms: u64,
    pub enabled: bool,
    pub keyboard_enabled: bool,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            click_tolerance_px: DEFAULT_CLICK_TOLERANCE_PX,
            click_timeout_ms: DEFAULT_CLICK_TIMEOUT_MS,
            dblclick_window_ms: DEFAULT_DBLCLICK_WINDOW_MS,
            enabled: true,
            keyboard_enabled: true,
        }
    }
}

/// Defaults applied to newly created planes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneDefaults {
    /// World-space length of the longest edge
    pub size: f64,
}

impl Default for PlaneDefaults {
    fn default() -> Self {
        Self {
            size: DEFAULT_PLANE_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input: InputSettings,
    pub planes: PlaneDefaults,
}

impl Settings {
    /// Load from the default path, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(path = %path.display(), "Failed to load settings: {}", e);
            Self::default()
        })
    }

    /// Load from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> SceneResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        let settings: Settings = serde_json::from_str(&text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> SceneResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> SceneResult<()> {
        let tolerance = self.input.click_tolerance_px;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(SceneError::invalid(
                "click_tolerance_px",
                format!("must be finite and non-negative, got {tolerance}"),
            ));
        }
        let size = self.planes.size;
        if !size.is_finite() || size <= 0.0 {
            return Err(SceneError::invalid(
                "planes.size",
                format!("must be positive and finite, got {size}"),
            ));
        }
        Ok(())
    }
}

/// `<config dir>/viewer-core/settings.json`, if the platform has a config dir.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
}
