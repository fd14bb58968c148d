//! Canvas settings, persisted as JSON in the user's config directory.
//!
//! Every field has a default, so partial files are accepted.

use crate::constants::{
    LINE_SCROLL_STEP, LINE_ZOOM_SENSITIVITY, MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_SENSITIVITY,
};
use crate::error::CanvasResult;
use crate::types::Size;
use crate::viewport::{WheelConfig, ZoomLimits, ensure_positive};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Pixel wheel delta per 100% zoom change
    pub wheel_zoom_sensitivity: f64,
    /// Line wheel delta per 100% zoom change
    pub line_zoom_sensitivity: f64,
    /// Pixels panned per wheel line
    pub line_scroll_step: f64,
    /// Hit-test size of every card, in logical pixels
    pub card_size: Size,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            wheel_zoom_sensitivity: WHEEL_ZOOM_SENSITIVITY,
            line_zoom_sensitivity: LINE_ZOOM_SENSITIVITY,
            line_scroll_step: LINE_SCROLL_STEP,
            card_size: Size::default(),
        }
    }
}

/// `<config_dir>/cardcanvas/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cardcanvas").join("settings.json"))
}

impl Settings {
    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            return Self::default();
        };
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(crate::error::CanvasError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn load_from(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> CanvasResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Validated zoom limits. Fails when no positive scale can be produced.
    pub fn zoom_limits(&self) -> CanvasResult<ZoomLimits> {
        ZoomLimits::new(self.min_zoom, self.max_zoom)
    }

    pub fn wheel_config(&self) -> CanvasResult<WheelConfig> {
        WheelConfig::new(
            self.wheel_zoom_sensitivity,
            self.line_zoom_sensitivity,
            self.line_scroll_step,
        )
    }

    /// Card hit size; an empty or negative box could never be hit.
    pub fn card_size(&self) -> CanvasResult<Size> {
        ensure_positive("card_size.width", self.card_size.width)?;
        ensure_positive("card_size.height", self.card_size.height)?;
        Ok(self.card_size)
    }

    /// Check every field the canvas consumes.
    pub fn validate(&self) -> CanvasResult<()> {
        self.zoom_limits()?;
        self.wheel_config()?;
        self.card_size()?;
        Ok(())
    }
}
