// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Runtime canvas configuration.
//!
//! `CanvasConfig` mirrors the constants in [`crate::settings`]. A config file
//! only needs to name the values it overrides:
//!
//! ```toml
//! max_zoom = 20.0
//! nudge_step = 2.0
//!
//! [keys]
//! smooth = 17
//! ```

use crate::error::CanvasError;
use crate::settings;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunable canvas behaviour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub wheel_zoom_divisor: f64,
    pub recenter_zoom: f64,
    pub double_click_ms: u64,
    pub nudge_step: f64,
    pub keys: KeyBindings,
}

/// Key codes driving the per-frame modifier flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Held to couple both handles while dragging one
    pub smooth: u32,
    /// Held to slide skeleton points along their segment
    pub distribution: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_zoom: settings::camera::MIN_ZOOM,
            max_zoom: settings::camera::MAX_ZOOM,
            wheel_zoom_divisor: settings::camera::WHEEL_ZOOM_DIVISOR,
            recenter_zoom: settings::camera::RECENTER_ZOOM,
            double_click_ms: settings::pointer::DOUBLE_CLICK_MS,
            nudge_step: settings::modification::NUDGE_STEP,
            keys: KeyBindings::default(),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            smooth: settings::keys::SHIFT,
            distribution: settings::keys::ALT,
        }
    }
}

impl CanvasConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, CanvasError> {
        let config: Self = toml::from_str(text)?;
        Ok(config.sanitized())
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CanvasError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CanvasError::io(path, e))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded canvas config from {}", path.display());
        Ok(config)
    }

    /// Double click window as a `Duration`
    pub fn double_click_window(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }

    /// Swap inverted zoom limits and replace a zero wheel divisor
    pub(crate) fn sanitized(mut self) -> Self {
        if self.min_zoom > self.max_zoom {
            tracing::warn!(
                "min_zoom {} exceeds max_zoom {}, swapping",
                self.min_zoom,
                self.max_zoom
            );
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        if self.wheel_zoom_divisor == 0.0 {
            self.wheel_zoom_divisor = settings::camera::WHEEL_ZOOM_DIVISOR;
        }
        self
    }
}
