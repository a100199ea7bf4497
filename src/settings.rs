// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas settings and interaction constants.
//!
//! These are the compile-time defaults. Every value here can be overridden
//! at runtime through [`crate::config::CanvasConfig`].

// ============================================================================
// CAMERA SETTINGS
// ============================================================================
/// Minimum zoom level (10% of original size)
const MIN_ZOOM: f64 = 0.1;

/// Maximum zoom level (10x original size)
const MAX_ZOOM: f64 = 10.0;

/// Wheel delta divisor for the zoom factor (`1 + wheel / divisor`)
const WHEEL_ZOOM_DIVISOR: f64 = 1000.0;

/// Zoom applied when a double click re-centers the glyph
const RECENTER_ZOOM: f64 = 0.5;

// ============================================================================
// POINTER SETTINGS
// ============================================================================
/// Two pointer-down edges closer than this count as a double click
const DOUBLE_CLICK_MS: u64 = 400;

// ============================================================================
// MODIFICATION SETTINGS
// ============================================================================
/// Tension normalisation factor used by handle modification
const TENSION_FACTOR: f64 = 0.6;

/// Arrow key nudge amount in design units
const NUDGE_STEP: f64 = 1.0;

/// Determinant below which two rays are treated as parallel
const PARALLEL_EPSILON: f64 = 1e-9;

// ============================================================================
// KEY CODES
// ============================================================================
const KEY_SHIFT: u32 = 16;
const KEY_ALT: u32 = 18;
const KEY_ESCAPE: u32 = 27;
const KEY_SPACE: u32 = 32;
const KEY_LEFT: u32 = 37;
const KEY_UP: u32 = 38;
const KEY_RIGHT: u32 = 39;
const KEY_DOWN: u32 = 40;

// ============================================================================
// PUBLIC API
// ============================================================================

/// Camera settings (zoom limits, wheel sensitivity)
pub mod camera {
    /// Minimum zoom level
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;

    /// Maximum zoom level
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;

    /// Wheel zoom divisor
    pub const WHEEL_ZOOM_DIVISOR: f64 = super::WHEEL_ZOOM_DIVISOR;

    /// Zoom used by double-click re-centering
    pub const RECENTER_ZOOM: f64 = super::RECENTER_ZOOM;
}

/// Pointer gesture settings
pub mod pointer {
    /// Double click window in milliseconds
    pub const DOUBLE_CLICK_MS: u64 = super::DOUBLE_CLICK_MS;
}

/// Geometric modification settings
pub mod modification {
    /// Tension normalisation factor
    pub const TENSION_FACTOR: f64 = super::TENSION_FACTOR;

    /// Arrow key nudge amount
    pub const NUDGE_STEP: f64 = super::NUDGE_STEP;

    /// Parallel ray threshold
    pub const PARALLEL_EPSILON: f64 = super::PARALLEL_EPSILON;
}

/// Key codes understood by the canvas
pub mod keys {
    pub const SHIFT: u32 = super::KEY_SHIFT;
    pub const ALT: u32 = super::KEY_ALT;
    pub const ESCAPE: u32 = super::KEY_ESCAPE;
    pub const SPACE: u32 = super::KEY_SPACE;
    pub const LEFT: u32 = super::KEY_LEFT;
    pub const UP: u32 = super::KEY_UP;
    pub const RIGHT: u32 = super::KEY_RIGHT;
    pub const DOWN: u32 = super::KEY_DOWN;
}
