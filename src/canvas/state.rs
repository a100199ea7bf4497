// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Canvas modes and sub-states.
//!
//! The sub-state is one primary state plus independent modifier flags, so
//! e.g. `ContourSelected` and `zooming` can be active in the same frame.
//! Modifiers are recomputed from the frame's input every frame.

use serde::{Deserialize, Serialize};

/// Top-level canvas mode, chosen by the UI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", from = "String")]
pub enum CanvasMode {
    /// Pan the view
    #[default]
    Move,
    /// Select and drag points
    SelectPoints,
    /// Swap glyph components through the component menu
    Components,
}

impl CanvasMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CanvasMode::Move => "move",
            CanvasMode::SelectPoints => "select-points",
            CanvasMode::Components => "components",
        }
    }
}

impl From<&str> for CanvasMode {
    /// Unknown mode names fall back to `Move`
    fn from(name: &str) -> Self {
        match name {
            "components" => CanvasMode::Components,
            "select-points" => CanvasMode::SelectPoints,
            _ => CanvasMode::Move,
        }
    }
}

impl From<String> for CanvasMode {
    fn from(name: String) -> Self {
        CanvasMode::from(name.as_str())
    }
}

/// UI state supplied by the host each frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiState {
    pub canvas_mode: CanvasMode,
    /// Draw dependency links for a single selected point
    pub show_dependencies: bool,
}

/// Primary interaction state (mutually exclusive)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryState {
    #[default]
    Default,
    BoxSelecting,
    ContourSelected,
    DraggingContourPoint,
    SkeletonPointSelected,
    ContourPointSelected,
    DraggingContour,
    PointsSelected,
    DraggingPoints,
    ComponentHovered,
    ComponentMenuHovered,
}

impl PrimaryState {
    /// States that show the selected contour and its nodes
    pub fn shows_contour(self) -> bool {
        matches!(
            self,
            PrimaryState::ContourSelected
                | PrimaryState::DraggingContourPoint
                | PrimaryState::ContourPointSelected
                | PrimaryState::DraggingContour
                | PrimaryState::SkeletonPointSelected
        )
    }

    /// States in which the pointer drags the selection
    pub fn is_dragging(self) -> bool {
        matches!(
            self,
            PrimaryState::DraggingContourPoint
                | PrimaryState::DraggingPoints
                | PrimaryState::DraggingContour
        )
    }

    /// Settled selection states that accept Escape and arrow keys
    pub fn accepts_keyboard_edits(self) -> bool {
        matches!(
            self,
            PrimaryState::PointsSelected
                | PrimaryState::ContourPointSelected
                | PrimaryState::SkeletonPointSelected
        )
    }

    /// Single point selected (dependency links are shown)
    pub fn is_single_point(self) -> bool {
        matches!(
            self,
            PrimaryState::ContourPointSelected | PrimaryState::SkeletonPointSelected
        )
    }
}

/// Per-frame modifier flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Wheel moved this frame
    pub zooming: bool,
    /// Move mode with the button held
    pub moving: bool,
    /// Smoothing key held
    pub smooth: bool,
    /// Distribution key held
    pub skeleton_distr: bool,
}

/// Primary state plus this frame's modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubState {
    pub primary: PrimaryState,
    pub modifiers: Modifiers,
}
