// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Per-frame pointer snapshot

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Primary button state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonState {
    #[default]
    Up,
    Down,
}

/// Button transition observed during the current frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEdge {
    #[default]
    None,
    Down,
    Up,
}

/// Pointer state for one frame, in canvas space (y up)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerState {
    pub position: Point,
    /// Movement since the previous frame
    pub delta: Vec2,
    /// Accumulated wheel delta for this frame
    pub wheel: f64,
    pub button: ButtonState,
    pub edge: PointerEdge,
}

impl PointerState {
    /// Button went down this frame
    pub fn pressed(&self) -> bool {
        self.edge == PointerEdge::Down
    }

    /// Button was released this frame
    pub fn released(&self) -> bool {
        self.edge == PointerEdge::Up
    }

    pub fn is_down(&self) -> bool {
        self.button == ButtonState::Down
    }

    pub fn is_wheeling(&self) -> bool {
        self.wheel != 0.0
    }
}
