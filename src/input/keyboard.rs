// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard edges and held keys

use crate::settings::keys;
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Keyboard state for one frame
///
/// `pressed` and `released` are edges: valid for exactly one frame unless
/// the owner clears them earlier. `held` persists until the key goes up.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyEdges {
    pub pressed: Option<u32>,
    pub released: Option<u32>,
    pub held: BTreeSet<u32>,
}

impl KeyEdges {
    /// `code` went down this frame
    pub fn pressed(&self, code: u32) -> bool {
        self.pressed == Some(code)
    }

    /// `code` went up this frame
    pub fn released(&self, code: u32) -> bool {
        self.released == Some(code)
    }

    pub fn is_held(&self, code: u32) -> bool {
        self.held.contains(&code)
    }

    /// Arrow key pressed this frame, if any
    pub fn arrow(&self) -> Option<Arrow> {
        self.pressed.and_then(Arrow::from_key_code)
    }
}

/// Arrow key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// Map a key code; anything but the four arrows is `None`
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            keys::UP => Some(Arrow::Up),
            keys::DOWN => Some(Arrow::Down),
            keys::LEFT => Some(Arrow::Left),
            keys::RIGHT => Some(Arrow::Right),
            _ => None,
        }
    }

    /// Unit vector in design space (y up)
    pub fn unit(self) -> Vec2 {
        match self {
            Arrow::Up => Vec2::new(0.0, 1.0),
            Arrow::Down => Vec2::new(0.0, -1.0),
            Arrow::Left => Vec2::new(-1.0, 0.0),
            Arrow::Right => Vec2::new(1.0, 0.0),
        }
    }
}
