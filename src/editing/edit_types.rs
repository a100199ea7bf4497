// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Edit types for undo grouping

use crate::input::Arrow;
use serde::{Deserialize, Serialize};

/// Type of edit a change-set belongs to
///
/// The canvas does no undo bookkeeping itself. The hint lets the
/// dispatcher fold consecutive edits of the same type into one undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditType {
    /// Drag operation in progress (updates current undo group)
    Drag,

    /// Escape reset of manual edits (creates new undo group)
    Reset,

    /// Nudge up (combines with other Up nudges)
    NudgeUp,

    /// Nudge down (combines with other Down nudges)
    NudgeDown,

    /// Nudge left (combines with other Left nudges)
    NudgeLeft,

    /// Nudge right (combines with other Right nudges)
    NudgeRight,
}

impl EditType {
    pub fn nudge(arrow: Arrow) -> Self {
        match arrow {
            Arrow::Up => EditType::NudgeUp,
            Arrow::Down => EditType::NudgeDown,
            Arrow::Left => EditType::NudgeLeft,
            Arrow::Right => EditType::NudgeRight,
        }
    }
}
