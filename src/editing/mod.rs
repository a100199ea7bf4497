// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Editing model and interaction

pub mod camera;
pub mod change_set;
pub mod edit_types;
pub mod item;
pub mod modification;
pub mod selection;

pub use camera::Camera;
pub use change_set::{Action, ActionDispatcher, ChangeSet, RecordingDispatcher};
pub use edit_types::EditType;
pub use hit_test::{HitTester, StaticHitTester};
pub use item::{HandleSide, InteractiveItem, ItemData, ItemKind};
pub use modification::DragModifiers;
pub use selection::{ContourSelection, Selection};
