// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Keyboard edits on the selection: Escape resets and arrow nudges

use super::CanvasMachine;
use crate::editing::{Action, ChangeSet, EditType, InteractiveItem, ItemKind, modification};
use crate::input::Arrow;
use crate::model::Glyph;

impl CanvasMachine {
    /// Clear the modifications of every selected item
    pub(super) fn reset_selected(&self, glyph: &Glyph, actions: &mut Vec<Action>) {
        tracing::debug!("Resetting {} selected item(s)", self.selection.len());
        actions.extend(
            self.selection
                .iter()
                .filter_map(|item| reset_changes(glyph, item))
                .map(Action::ChangeGlyphNodeManually),
        );
    }

    /// Move every selected item one step in the arrow's direction
    pub(super) fn nudge_selected(&self, glyph: &Glyph, arrow: Arrow, actions: &mut Vec<Action>) {
        let step = arrow.unit() * self.config.nudge_step;
        let modifiers = self.drag_modifiers();
        actions.extend(
            self.selection
                .iter()
                .filter_map(|item| {
                    let current = glyph.point(&item.id)?;
                    modification::modify_item(
                        glyph,
                        item,
                        current + step,
                        modifiers,
                        EditType::nudge(arrow),
                    )
                })
                .map(Action::ChangeGlyphNodeManually),
        );
    }
}

/// Change-set returning an item to its unmodified state
fn reset_changes(glyph: &Glyph, item: &InteractiveItem) -> Option<ChangeSet> {
    let changes = ChangeSet::new(glyph.name.clone(), EditType::Reset);
    match item.kind {
        ItemKind::NodeIn | ItemKind::NodeOut | ItemKind::ContourNodeIn | ItemKind::ContourNodeOut => {
            let parent = item.data.parent_id.as_ref()?;
            let suffix = item.kind.handle_side()?.suffix();
            Some(
                changes
                    .with_cleared(parent.field(&format!("dir{suffix}")))
                    .with_cleared(parent.field(&format!("tension{suffix}"))),
            )
        }
        ItemKind::Node => {
            let prefix = item.data.modif_address.as_ref()?;
            Some(
                changes
                    .with_cleared(prefix.field("width"))
                    .with_cleared(prefix.field("angle")),
            )
        }
        kind if kind.is_position_node() => {
            let prefix = item.data.modif_address.as_ref()?;
            Some(changes.with(prefix.field("x"), 0.0).with(prefix.field("y"), 0.0))
        }
        _ => None,
    }
}
