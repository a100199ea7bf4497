// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Components mode: component hover and the swap menu

use super::overlay::{ComponentMenu, Overlay};
use super::{CanvasMachine, FrameInput, PrimaryState};
use crate::editing::{Action, InteractiveItem, ItemKind};
use crate::model::Glyph;

impl CanvasMachine {
    pub(super) fn components(
        &mut self,
        input: &FrameInput<'_>,
        glyph: &Glyph,
        actions: &mut Vec<Action>,
        overlay: &mut Overlay,
    ) {
        let hot = input.hot_items;
        let mut menu_centers: Vec<&InteractiveItem> = hot
            .iter()
            .filter(|item| item.kind == ItemKind::ComponentMenuItemCenter)
            .collect();
        let mut components: Vec<&InteractiveItem> = hot
            .iter()
            .filter(|item| item.kind.is_component_geometry())
            .collect();

        if input.pointer.released() {
            let choice = hot.iter().find(|i| i.kind == ItemKind::ComponentMenuItem);
            let class_choice = hot
                .iter()
                .find(|i| i.kind == ItemKind::ComponentMenuItemClass);
            if let Some(choice) = choice {
                push_component_choice(glyph, choice, actions);
            }
            if let Some(choice) = class_choice {
                push_class_choice(choice, actions);
            }
            // A release on the menu closes it, dispatched or not
            if choice.is_some() || class_choice.is_some() {
                menu_centers.clear();
                components.clear();
            }
        }

        let hovering_allowed = matches!(
            self.primary,
            PrimaryState::Default | PrimaryState::ComponentHovered
        );
        if let Some(component) = components.first().filter(|_| hovering_allowed) {
            self.primary = PrimaryState::ComponentHovered;
            let id = component
                .data
                .id
                .clone()
                .unwrap_or_else(|| component.id.to_string());
            if self.hover.id.as_ref() != Some(&id) {
                tracing::debug!("Hovering component {}", id);
                self.hover.id = Some(id);
                self.hover.frames = 0;
            }
            overlay.component_menu = Some(ComponentMenu {
                anchor: (*component).clone(),
                frame: self.hover.frames,
            });
            self.hover.frames = self.hover.frames.saturating_add(1);
        } else if let Some(center) = menu_centers.first() {
            self.primary = PrimaryState::ComponentMenuHovered;
            overlay.component_menu = Some(ComponentMenu {
                anchor: (*center).clone(),
                frame: self.hover.frames,
            });
            self.hover.frames = self.hover.frames.saturating_add(1);
        } else {
            self.primary = PrimaryState::Default;
            self.hover.reset();
        }

        self.selection.clear();
        self.contour.clear();
        self.box_origin = None;
    }
}

fn push_component_choice(glyph: &Glyph, choice: &InteractiveItem, actions: &mut Vec<Action>) {
    let (Some(id), Some(name)) = (&choice.data.component_id, &choice.data.base_id) else {
        tracing::debug!("Component menu item {} without component data", choice.id);
        return;
    };
    actions.push(Action::ChangeComponent {
        glyph: glyph.name.clone(),
        id: id.clone(),
        name: name.clone(),
    });
}

fn push_class_choice(choice: &InteractiveItem, actions: &mut Vec<Action>) {
    let (Some(class), Some(name)) = (&choice.data.component_class, &choice.data.base_id) else {
        tracing::debug!("Class menu item {} without class data", choice.id);
        return;
    };
    actions.push(Action::ChangeComponentClass {
        component_class: class.clone(),
        name: name.clone(),
    });
}
