// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! SelectPoints mode transitions

use super::{CanvasMachine, FrameInput, PrimaryState};
use crate::editing::{InteractiveItem, ItemKind, Selection};
use kurbo::Point;

impl CanvasMachine {
    /// Apply the SelectPoints transition table for this frame's pointer edge
    pub(super) fn select_points(&mut self, input: &FrameInput<'_>) {
        let pointer = input.pointer;
        let nodes: Vec<&InteractiveItem> = input
            .hot_items
            .iter()
            .filter(|item| item.kind.is_node())
            .collect();
        let contours: Vec<&InteractiveItem> = input
            .hot_items
            .iter()
            .filter(|item| item.kind.is_contour())
            .collect();

        let before = self.primary;
        match self.primary {
            // Other modes' states do not survive into SelectPoints
            PrimaryState::ComponentHovered | PrimaryState::ComponentMenuHovered => {
                self.reset_to_default();
            }
            PrimaryState::Default if pointer.pressed() => {
                self.start_box(pointer.position);
            }
            PrimaryState::BoxSelecting if pointer.released() => {
                self.box_origin = None;
                if !input.boxed_items.is_empty() {
                    self.selection = Selection::from_items(input.boxed_items);
                    self.primary = PrimaryState::PointsSelected;
                } else if self.contour.select_next(&contours).is_some() {
                    self.primary = PrimaryState::ContourSelected;
                } else {
                    self.primary = PrimaryState::Default;
                }
            }
            PrimaryState::ContourSelected
            | PrimaryState::ContourPointSelected
            | PrimaryState::SkeletonPointSelected
                if pointer.pressed() =>
            {
                if let Some(node) = nodes.first() {
                    self.selection = Selection::single((*node).clone());
                    self.primary = PrimaryState::DraggingContourPoint;
                } else if self.contour.is_hit(&contours) {
                    self.selection.clear();
                    self.contour_dragged = false;
                    self.primary = PrimaryState::DraggingContour;
                } else {
                    self.selection.clear();
                    self.contour.clear();
                    self.start_box(pointer.position);
                }
            }
            PrimaryState::DraggingContourPoint if pointer.released() => {
                let skeleton = self
                    .selection
                    .first()
                    .is_some_and(|item| item.kind == ItemKind::NodeSkeleton);
                self.primary = if skeleton {
                    PrimaryState::SkeletonPointSelected
                } else {
                    PrimaryState::ContourPointSelected
                };
            }
            PrimaryState::DraggingContour if pointer.released() => {
                // A click without movement steps to the next overlapping contour
                if !self.contour_dragged {
                    self.contour.select_next(&contours);
                }
                self.primary = PrimaryState::ContourSelected;
            }
            PrimaryState::PointsSelected if pointer.pressed() => {
                if nodes.iter().any(|node| self.selection.contains(&node.id)) {
                    self.primary = PrimaryState::DraggingPoints;
                } else {
                    self.selection.clear();
                    self.contour.clear();
                    self.start_box(pointer.position);
                }
            }
            PrimaryState::DraggingPoints if pointer.released() => {
                self.primary = PrimaryState::PointsSelected;
            }
            _ => {}
        }

        if self.primary != before {
            tracing::debug!("{:?} -> {:?}", before, self.primary);
        }
    }

    fn start_box(&mut self, origin: Point) {
        self.primary = PrimaryState::BoxSelecting;
        self.box_origin = Some(origin);
    }
}
