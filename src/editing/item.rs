// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Interactive items produced by the hit tester.
//!
//! An item carries a snapshot of the base geometry captured when the hit
//! tester built it. Modifications are always computed against that
//! snapshot, never against the live (already edited) glyph values, so a
//! drag stays stable frame after frame.

use crate::model::Address;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// What an interactive item represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    /// On-curve node (outline side of a skeleton node)
    Node,
    /// Incoming handle of a skeleton node
    NodeIn,
    /// Outgoing handle of a skeleton node
    NodeOut,
    /// Skeleton node position
    NodeSkeleton,
    /// Node of a plain (non-skeleton) contour
    ContourNode,
    ContourNodeIn,
    ContourNodeOut,
    GlyphContour,
    GlyphComponentContour,
    /// Component geometry offering a choice
    ComponentChoice,
    /// Empty component slot offering a choice
    ComponentNoneChoice,
    ComponentMenuItem,
    ComponentMenuItemClass,
    ComponentMenuItemCenter,
}

/// Side of a handle pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleSide {
    In,
    Out,
}

impl HandleSide {
    /// Field suffix used in addresses (`dirIn`, `tensionOut`, ...)
    pub fn suffix(self) -> &'static str {
        match self {
            HandleSide::In => "In",
            HandleSide::Out => "Out",
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            HandleSide::In => HandleSide::Out,
            HandleSide::Out => HandleSide::In,
        }
    }
}

impl ItemKind {
    /// Any draggable node or handle
    pub fn is_node(self) -> bool {
        matches!(
            self,
            ItemKind::Node
                | ItemKind::NodeIn
                | ItemKind::NodeOut
                | ItemKind::NodeSkeleton
                | ItemKind::ContourNode
                | ItemKind::ContourNodeIn
                | ItemKind::ContourNodeOut
        )
    }

    /// A selectable contour (own or from a component)
    pub fn is_contour(self) -> bool {
        matches!(self, ItemKind::GlyphContour | ItemKind::GlyphComponentContour)
    }

    /// Component geometry that opens a component menu on hover
    pub fn is_component_geometry(self) -> bool {
        matches!(self, ItemKind::ComponentChoice | ItemKind::ComponentNoneChoice)
    }

    /// Handle side, for the four handle kinds
    pub fn handle_side(self) -> Option<HandleSide> {
        match self {
            ItemKind::NodeIn | ItemKind::ContourNodeIn => Some(HandleSide::In),
            ItemKind::NodeOut | ItemKind::ContourNodeOut => Some(HandleSide::Out),
            _ => None,
        }
    }

    /// Handle belonging to a plain contour (its parent is the skeleton node)
    pub fn is_contour_handle(self) -> bool {
        matches!(self, ItemKind::ContourNodeIn | ItemKind::ContourNodeOut)
    }

    /// Node whose raw x/y offsets are edited
    pub fn is_position_node(self) -> bool {
        matches!(self, ItemKind::NodeSkeleton | ItemKind::ContourNode)
    }
}

/// Base geometry captured with the item
///
/// Which fields are present depends on the item kind; a missing field makes
/// the corresponding modification a no-op.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ItemData {
    /// Address of the node owning a handle or on-curve point
    pub parent_id: Option<Address>,
    /// Address of the skeleton node a handle belongs to
    pub skeleton_id: Option<Address>,
    /// Base position of the node across the curve segment from the handle
    pub other_node: Option<Point>,
    /// Base direction of that node's facing handle
    pub other_dir: Option<f64>,
    /// Active mirroring (`scaleX`, `scaleY`)
    pub transforms: Vec<String>,
    pub base_width: Option<f64>,
    /// Address of the on-curve point on the other side of the skeleton
    pub opposite_id: Option<Address>,
    pub base_angle: Option<f64>,
    /// Skeleton point an on-curve node hangs off
    pub skeleton: Option<Point>,
    pub angle_offset: Option<f64>,
    /// Prefix that modification fields are appended to
    pub modif_address: Option<Address>,
    /// Base position of a skeleton/contour node
    pub base: Option<Point>,
    /// Skeleton segment endpoints for distribution
    pub expanded_to: Option<[Point; 2]>,
    /// Skeleton segment width for distribution
    pub width: Option<f64>,
    pub base_distr: Option<f64>,
    pub component_id: Option<String>,
    pub base_id: Option<String>,
    pub component_class: Option<String>,
    /// Identity of a hovered component
    pub id: Option<String>,
    /// Owning component for component contours
    pub component_idx: Option<usize>,
    /// Outline contour range `[start, end)` of a contour item
    pub indexes: Option<[usize; 2]>,
}

impl ItemData {
    /// Per-axis sign undoing the item's mirroring
    pub fn mirror(&self) -> Vec2 {
        let flip = |name: &str| {
            if self.transforms.iter().any(|t| t == name) {
                -1.0
            } else {
                1.0
            }
        };
        Vec2::new(flip("scaleX"), flip("scaleY"))
    }
}

/// An item the pointer can interact with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveItem {
    pub id: Address,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    #[serde(default)]
    pub data: ItemData,
}

impl InteractiveItem {
    pub fn new(id: impl Into<Address>, kind: ItemKind, data: ItemData) -> Self {
        Self {
            id: id.into(),
            kind,
            data,
        }
    }
}
