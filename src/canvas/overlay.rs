// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Renderer hints produced alongside each frame.
//!
//! Nothing here feeds back into the state machine; the renderer draws it.

use crate::editing::{InteractiveItem, ItemKind};
use crate::model::{Address, Glyph};
use kurbo::{Point, Rect};
use serde::Serialize;
use serde_json::Value;

/// Dependency entries pointing into anchors are not drawn
const ANCHOR_SEGMENT: &str = "anchor";

/// Depth of a node address (`contours.N.nodes.M`)
const NODE_ADDRESS_DEPTH: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    /// Box spanned by the box origin and the pointer, in design space
    pub selection_box: Option<Rect>,
    pub selected_contour: Option<InteractiveItem>,
    pub component_menu: Option<ComponentMenu>,
    pub dependencies: Vec<DependencyLink>,
    pub property: Option<NodeProperty>,
}

/// Component menu anchored at a hovered component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentMenu {
    pub anchor: InteractiveItem,
    /// Frames since this hover began, for the opening animation
    pub frame: u32,
}

/// Line from a depending point to the selected point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DependencyLink {
    pub from: Point,
    pub to: Point,
}

/// Property panel content for a single selected item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeProperty {
    pub kind: ItemKind,
    pub node: Value,
    pub parent: Option<Value>,
}

/// Links from every point depending on `item` to the item itself
pub fn dependency_links(glyph: &Glyph, item: &InteractiveItem) -> Vec<DependencyLink> {
    let Some(to) = glyph.point(&item.id) else {
        return Vec::new();
    };

    glyph
        .dependents(&item.id)
        .into_iter()
        .filter(|dep| !dep.as_str().contains(ANCHOR_SEGMENT))
        .filter_map(|dep| glyph.point(&dep.truncated(NODE_ADDRESS_DEPTH)))
        .map(|from| DependencyLink { from, to })
        .collect()
}

/// Property panel content, with the parent looked up per item kind
pub fn node_property(glyph: &Glyph, item: &InteractiveItem) -> Option<NodeProperty> {
    let parent_of = |id: &Option<Address>| id.as_ref().and_then(|id| glyph.get(id)).cloned();

    let parent = match item.kind {
        ItemKind::NodeSkeleton => None,
        ItemKind::Node
        | ItemKind::ContourNode
        | ItemKind::NodeIn
        | ItemKind::NodeOut
        | ItemKind::ContourNodeIn
        | ItemKind::ContourNodeOut => parent_of(&item.data.parent_id),
        _ => return None,
    };

    Some(NodeProperty {
        kind: item.kind,
        node: glyph.get(&item.id)?.clone(),
        parent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::ItemData;
    use serde_json::json;

    fn create_test_glyph() -> Glyph {
        Glyph::from_value(json!({
            "name": "a",
            "contours": [{
                "nodes": [
                    { "x": 0.0, "y": 0.0, "expand": { "width": 20.0 } },
                    { "x": 100.0, "y": 50.0 },
                    { "x": 200.0, "y": 0.0 }
                ]
            }],
            "dependencyTree": {
                "contours": { "0": { "nodes": { "0": {
                    "x": ["contours.0.nodes.1.x", "anchors.0.x"],
                    "y": ["contours.0.nodes.2.expand.y"],
                    "meta": "ignored"
                } } } }
            }
        }))
        .unwrap()
    }

    #[test]
    fn links_skip_anchors_and_truncate() {
        let glyph = create_test_glyph();
        let item = InteractiveItem::new(
            "contours.0.nodes.0",
            ItemKind::NodeSkeleton,
            ItemData::default(),
        );

        let links = dependency_links(&glyph, &item);
        assert_eq!(
            links,
            vec![
                DependencyLink {
                    from: Point::new(100.0, 50.0),
                    to: Point::ZERO,
                },
                DependencyLink {
                    from: Point::new(200.0, 0.0),
                    to: Point::ZERO,
                },
            ]
        );
    }

    #[test]
    fn links_empty_without_entry() {
        let glyph = create_test_glyph();
        let item = InteractiveItem::new(
            "contours.0.nodes.2",
            ItemKind::NodeSkeleton,
            ItemData::default(),
        );
        assert!(dependency_links(&glyph, &item).is_empty());
    }

    #[test]
    fn property_parent_per_kind() {
        let glyph = create_test_glyph();
        let data = ItemData {
            parent_id: Some(Address::from("contours.0.nodes.0")),
            ..Default::default()
        };

        let skeleton = InteractiveItem::new("contours.0.nodes.1", ItemKind::NodeSkeleton, data.clone());
        let property = node_property(&glyph, &skeleton).unwrap();
        assert_eq!(property.parent, None);

        let contour_node = InteractiveItem::new("contours.0.nodes.1", ItemKind::ContourNode, data);
        let property = node_property(&glyph, &contour_node).unwrap();
        assert_eq!(property.node, json!({ "x": 100.0, "y": 50.0 }));
        assert_eq!(property.parent.unwrap()["expand"]["width"], json!(20.0));

        let contour = InteractiveItem::new("contours.0", ItemKind::GlyphContour, ItemData::default());
        assert!(node_property(&glyph, &contour).is_none());
    }
}
