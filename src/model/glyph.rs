// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Read-only view of a parametric glyph.
//!
//! The glyph is an addressable tree (skeleton contours, on-curve nodes,
//! handle directions and tensions, components, the flattened `otContours`
//! outline and a `dependencyTree`). The canvas only ever reads it: every
//! edit leaves as a change-set for the external dispatcher to apply.
//!
//! Lookups return `None` on any miss (stale address after a model edit,
//! wrong value type). Callers treat that as "skip this step".

use super::address::Address;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A parametric glyph as supplied by the host each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Glyph {
    pub name: String,
    tree: Value,
}

impl Glyph {
    /// Wrap a glyph tree; the name is read from its `name` field
    pub fn from_value(tree: Value) -> Option<Self> {
        let name = tree.get("name")?.as_str()?.to_string();
        Some(Self { name, tree })
    }

    /// Resolve an address to a value
    pub fn get(&self, address: &Address) -> Option<&Value> {
        address
            .segments()
            .try_fold(&self.tree, |value, segment| match value {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?),
                _ => None,
            })
    }

    /// Resolve an address to a number
    pub fn number(&self, address: &Address) -> Option<f64> {
        self.get(address)?.as_f64()
    }

    /// Resolve an address to a point (any object with numeric `x` and `y`)
    pub fn point(&self, address: &Address) -> Option<Point> {
        point_from_value(self.get(address)?)
    }

    /// Dependent addresses recorded for a node in the dependency tree
    ///
    /// Every array under `dependencyTree.<node>` contributes its string
    /// entries; anything else is ignored.
    pub fn dependents(&self, node: &Address) -> Vec<Address> {
        let Some(Value::Object(entries)) = self.get(&Address::from("dependencyTree").field(node.as_str()))
        else {
            return Vec::new();
        };

        entries
            .values()
            .filter_map(Value::as_array)
            .flatten()
            .filter_map(Value::as_str)
            .map(Address::from)
            .collect()
    }

    /// Bounding box of the glyph outline
    ///
    /// Uses the flattened `otContours` when present, otherwise every point
    /// found under the skeleton `contours`.
    pub fn bounding_box(&self) -> Option<Rect> {
        let mut points = Vec::new();
        if let Some(outline) = self.tree.get("otContours") {
            collect_points(outline, &mut points);
        }
        if points.is_empty()
            && let Some(contours) = self.tree.get("contours")
        {
            collect_points(contours, &mut points);
        }

        let (first, rest) = points.split_first()?;
        Some(
            rest.iter()
                .fold(Rect::from_points(*first, *first), |rect, pt| rect.union_pt(*pt)),
        )
    }
}

impl TryFrom<Value> for Glyph {
    type Error = String;

    fn try_from(tree: Value) -> Result<Self, Self::Error> {
        Self::from_value(tree).ok_or_else(|| "glyph tree needs a string `name` field".to_string())
    }
}

impl From<Glyph> for Value {
    fn from(glyph: Glyph) -> Self {
        glyph.tree
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Read `{x, y}` from a value
pub fn point_from_value(value: &Value) -> Option<Point> {
    let x = value.get("x")?.as_f64()?;
    let y = value.get("y")?.as_f64()?;
    Some(Point::new(x, y))
}

fn collect_points(value: &Value, out: &mut Vec<Point>) {
    if let Some(pt) = point_from_value(value) {
        out.push(pt);
        return;
    }
    match value {
        Value::Array(items) => items.iter().for_each(|v| collect_points(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_points(v, out)),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_glyph() -> Glyph {
        Glyph::from_value(json!({
            "name": "a",
            "contours": [{
                "nodes": [
                    { "x": 10.0, "y": 20.0, "baseDirIn": 0.5, "expand": { "width": 40.0 } },
                    { "x": 110.0, "y": 220.0 }
                ]
            }],
            "otContours": [[
                { "x": 0.0, "y": -10.0 },
                { "x": 300.0, "y": 500.0 }
            ]],
            "dependencyTree": {
                "contours": { "0": { "nodes": { "0": {
                    "x": ["contours.0.nodes.1.expand.width", "anchors.0.x"],
                    "note": "ignored"
                }}}}
            }
        }))
        .unwrap()
    }

    #[test]
    fn name_is_required() {
        assert!(Glyph::from_value(json!({ "contours": [] })).is_none());
    }

    #[test]
    fn get_walks_objects_and_arrays() {
        let glyph = create_test_glyph();
        assert_eq!(
            glyph.number(&Address::from("contours.0.nodes.0.baseDirIn")),
            Some(0.5)
        );
        assert_eq!(
            glyph.number(&Address::from("contours.0.nodes.0.expand.width")),
            Some(40.0)
        );
        assert_eq!(
            glyph.point(&Address::from("contours.0.nodes.1")),
            Some(Point::new(110.0, 220.0))
        );
    }

    #[test]
    fn stale_address_is_none() {
        let glyph = create_test_glyph();
        assert!(glyph.get(&Address::from("contours.4.nodes.0")).is_none());
        assert!(glyph.get(&Address::from("contours.x.nodes")).is_none());
        assert!(glyph.point(&Address::from("contours.0")).is_none());
    }

    #[test]
    fn dependents_collects_array_entries() {
        let glyph = create_test_glyph();
        let deps = glyph.dependents(&Address::from("contours.0.nodes.0"));
        assert_eq!(
            deps,
            vec![
                Address::from("contours.0.nodes.1.expand.width"),
                Address::from("anchors.0.x")
            ]
        );
        assert!(glyph.dependents(&Address::from("contours.0.nodes.1")).is_empty());
    }

    #[test]
    fn bounding_box_prefers_outline() {
        let glyph = create_test_glyph();
        assert_eq!(
            glyph.bounding_box(),
            Some(Rect::new(0.0, -10.0, 300.0, 500.0))
        );
    }

    #[test]
    fn bounding_box_falls_back_to_skeleton() {
        let glyph = Glyph::from_value(json!({
            "name": "b",
            "contours": [{ "nodes": [{ "x": 1.0, "y": 2.0 }, { "x": 5.0, "y": -2.0 }] }]
        }))
        .unwrap();
        assert_eq!(glyph.bounding_box(), Some(Rect::new(1.0, -2.0, 5.0, 2.0)));
    }

    #[test]
    fn empty_glyph_has_no_bounding_box() {
        let glyph = Glyph::from_value(json!({ "name": "space" })).unwrap();
        assert!(glyph.bounding_box().is_none());
    }

    #[test]
    fn deserializes_from_json() {
        let glyph: Glyph = serde_json::from_str(r#"{ "name": "c", "contours": [] }"#).unwrap();
        assert_eq!(glyph.name, "c");
    }
}
