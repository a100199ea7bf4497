// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Geometric modification engine.
//!
//! Turns a dragged item's captured base geometry and the pointer's world
//! position into a parametric change-set:
//!
//! - handles: direction and tension relative to the ray intersection with
//!   the opposite node's handle ray
//! - on-curve nodes: stroke width factor and angle at the node
//! - skeleton/contour nodes: raw x/y offsets from the base position
//! - distribution: position along a skeleton segment as a fraction
//!
//! Every function here is pure. They read the glyph but never mutate it,
//! and return `None` when an address they need does not resolve.

use super::change_set::ChangeSet;
use super::edit_types::EditType;
use super::item::{HandleSide, InteractiveItem, ItemKind};
use crate::model::Glyph;
use crate::model::glyph::point_from_value;
use crate::settings::modification::{PARALLEL_EPSILON, TENSION_FACTOR};
use kurbo::{Point, Vec2};

/// Which on-curve fields a gesture writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnCurveAxes {
    pub width: bool,
    pub angle: bool,
}

impl OnCurveAxes {
    pub const ALL: OnCurveAxes = OnCurveAxes {
        width: true,
        angle: true,
    };
}

/// Modifier flags that change how a drag is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragModifiers {
    /// Couple the opposite handle's direction
    pub smooth: bool,
    /// Slide skeleton points along their segment
    pub distribution: bool,
}

// ===== Routing =====

/// Compute the change-set for moving `item` to `new_pos`
///
/// Routes by item kind; with the distribution modifier the segment
/// distribution change is folded in on top.
pub fn modify_item(
    glyph: &Glyph,
    item: &InteractiveItem,
    new_pos: Point,
    modifiers: DragModifiers,
    edit_type: EditType,
) -> Option<ChangeSet> {
    let primary = match item.kind {
        ItemKind::NodeIn | ItemKind::NodeOut | ItemKind::ContourNodeIn | ItemKind::ContourNodeOut => {
            handle_modification(glyph, item, new_pos, modifiers.smooth)
        }
        ItemKind::Node => on_curve_modification(glyph, item, new_pos, OnCurveAxes::ALL),
        kind if kind.is_position_node() => skeleton_pos_modification(glyph, item, new_pos),
        _ => None,
    };

    let distribution = if modifiers.distribution {
        skeleton_distr_modification(glyph, item, new_pos)
    } else {
        None
    };

    let mut changes = match (primary, distribution) {
        (Some(mut primary), Some(distribution)) => {
            primary.merge(distribution);
            primary
        }
        (Some(changes), None) | (None, Some(changes)) => changes,
        (None, None) => {
            tracing::debug!("No modification for {} ({:?})", item.id, item.kind);
            return None;
        }
    };
    changes.edit_type = edit_type;
    Some(changes)
}

// ===== Handles =====

/// Intersection of two rays given by origin and angle
///
/// Returns `None` when the rays are (nearly) parallel.
pub fn ray_ray_intersection(p1: Point, angle1: f64, p2: Point, angle2: f64) -> Option<Point> {
    let d1 = Vec2::from_angle(angle1);
    let d2 = Vec2::from_angle(angle2);
    let det = d1.cross(d2);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let t = (p2 - p1).cross(d2) / det;
    Some(p1 + d1 * t)
}

/// Handle drag: new direction and tension for the dragged side
///
/// The handle's parent `P` and pointer `Q` give the new direction (after
/// undoing mirroring). Tension is `|Q - P|` over the distance from `P` to
/// where the new direction meets the opposite node's handle ray, negated
/// once the handle is dragged past that intersection. Parallel rays fall
/// back to the opposite node itself as the reference point.
pub fn handle_modification(
    glyph: &Glyph,
    item: &InteractiveItem,
    new_pos: Point,
    smooth: bool,
) -> Option<ChangeSet> {
    let side = item.kind.handle_side()?;
    let data = &item.data;
    let parent_id = data.parent_id.as_ref()?;
    let parent = glyph.get(parent_id)?;
    let parent_pos = point_from_value(parent)?;
    let other_node = data.other_node?;
    let other_dir = data.other_dir?;

    let raw = new_pos - parent_pos;
    let mirror = data.mirror();
    let vector = Vec2::new(raw.x * mirror.x, raw.y * mirror.y);
    let angle = vector.y.atan2(vector.x);

    let intersection =
        ray_ray_intersection(parent_pos, angle, other_node, other_dir).unwrap_or(other_node);
    let reach = intersection.distance(parent_pos);
    let mut tension = new_pos.distance(parent_pos) / if reach == 0.0 { 1.0 } else { reach };
    if (parent_pos - intersection).dot(new_pos - parent_pos) > 0.0 {
        tension = -tension;
    }

    let suffix = side.suffix();
    let base_dir = parent.get(format!("baseDir{suffix}"))?.as_f64()?;
    let base_tension = parent
        .get(format!("baseTension{suffix}"))
        .and_then(|v| v.as_f64())
        .filter(|t| *t != 0.0)
        .unwrap_or(1.0 / TENSION_FACTOR);

    let mut changes = ChangeSet::new(&glyph.name, EditType::Drag)
        .with(parent_id.field(&format!("dir{suffix}")), angle - base_dir)
        .with(
            parent_id.field(&format!("tension{suffix}")),
            tension / (TENSION_FACTOR * base_tension),
        );

    if smooth {
        couple_opposite_handle(glyph, item, side.opposite(), angle, &mut changes);
    }

    Some(changes)
}

/// Point the opposite handle along the same tangent
fn couple_opposite_handle(
    glyph: &Glyph,
    item: &InteractiveItem,
    opposite: HandleSide,
    angle: f64,
    changes: &mut ChangeSet,
) {
    let Some(parent_id) = item.data.parent_id.as_ref() else {
        return;
    };
    // Plain contour handles hang directly off their parent node
    let node_id = if item.kind.is_contour_handle() {
        Some(parent_id)
    } else {
        item.data.skeleton_id.as_ref()
    };
    let field = format!("baseDir{}", opposite.suffix());
    let base_dir = node_id
        .and_then(|id| glyph.get(id))
        .and_then(|node| node.get(&field))
        .or_else(|| glyph.get(parent_id).and_then(|parent| parent.get(&field)))
        .and_then(|v| v.as_f64());

    match base_dir {
        Some(base_dir) => changes.set(
            parent_id.field(&format!("dir{}", opposite.suffix())),
            angle - base_dir,
        ),
        None => tracing::debug!("No opposite base direction for {}", item.id),
    }
}

// ===== On-curve nodes =====

/// On-curve drag: stroke width factor and angle at the node
///
/// Width is the distance from the opposite on-curve point to the pointer
/// relative to the base width; the angle is measured around the skeleton
/// point.
pub fn on_curve_modification(
    glyph: &Glyph,
    item: &InteractiveItem,
    new_pos: Point,
    axes: OnCurveAxes,
) -> Option<ChangeSet> {
    let data = &item.data;
    let modif = data.modif_address.as_ref()?;
    let mut changes = ChangeSet::new(&glyph.name, EditType::Drag);

    if axes.width {
        let opposite = glyph.point(data.opposite_id.as_ref()?)?;
        let base_width = data.base_width.filter(|w| *w != 0.0).unwrap_or(1.0);
        changes.set(modif.field("width"), opposite.distance(new_pos) / base_width);
    }

    if axes.angle {
        let skeleton = data.skeleton?;
        let base_angle = data.base_angle?;
        let vector = new_pos - skeleton;
        let angle_diff = vector.y.atan2(vector.x) - base_angle;
        changes.set(
            modif.field("angle"),
            angle_diff + data.angle_offset.unwrap_or(0.0),
        );
    }

    Some(changes)
}

// ===== Skeleton nodes =====

/// Skeleton or contour node drag: raw offsets from the base position
pub fn skeleton_pos_modification(
    glyph: &Glyph,
    item: &InteractiveItem,
    new_pos: Point,
) -> Option<ChangeSet> {
    let data = &item.data;
    let modif = data.modif_address.as_ref()?;
    let base = data.base?;
    let offset = new_pos - base;
    let mirror = data.mirror();

    Some(
        ChangeSet::new(&glyph.name, EditType::Drag)
            .with(modif.field("x"), offset.x * mirror.x)
            .with(modif.field("y"), offset.y * mirror.y),
    )
}

/// Distribution drag: slide a point along its skeleton segment
///
/// The pointer is projected onto the segment direction and clamped to
/// `[0, width]`. The change-set holds the distribution fraction relative
/// to the base distribution plus the offset that keeps the point drawn at
/// the projected location.
pub fn skeleton_distr_modification(
    glyph: &Glyph,
    item: &InteractiveItem,
    new_pos: Point,
) -> Option<ChangeSet> {
    let data = &item.data;
    let modif = data.modif_address.as_ref()?;
    let base = data.base?;
    let [start, end] = data.expanded_to?;
    let width = data.width?;
    let base_distr = data.base_distr.unwrap_or(0.0);

    let segment = end - start;
    let length = segment.hypot();
    let direction = if length > 0.0 {
        segment / length
    } else {
        Vec2::ZERO
    };

    let projection = (new_pos - start).dot(direction).max(0.0).min(width.max(0.0));
    let span = if width == 0.0 { 1.0 } else { width };
    let projected = start + direction * projection;
    let offset = projected - base;

    Some(
        ChangeSet::new(&glyph.name, EditType::Drag)
            .with(modif.field("expand.distr"), projection / span - base_distr)
            .with(modif.field("x"), offset.x)
            .with(modif.field("y"), offset.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::item::ItemData;
    use crate::model::Address;
    use serde_json::json;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn create_test_glyph() -> Glyph {
        Glyph::from_value(json!({
            "name": "a",
            "contours": [{
                "nodes": [
                    {
                        "x": 0.0, "y": 0.0,
                        "baseDirIn": 0.0, "baseDirOut": 0.0,
                        "baseTensionIn": 1.0, "baseTensionOut": 1.0,
                        "expand": {
                            "left": { "x": 0.0, "y": 50.0 },
                            "right": { "x": 0.0, "y": -50.0 }
                        }
                    },
                    {
                        "x": 100.0, "y": 100.0,
                        "baseDirIn": FRAC_PI_2, "baseDirOut": FRAC_PI_2
                    }
                ]
            }]
        }))
        .unwrap()
    }

    /// Out handle of node 0, aiming at node 1 which points straight up.
    fn out_handle() -> InteractiveItem {
        InteractiveItem::new(
            "contours.0.nodes.0.handleOut",
            ItemKind::NodeOut,
            ItemData {
                parent_id: Some(Address::from("contours.0.nodes.0")),
                skeleton_id: Some(Address::from("contours.0.nodes.0")),
                other_node: Some(Point::new(100.0, 100.0)),
                other_dir: Some(-FRAC_PI_2),
                ..ItemData::default()
            },
        )
    }

    fn skeleton_node() -> InteractiveItem {
        InteractiveItem::new(
            "contours.0.nodes.1",
            ItemKind::NodeSkeleton,
            ItemData {
                modif_address: Some(Address::from("contours.0.nodes.1.")),
                base: Some(Point::new(100.0, 100.0)),
                ..ItemData::default()
            },
        )
    }

    #[test]
    fn rays_intersect() {
        let hit = ray_ray_intersection(Point::ZERO, 0.0, Point::new(100.0, 100.0), -FRAC_PI_2)
            .unwrap();
        assert!((hit.x - 100.0).abs() < EPS);
        assert!(hit.y.abs() < EPS);
    }

    #[test]
    fn parallel_rays_do_not_intersect() {
        assert!(ray_ray_intersection(Point::ZERO, 0.0, Point::new(0.0, 10.0), 0.0).is_none());
        assert!(ray_ray_intersection(Point::ZERO, 0.0, Point::new(0.0, 10.0), PI).is_none());
    }

    #[test]
    fn handle_direction_and_tension() {
        let glyph = create_test_glyph();
        // Drag the handle halfway toward the intersection at (100, 0)
        let changes = handle_modification(&glyph, &out_handle(), Point::new(50.0, 0.0), false)
            .unwrap();

        let dir = changes.get("contours.0.nodes.0.dirOut").unwrap().unwrap();
        let tension = changes.get("contours.0.nodes.0.tensionOut").unwrap().unwrap();
        assert!(dir.abs() < EPS);
        // 0.5 / (0.6 * 1.0)
        assert!((tension - 0.5 / 0.6).abs() < 1e-9);
        assert_eq!(changes.glyph_name, "a");
        assert_eq!(changes.len(), 2);
    }

    #[test]
    fn handle_tension_flips_past_intersection() {
        let glyph = create_test_glyph();
        let item = out_handle();
        // Same direction as the intersection
        let toward = handle_modification(&glyph, &item, Point::new(50.0, 0.0), false).unwrap();
        // Opposite side of the parent from the intersection
        let away = handle_modification(&glyph, &item, Point::new(-50.0, 0.0), false).unwrap();

        let t_toward = toward.get("contours.0.nodes.0.tensionOut").unwrap().unwrap();
        let t_away = away.get("contours.0.nodes.0.tensionOut").unwrap().unwrap();
        assert!(t_toward > 0.0);
        assert!(t_away < 0.0);
    }

    #[test]
    fn handle_mirroring_flips_axis() {
        let glyph = create_test_glyph();
        let mut item = out_handle();
        item.data.transforms = vec!["scaleX".to_string()];
        let changes = handle_modification(&glyph, &item, Point::new(-50.0, 0.0), false).unwrap();
        // Mirrored back onto the +x axis
        let dir = changes.get("contours.0.nodes.0.dirOut").unwrap().unwrap();
        assert!(dir.abs() < EPS);
    }

    #[test]
    fn handle_on_parent_stays_finite() {
        let glyph = create_test_glyph();
        let changes = handle_modification(&glyph, &out_handle(), Point::ZERO, false).unwrap();
        let tension = changes.get("contours.0.nodes.0.tensionOut").unwrap().unwrap();
        assert!(tension.is_finite());
        assert_eq!(tension, 0.0);
    }

    #[test]
    fn handle_parallel_rays_use_opposite_node() {
        let glyph = create_test_glyph();
        let mut item = out_handle();
        item.data.other_dir = Some(0.0);
        item.data.other_node = Some(Point::new(100.0, 0.0));
        let changes = handle_modification(&glyph, &item, Point::new(50.0, 0.0), false).unwrap();
        let tension = changes.get("contours.0.nodes.0.tensionOut").unwrap().unwrap();
        assert!((tension - 0.5 / 0.6).abs() < 1e-9);
    }

    #[test]
    fn smooth_couples_opposite_direction() {
        let glyph = create_test_glyph();
        let changes = handle_modification(&glyph, &out_handle(), Point::new(0.0, 50.0), true)
            .unwrap();
        let dir_in = changes.get("contours.0.nodes.0.dirIn").unwrap().unwrap();
        assert!((dir_in - FRAC_PI_2).abs() < EPS);
        assert_eq!(changes.len(), 3);
    }

    #[test]
    fn handle_with_stale_parent_is_skipped() {
        let glyph = create_test_glyph();
        let mut item = out_handle();
        item.data.parent_id = Some(Address::from("contours.9.nodes.0"));
        assert!(handle_modification(&glyph, &item, Point::new(1.0, 1.0), false).is_none());
    }

    #[test]
    fn on_curve_width_and_angle() {
        let glyph = create_test_glyph();
        let item = InteractiveItem::new(
            "contours.0.nodes.0.expand.left",
            ItemKind::Node,
            ItemData {
                parent_id: Some(Address::from("contours.0.nodes.0")),
                opposite_id: Some(Address::from("contours.0.nodes.0.expand.right")),
                modif_address: Some(Address::from("contours.0.nodes.0.expand")),
                base_width: Some(100.0),
                base_angle: Some(FRAC_PI_2),
                skeleton: Some(Point::ZERO),
                angle_offset: Some(0.25),
                ..ItemData::default()
            },
        );
        let changes =
            on_curve_modification(&glyph, &item, Point::new(0.0, 150.0), OnCurveAxes::ALL).unwrap();
        let width = changes.get("contours.0.nodes.0.expand.width").unwrap().unwrap();
        let angle = changes.get("contours.0.nodes.0.expand.angle").unwrap().unwrap();
        assert!((width - 2.0).abs() < EPS);
        assert!((angle - 0.25).abs() < EPS);

        let width_only = on_curve_modification(
            &glyph,
            &item,
            Point::new(0.0, 150.0),
            OnCurveAxes {
                width: true,
                angle: false,
            },
        )
        .unwrap();
        assert_eq!(width_only.len(), 1);
    }

    #[test]
    fn skeleton_offset() {
        let glyph = create_test_glyph();
        let changes =
            skeleton_pos_modification(&glyph, &skeleton_node(), Point::new(103.0, 96.0)).unwrap();
        assert_eq!(changes.get("contours.0.nodes.1.x"), Some(Some(3.0)));
        assert_eq!(changes.get("contours.0.nodes.1.y"), Some(Some(-4.0)));
    }

    #[test]
    fn skeleton_offset_mirrored() {
        let glyph = create_test_glyph();
        let mut item = skeleton_node();
        item.data.transforms = vec!["scaleY".to_string()];
        let changes = skeleton_pos_modification(&glyph, &item, Point::new(103.0, 96.0)).unwrap();
        assert_eq!(changes.get("contours.0.nodes.1.x"), Some(Some(3.0)));
        assert_eq!(changes.get("contours.0.nodes.1.y"), Some(Some(4.0)));
    }

    fn distributed_node() -> InteractiveItem {
        let mut item = skeleton_node();
        item.data.base = Some(Point::new(25.0, 0.0));
        item.data.expanded_to = Some([Point::ZERO, Point::new(100.0, 0.0)]);
        item.data.width = Some(100.0);
        item.data.base_distr = Some(0.25);
        item
    }

    #[test]
    fn distribution_projects_onto_segment() {
        let glyph = create_test_glyph();
        let changes =
            skeleton_distr_modification(&glyph, &distributed_node(), Point::new(75.0, 30.0))
                .unwrap();
        let distr = changes.get("contours.0.nodes.1.expand.distr").unwrap().unwrap();
        assert!((distr - 0.5).abs() < EPS);
        assert_eq!(changes.get("contours.0.nodes.1.x"), Some(Some(50.0)));
        assert_eq!(changes.get("contours.0.nodes.1.y"), Some(Some(0.0)));
    }

    #[test]
    fn distribution_clamps_to_segment() {
        let glyph = create_test_glyph();
        let before = skeleton_distr_modification(&glyph, &distributed_node(), Point::new(-40.0, 0.0))
            .unwrap();
        assert_eq!(
            before.get("contours.0.nodes.1.expand.distr"),
            Some(Some(-0.25))
        );
        let after = skeleton_distr_modification(&glyph, &distributed_node(), Point::new(400.0, 0.0))
            .unwrap();
        assert_eq!(after.get("contours.0.nodes.1.expand.distr"), Some(Some(0.75)));
    }

    #[test]
    fn distribution_degenerate_segment_is_finite() {
        let glyph = create_test_glyph();
        let mut item = distributed_node();
        item.data.expanded_to = Some([Point::ZERO, Point::ZERO]);
        item.data.width = Some(0.0);
        let changes = skeleton_distr_modification(&glyph, &item, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(changes.len(), 3);
        assert!(changes.changes.values().all(|v| v.unwrap().is_finite()));
    }

    #[test]
    fn modify_item_merges_distribution() {
        let glyph = create_test_glyph();
        let modifiers = DragModifiers {
            smooth: false,
            distribution: true,
        };
        let changes = modify_item(
            &glyph,
            &distributed_node(),
            Point::new(75.0, 30.0),
            modifiers,
            EditType::NudgeRight,
        )
        .unwrap();
        assert_eq!(changes.edit_type, EditType::NudgeRight);
        // Distribution offsets win over the raw position offsets
        assert_eq!(changes.get("contours.0.nodes.1.y"), Some(Some(0.0)));
        assert!(changes.get("contours.0.nodes.1.expand.distr").is_some());
    }

    #[test]
    fn modify_item_offsets_contour_node() {
        let glyph = create_test_glyph();
        let mut item = skeleton_node();
        item.kind = ItemKind::ContourNode;
        let changes = modify_item(
            &glyph,
            &item,
            Point::new(103.0, 96.0),
            DragModifiers::default(),
            EditType::Drag,
        )
        .unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(changes.get("contours.0.nodes.1.x"), Some(Some(3.0)));
        assert_eq!(changes.get("contours.0.nodes.1.y"), Some(Some(-4.0)));
    }

    #[test]
    fn modify_item_ignores_contours() {
        let glyph = create_test_glyph();
        let item = InteractiveItem::new("contours.0", ItemKind::GlyphContour, ItemData::default());
        assert!(
            modify_item(
                &glyph,
                &item,
                Point::ZERO,
                DragModifiers::default(),
                EditType::Drag
            )
            .is_none()
        );
    }
}
