// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Camera: pan/zoom transform between design space and canvas space.
//!
//! Canvas space has its origin at the bottom-left of the viewport with y
//! up, so the view transform is a uniform scale plus a translation:
//! `canvas = zoom * world + translation`.

use crate::config::CanvasConfig;
use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Camera {
    pub translation: Vec2,
    pub zoom: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Camera {
    /// Identity camera over a viewport
    pub fn new(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            translation: Vec2::ZERO,
            zoom: 1.0,
            viewport_width,
            viewport_height,
        }
    }

    /// World to canvas transform
    pub fn view_transform(&self) -> Affine {
        Affine::new([
            self.zoom,
            0.0,
            0.0,
            self.zoom,
            self.translation.x,
            self.translation.y,
        ])
    }

    pub fn canvas_to_world(&self, point: Point) -> Point {
        self.view_transform().inverse() * point
    }

    pub fn world_to_canvas(&self, point: Point) -> Point {
        self.view_transform() * point
    }

    /// Pan by a canvas-space delta
    pub fn pan(&mut self, delta: Vec2) {
        self.translation += delta;
    }

    /// Zoom by a wheel delta about the pointer
    ///
    /// The world point under `anchor` stays put. When the result falls
    /// outside the zoom limits the zoom is clamped and the translation is
    /// left unchanged, so the view does not slide at the limits. Returns
    /// whether clamping kicked in.
    pub fn zoom_about(&mut self, anchor: Point, wheel: f64, config: &CanvasConfig) -> bool {
        let focus = self.canvas_to_world(anchor).to_vec2();
        let factor = 1.0 + wheel / config.wheel_zoom_divisor;
        let scale_about_focus =
            Affine::translate(focus) * Affine::scale(factor) * Affine::translate(-focus);
        let [zoom, _, _, _, tx, ty] = (self.view_transform() * scale_about_focus).as_coeffs();

        let clamped = zoom.clamp(config.min_zoom, config.max_zoom);
        if clamped != zoom {
            tracing::debug!("Zoom {:.3} clamped to {:.3}", zoom, clamped);
            self.zoom = clamped;
            return true;
        }

        self.zoom = zoom;
        self.translation = Vec2::new(tx, ty);
        false
    }

    /// Place a world point at the viewport center with the given zoom
    pub fn center_on(&mut self, center: Point, zoom: f64) {
        self.zoom = zoom;
        self.translation =
            Vec2::new(self.viewport_width / 2.0, self.viewport_height / 2.0) - center.to_vec2() * zoom;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
