// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Input sampling.
//!
//! The host feeds raw events into an [`InputSampler`] as they arrive. Once
//! per frame the canvas reads a [`PointerState`] and [`KeyEdges`] snapshot,
//! and the owner clears the frame-scoped parts (edges, delta, wheel) after
//! the step.

pub mod keyboard;
pub mod pointer;

pub use keyboard::{Arrow, KeyEdges};
pub use pointer::{ButtonState, PointerEdge, PointerState};

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A raw input event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    PointerMove { x: f64, y: f64 },
    PointerDown,
    PointerUp,
    Wheel { delta: f64 },
    KeyDown { code: u32 },
    KeyUp { code: u32 },
}

/// Accumulates host events between frames
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    pointer: PointerState,
    keys: KeyEdges,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer_moved(Point::new(x, y)),
            InputEvent::PointerDown => self.pointer_down(),
            InputEvent::PointerUp => self.pointer_up(),
            InputEvent::Wheel { delta } => self.wheel(delta),
            InputEvent::KeyDown { code } => self.key_down(code),
            InputEvent::KeyUp { code } => self.key_up(code),
        }
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer.delta += position - self.pointer.position;
        self.pointer.position = position;
    }

    pub fn pointer_down(&mut self) {
        if self.pointer.button == ButtonState::Up {
            self.pointer.button = ButtonState::Down;
            self.pointer.edge = PointerEdge::Down;
        }
    }

    pub fn pointer_up(&mut self) {
        if self.pointer.button == ButtonState::Down {
            self.pointer.button = ButtonState::Up;
            self.pointer.edge = PointerEdge::Up;
        }
    }

    pub fn wheel(&mut self, delta: f64) {
        self.pointer.wheel += delta;
    }

    /// Key went down; auto-repeat of a held key produces no new edge
    pub fn key_down(&mut self, code: u32) {
        if self.keys.held.insert(code) {
            self.keys.pressed = Some(code);
        }
    }

    pub fn key_up(&mut self, code: u32) {
        if self.keys.held.remove(&code) {
            self.keys.released = Some(code);
        }
    }

    pub fn pointer_state(&self) -> PointerState {
        self.pointer
    }

    pub fn key_edges(&self) -> KeyEdges {
        self.keys.clone()
    }

    pub fn clear_key_edges(&mut self) {
        self.keys.pressed = None;
        self.keys.released = None;
    }

    pub fn clear_pointer_edges(&mut self) {
        self.pointer.edge = PointerEdge::None;
    }

    pub fn clear_frame_delta(&mut self) {
        self.pointer.delta = kurbo::Vec2::ZERO;
    }

    pub fn clear_wheel_delta(&mut self) {
        self.pointer.wheel = 0.0;
    }

    /// Clear everything that is only valid for one frame
    pub fn end_frame(&mut self) {
        self.clear_key_edges();
        self.clear_pointer_edges();
        self.clear_frame_delta();
        self.clear_wheel_delta();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn delta_accumulates_within_frame() {
        let mut sampler = InputSampler::new();
        sampler.pointer_moved(Point::new(10.0, 0.0));
        sampler.pointer_moved(Point::new(15.0, 5.0));
        let pointer = sampler.pointer_state();
        assert_eq!(pointer.position, Point::new(15.0, 5.0));
        assert_eq!(pointer.delta, Vec2::new(15.0, 5.0));

        sampler.end_frame();
        assert_eq!(sampler.pointer_state().delta, Vec2::ZERO);
        assert_eq!(sampler.pointer_state().position, Point::new(15.0, 5.0));
    }

    #[test]
    fn button_edges() {
        let mut sampler = InputSampler::new();
        sampler.pointer_down();
        assert!(sampler.pointer_state().pressed());
        assert!(sampler.pointer_state().is_down());

        sampler.end_frame();
        assert!(!sampler.pointer_state().pressed());
        assert!(sampler.pointer_state().is_down());

        sampler.pointer_up();
        assert!(sampler.pointer_state().released());
        assert!(!sampler.pointer_state().is_down());
    }

    #[test]
    fn repeated_down_has_single_edge() {
        let mut sampler = InputSampler::new();
        sampler.pointer_down();
        sampler.end_frame();
        sampler.pointer_down();
        assert_eq!(sampler.pointer_state().edge, PointerEdge::None);
    }

    #[test]
    fn held_keys_survive_frame_clear() {
        let mut sampler = InputSampler::new();
        sampler.key_down(16);
        assert!(sampler.key_edges().pressed(16));

        sampler.end_frame();
        let keys = sampler.key_edges();
        assert_eq!(keys.pressed, None);
        assert!(keys.is_held(16));

        // Auto-repeat does not re-fire the edge
        sampler.key_down(16);
        assert_eq!(sampler.key_edges().pressed, None);

        sampler.key_up(16);
        let keys = sampler.key_edges();
        assert!(keys.released(16));
        assert!(!keys.is_held(16));
    }

    #[test]
    fn wheel_clears() {
        let mut sampler = InputSampler::new();
        sampler.apply(InputEvent::Wheel { delta: 120.0 });
        sampler.apply(InputEvent::Wheel { delta: -20.0 });
        assert_eq!(sampler.pointer_state().wheel, 100.0);
        sampler.clear_wheel_delta();
        assert!(!sampler.pointer_state().is_wheeling());
    }

    #[test]
    fn events_deserialize() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[{"type":"pointer-move","x":1.0,"y":2.0},{"type":"pointer-down"},{"type":"key-down","code":32}]"#,
        )
        .unwrap();
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMove { x: 1.0, y: 2.0 },
                InputEvent::PointerDown,
                InputEvent::KeyDown { code: 32 }
            ]
        );
    }
}
