// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Headless replay of scripted canvas sessions.
//!
//! A script holds the glyphs, the starting UI state and a list of frames.
//! Each frame carries raw input events and the hit-test results the
//! renderer would have produced. The replay drives a [`FrameLoop`] through
//! them and plays the part of the host store: `store-value` actions are
//! written back into the UI state, and frames can switch glyph or mode.

use crate::canvas::{CanvasMachine, CanvasMode, FrameLoop, SubState, UiState};
use crate::config::CanvasConfig;
use crate::editing::{Action, Camera, InteractiveItem, RecordingDispatcher, StaticHitTester};
use crate::error::CanvasError;
use crate::input::InputEvent;
use crate::model::{Address, Glyph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

/// A scripted session
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayScript {
    pub glyphs: Vec<Glyph>,
    /// Glyph loaded at the start; none means frames are no-ops until a
    /// frame switches to one
    #[serde(default)]
    pub glyph: Option<String>,
    #[serde(default)]
    pub ui: UiState,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub config: Option<CanvasConfig>,
    pub frames: Vec<ScriptFrame>,
}

/// One frame of a script
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScriptFrame {
    /// Frame time in milliseconds since the session started
    pub at_ms: u64,
    pub events: Vec<InputEvent>,
    pub hot: Vec<InteractiveItem>,
    pub boxed: Vec<InteractiveItem>,
    /// Switch the loaded glyph before this frame
    pub glyph: Option<String>,
    /// Switch the UI canvas mode before this frame
    pub canvas_mode: Option<CanvasMode>,
}

/// What a replay produced
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub actions: Vec<Action>,
    pub mode: CanvasMode,
    pub sub_state: SubState,
    pub selection: Vec<Address>,
    pub camera: Camera,
    pub frames: usize,
}

impl ReplayScript {
    pub fn from_json_str(text: &str) -> Result<Self, CanvasError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CanvasError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| CanvasError::io(path, e))?;
        let script = Self::from_json_str(&text)?;
        tracing::info!(
            "Loaded script {} ({} glyphs, {} frames)",
            path.display(),
            script.glyphs.len(),
            script.frames.len()
        );
        Ok(script)
    }

    /// Replay every frame
    ///
    /// `config` overrides the script's own configuration.
    pub fn run(&self, config: Option<CanvasConfig>) -> Result<ReplayReport, CanvasError> {
        let glyphs: HashMap<&str, &Glyph> = self
            .glyphs
            .iter()
            .map(|glyph| (glyph.name.as_str(), glyph))
            .collect();
        let lookup = |name: &str| {
            glyphs
                .get(name)
                .copied()
                .ok_or_else(|| CanvasError::MissingGlyph(name.to_string()))
        };

        let config = config
            .or_else(|| self.config.clone().map(CanvasConfig::sanitized))
            .unwrap_or_default();
        let camera = Camera::new(self.viewport.width, self.viewport.height);
        let mut frame_loop = FrameLoop::new(
            CanvasMachine::new(config, camera),
            StaticHitTester::default(),
            RecordingDispatcher::new(),
        );

        let mut ui = self.ui.clone();
        let mut glyph = self.glyph.as_deref().map(lookup).transpose()?;
        let mut last = None;

        for frame in &self.frames {
            if let Some(name) = &frame.glyph {
                glyph = Some(lookup(name)?);
            }
            if let Some(mode) = frame.canvas_mode {
                ui.canvas_mode = mode;
            }

            for event in &frame.events {
                frame_loop.sampler_mut().apply(*event);
            }
            *frame_loop.hit_tester_mut() =
                StaticHitTester::new(frame.hot.clone(), frame.boxed.clone());

            let Some(output) = frame_loop.tick(glyph, &ui, Duration::from_millis(frame.at_ms))
            else {
                break;
            };

            for action in &output.actions {
                if let Action::StoreValue { canvas_mode } = action {
                    ui.canvas_mode = *canvas_mode;
                }
            }
            last = Some(output);
        }

        let (mode, sub_state, selection) = match &last {
            Some(output) => (
                output.mode,
                output.sub_state,
                output.selection.iter().map(|item| item.id.clone()).collect(),
            ),
            None => (CanvasMode::default(), SubState::default(), Vec::new()),
        };
        let camera = *frame_loop.machine().camera();

        Ok(ReplayReport {
            actions: frame_loop.into_dispatcher().take(),
            mode,
            sub_state,
            selection,
            camera,
            frames: self.frames.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::PrimaryState;

    const SCRIPT: &str = r#"{
        "glyphs": [
            {
                "name": "a",
                "contours": [{ "nodes": [{ "x": 10.0, "y": 20.0 }] }]
            },
            { "name": "b", "contours": [] }
        ],
        "glyph": "a",
        "ui": { "canvasMode": "select-points" },
        "viewport": { "width": 800.0, "height": 600.0 },
        "frames": [
            { "atMs": 0, "events": [{ "type": "pointer-down" }] },
            {
                "atMs": 500,
                "events": [
                    { "type": "pointer-move", "x": 40.0, "y": 40.0 },
                    { "type": "pointer-up" }
                ],
                "boxed": [{
                    "id": "contours.0.nodes.0",
                    "type": "NODE_SKELETON",
                    "data": { "modifAddress": "contours.0.nodes.0.", "base": { "x": 10.0, "y": 20.0 } }
                }]
            },
            { "atMs": 600, "events": [{ "type": "key-down", "code": 38 }] },
            { "atMs": 700, "events": [{ "type": "key-down", "code": 32 }] },
            { "atMs": 800, "events": [{ "type": "key-up", "code": 32 }] }
        ]
    }"#;

    #[test]
    fn replays_box_select_and_nudge() {
        let script = ReplayScript::from_json_str(SCRIPT).unwrap();
        let report = script.run(None).unwrap();

        let names: Vec<&str> = report.actions.iter().map(Action::name).collect();
        assert_eq!(
            names,
            vec!["change-glyph-node-manually", "store-value", "store-value"]
        );
        let changes = report.actions[0].change_set().unwrap();
        assert_eq!(changes.get("contours.0.nodes.0.x"), Some(Some(0.0)));
        assert_eq!(changes.get("contours.0.nodes.0.y"), Some(Some(1.0)));

        assert_eq!(report.mode, CanvasMode::SelectPoints);
        assert_eq!(report.sub_state.primary, PrimaryState::PointsSelected);
        assert_eq!(report.selection, vec![Address::from("contours.0.nodes.0")]);
        assert_eq!(report.frames, 5);
    }

    #[test]
    fn unknown_glyph_is_an_error() {
        let mut script = ReplayScript::from_json_str(SCRIPT).unwrap();
        script.frames[1].glyph = Some("zz".to_string());
        let err = script.run(None).unwrap_err();
        assert!(matches!(err, CanvasError::MissingGlyph(ref name) if name == "zz"));
    }

    #[test]
    fn no_glyph_dispatches_nothing() {
        let mut script = ReplayScript::from_json_str(SCRIPT).unwrap();
        script.glyph = None;
        let report = script.run(None).unwrap();
        assert!(report.actions.is_empty());
        assert_eq!(report.sub_state.primary, PrimaryState::Default);
    }

    #[test]
    fn malformed_script_is_rejected() {
        let err = ReplayScript::from_json_str(r#"{ "glyphs": [{ "contours": [] }], "frames": [] }"#)
            .unwrap_err();
        assert!(matches!(err, CanvasError::Script(_)));
    }
}
