// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! The per-frame interaction state machine.
//!
//! [`CanvasMachine::advance`] takes one frame of input (glyph, UI state,
//! pointer, key edges, hit-test results, time) and returns the resulting
//! mode, sub-state, selection, actions and camera. All state lives in
//! explicit fields on the machine, so the same sequence of frames always
//! produces the same outputs.
//!
//! Per frame, in order:
//!
//! 1. glyph switch / space override / UI mode resolution
//! 2. double click (re-centers and skips mode handling)
//! 3. mode handling (Move, SelectPoints table, Components hover)
//! 4. modifier flags
//! 5. Escape resets
//! 6. camera pan/zoom
//! 7. drag and nudge change-sets
//! 8. overlay

mod components;
pub mod frame_loop;
mod keyboard;
pub mod overlay;
mod select_points;
pub mod state;

pub use frame_loop::FrameLoop;
pub use overlay::Overlay;
pub use state::{CanvasMode, Modifiers, PrimaryState, SubState, UiState};

use crate::config::CanvasConfig;
use crate::editing::{
    Action, Camera, ContourSelection, DragModifiers, EditType, InteractiveItem, Selection,
    modification,
};
use crate::input::{KeyEdges, PointerState};
use crate::model::Glyph;
use crate::settings::keys;
use kurbo::{Point, Rect};
use std::time::Duration;

/// Everything the machine sees in one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Loaded glyph; `None` makes the frame a no-op
    pub glyph: Option<&'a Glyph>,
    pub ui: &'a UiState,
    pub pointer: &'a PointerState,
    pub keys: &'a KeyEdges,
    /// Items under the pointer, topmost first
    pub hot_items: &'a [InteractiveItem],
    /// Items inside the selection box (empty unless box selecting)
    pub boxed_items: &'a [InteractiveItem],
    /// Monotonic time since the host started
    pub now: Duration,
}

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub mode: CanvasMode,
    pub sub_state: SubState,
    pub selection: Selection,
    /// Actions in dispatch order
    pub actions: Vec<Action>,
    /// New camera, when it changed this frame
    pub camera: Option<Camera>,
    pub overlay: Overlay,
}

/// State saved while the space bar forces Move mode
#[derive(Debug, Clone)]
struct HeldMode {
    mode: CanvasMode,
    primary: PrimaryState,
    selection: Selection,
    contour: ContourSelection,
    box_origin: Option<Point>,
}

/// Hovered component and how long its menu has been open
#[derive(Debug, Clone, Default)]
struct ComponentHover {
    id: Option<String>,
    frames: u32,
}

impl ComponentHover {
    fn reset(&mut self) {
        self.id = None;
        self.frames = 0;
    }
}

/// The canvas interaction state machine
#[derive(Debug, Clone)]
pub struct CanvasMachine {
    config: CanvasConfig,
    camera: Camera,
    mode: CanvasMode,
    primary: PrimaryState,
    modifiers: Modifiers,
    selection: Selection,
    contour: ContourSelection,
    /// Canvas-space pointer position where box selection started
    box_origin: Option<Point>,
    /// Pointer moved since the contour drag began
    contour_dragged: bool,
    held_mode: Option<HeldMode>,
    /// Mode restored from an override whose `store-value` the UI has not
    /// reflected yet
    pending_mode: Option<CanvasMode>,
    /// UI mode seen last frame
    ui_mode: Option<CanvasMode>,
    hover: ComponentHover,
    /// Time of the pointer-down that armed the double click
    click_armed_at: Option<Duration>,
    glyph_name: Option<String>,
}

impl CanvasMachine {
    pub fn new(config: CanvasConfig, camera: Camera) -> Self {
        Self {
            config,
            camera,
            mode: CanvasMode::default(),
            primary: PrimaryState::default(),
            modifiers: Modifiers::default(),
            selection: Selection::new(),
            contour: ContourSelection::default(),
            box_origin: None,
            contour_dragged: false,
            held_mode: None,
            pending_mode: None,
            ui_mode: None,
            hover: ComponentHover::default(),
            click_armed_at: None,
            glyph_name: None,
        }
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn mode(&self) -> CanvasMode {
        self.mode
    }

    pub fn sub_state(&self) -> SubState {
        SubState {
            primary: self.primary,
            modifiers: self.modifiers,
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn contour_selection(&self) -> &ContourSelection {
        &self.contour
    }

    /// Where the current box selection started, if one is in progress
    pub fn box_origin(&self) -> Option<Point> {
        self.box_origin
    }

    /// Forget a pending double click
    pub fn disarm_double_click(&mut self) {
        self.click_armed_at = None;
    }

    /// Run one frame
    pub fn advance(&mut self, input: &FrameInput<'_>) -> FrameOutput {
        let mut actions = Vec::new();
        let mut overlay = Overlay::default();

        let Some(glyph) = input.glyph else {
            return self.output(actions, None, overlay);
        };

        let camera_before = self.camera;
        self.track_glyph(glyph);
        self.mode = self.resolve_mode(input, &mut actions);

        let double_click = self.double_click(input, glyph);
        if !double_click {
            match self.mode {
                CanvasMode::Move => self.reset_to_default(),
                CanvasMode::SelectPoints => self.select_points(input),
                CanvasMode::Components => {
                    self.components(input, glyph, &mut actions, &mut overlay)
                }
            }
        }

        let pointer = input.pointer;
        self.modifiers = Modifiers {
            zooming: pointer.is_wheeling(),
            moving: !double_click && self.mode == CanvasMode::Move && pointer.is_down(),
            smooth: input.keys.is_held(self.config.keys.smooth),
            skeleton_distr: input.keys.is_held(self.config.keys.distribution),
        };

        if self.primary.accepts_keyboard_edits() && input.keys.pressed(keys::ESCAPE) {
            self.reset_selected(glyph, &mut actions);
        }

        if self.modifiers.moving {
            self.camera.pan(pointer.delta);
        } else if self.modifiers.zooming {
            self.camera
                .zoom_about(pointer.position, pointer.wheel, &self.config);
        }

        if self.primary.is_dragging() {
            self.drag_selected(input, glyph, &mut actions);
        } else if self.primary.accepts_keyboard_edits()
            && let Some(arrow) = input.keys.arrow()
        {
            self.nudge_selected(glyph, arrow, &mut actions);
        }

        self.fill_overlay(input, glyph, &mut overlay);

        let camera = (self.camera != camera_before).then_some(self.camera);
        self.output(actions, camera, overlay)
    }

    fn output(
        &self,
        actions: Vec<Action>,
        camera: Option<Camera>,
        overlay: Overlay,
    ) -> FrameOutput {
        FrameOutput {
            mode: self.mode,
            sub_state: self.sub_state(),
            selection: self.selection.clone(),
            actions,
            camera,
            overlay,
        }
    }

    // ===== Mode resolution =====

    fn track_glyph(&mut self, glyph: &Glyph) {
        if self.glyph_name.as_deref() == Some(glyph.name.as_str()) {
            return;
        }
        if let Some(previous) = self.glyph_name.replace(glyph.name.clone()) {
            tracing::info!("Glyph switched from '{}' to '{}'", previous, glyph.name);
            self.reset_to_default();
            self.hover.reset();
            // Only the overridden mode carries over to the new glyph
            if let Some(held) = self.held_mode.as_mut() {
                held.primary = PrimaryState::Default;
                held.selection = Selection::new();
                held.contour = ContourSelection::default();
                held.box_origin = None;
            }
        }
    }

    fn resolve_mode(&mut self, input: &FrameInput<'_>, actions: &mut Vec<Action>) -> CanvasMode {
        let ui_mode = input.ui.canvas_mode;

        if input.keys.pressed(keys::SPACE) && self.held_mode.is_none() {
            let saved = self.held_mode.insert(HeldMode {
                mode: self.ui_mode.unwrap_or(ui_mode),
                primary: self.primary,
                selection: std::mem::take(&mut self.selection),
                contour: std::mem::take(&mut self.contour),
                box_origin: self.box_origin.take(),
            });
            tracing::info!("Space held: {} -> move", saved.mode.as_str());
            actions.push(Action::StoreValue {
                canvas_mode: CanvasMode::Move,
            });
        }
        // A tap can press and release within the same frame
        if input.keys.released(keys::SPACE)
            && let Some(saved) = self.held_mode.take()
        {
            tracing::info!("Space released: back to {}", saved.mode.as_str());
            self.primary = saved.primary;
            self.selection = saved.selection;
            self.contour = saved.contour;
            self.box_origin = saved.box_origin;
            self.ui_mode = Some(saved.mode);
            self.pending_mode = Some(saved.mode);
            actions.push(Action::StoreValue {
                canvas_mode: saved.mode,
            });
        }

        if self.held_mode.is_some() {
            return CanvasMode::Move;
        }

        // The UI catches up with a restored mode a frame or more later
        if let Some(pending) = self.pending_mode {
            if ui_mode == pending {
                self.pending_mode = None;
            } else if ui_mode == CanvasMode::Move {
                return pending;
            } else {
                self.pending_mode = None;
            }
        }

        if self.ui_mode.is_some_and(|previous| previous != ui_mode) {
            tracing::debug!("UI mode changed to {}", ui_mode.as_str());
            self.reset_to_default();
            self.hover.reset();
        }
        self.ui_mode = Some(ui_mode);
        ui_mode
    }

    /// Default state with nothing selected
    fn reset_to_default(&mut self) {
        if self.primary != PrimaryState::Default {
            tracing::debug!("{:?} -> Default", self.primary);
        }
        self.primary = PrimaryState::Default;
        self.selection.clear();
        self.contour.clear();
        self.box_origin = None;
    }

    /// Re-center on a second pointer-down inside the double click window
    fn double_click(&mut self, input: &FrameInput<'_>, glyph: &Glyph) -> bool {
        if !input.pointer.pressed() {
            return false;
        }

        let window = self.config.double_click_window();
        match self.click_armed_at {
            Some(armed_at) if input.now.saturating_sub(armed_at) < window => {
                if let Some(bounds) = glyph.bounding_box() {
                    tracing::debug!("Double click: centering on {:?}", bounds.center());
                    self.camera
                        .center_on(bounds.center(), self.config.recenter_zoom);
                }
                true
            }
            _ => {
                self.click_armed_at = Some(input.now);
                false
            }
        }
    }

    // ===== Interactions =====

    fn drag_modifiers(&self) -> DragModifiers {
        DragModifiers {
            smooth: self.modifiers.smooth,
            distribution: self.modifiers.skeleton_distr,
        }
    }

    /// Route the pointer's design-space position through every selected item
    fn drag_selected(&mut self, input: &FrameInput<'_>, glyph: &Glyph, actions: &mut Vec<Action>) {
        if input.pointer.delta != kurbo::Vec2::ZERO {
            self.contour_dragged = true;
        }

        let target = self.camera.canvas_to_world(input.pointer.position);
        let modifiers = self.drag_modifiers();
        actions.extend(
            self.selection
                .iter()
                .filter_map(|item| {
                    modification::modify_item(glyph, item, target, modifiers, EditType::Drag)
                })
                .map(Action::ChangeGlyphNodeManually),
        );
    }

    // ===== Overlay =====

    fn fill_overlay(&self, input: &FrameInput<'_>, glyph: &Glyph, overlay: &mut Overlay) {
        if self.primary == PrimaryState::BoxSelecting
            && let Some(origin) = self.box_origin
        {
            overlay.selection_box = Some(Rect::from_points(
                self.camera.canvas_to_world(origin),
                self.camera.canvas_to_world(input.pointer.position),
            ));
        }

        if self.primary.shows_contour() {
            overlay.selected_contour = self.contour.current().cloned();
        }

        if input.ui.show_dependencies
            && self.primary.is_single_point()
            && let Some(item) = self.selection.single_item()
        {
            overlay.dependencies = overlay::dependency_links(glyph, item);
        }

        overlay.property = self
            .selection
            .single_item()
            .and_then(|item| overlay::node_property(glyph, item));
    }
}

impl Default for CanvasMachine {
    fn default() -> Self {
        Self::new(CanvasConfig::default(), Camera::default())
    }
}
