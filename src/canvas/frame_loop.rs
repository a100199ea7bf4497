// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Host-owned run loop glue.
//!
//! One [`FrameLoop::tick`] per displayed frame: snapshot input, hit test,
//! advance the machine, dispatch its actions, then clear the frame-scoped
//! input. After [`FrameLoop::teardown`] ticks do nothing.

use super::{CanvasMachine, FrameInput, FrameOutput, UiState};
use crate::editing::{ActionDispatcher, HitTester};
use crate::input::InputSampler;
use crate::model::Glyph;
use std::time::Duration;

pub struct FrameLoop<H, D> {
    machine: CanvasMachine,
    sampler: InputSampler,
    hit_tester: H,
    dispatcher: D,
    running: bool,
}

impl<H: HitTester, D: ActionDispatcher> FrameLoop<H, D> {
    pub fn new(machine: CanvasMachine, hit_tester: H, dispatcher: D) -> Self {
        Self {
            machine,
            sampler: InputSampler::new(),
            hit_tester,
            dispatcher,
            running: true,
        }
    }

    pub fn machine(&self) -> &CanvasMachine {
        &self.machine
    }

    /// Where host events go between ticks
    pub fn sampler_mut(&mut self) -> &mut InputSampler {
        &mut self.sampler
    }

    pub fn hit_tester_mut(&mut self) -> &mut H {
        &mut self.hit_tester
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut D {
        &mut self.dispatcher
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run one frame; `None` once the loop has been torn down
    pub fn tick(&mut self, glyph: Option<&Glyph>, ui: &UiState, now: Duration) -> Option<FrameOutput> {
        if !self.running {
            return None;
        }

        let pointer = self.sampler.pointer_state();
        let keys = self.sampler.key_edges();
        let hot_items = self.hit_tester.hot_items(&pointer);
        let boxed_items = match self.machine.box_origin() {
            Some(origin) => self.hit_tester.boxed_items(origin, &pointer),
            None => Vec::new(),
        };

        let output = self.machine.advance(&FrameInput {
            glyph,
            ui,
            pointer: &pointer,
            keys: &keys,
            hot_items: &hot_items,
            boxed_items: &boxed_items,
            now,
        });

        for action in &output.actions {
            self.dispatcher.dispatch(action.clone());
        }
        self.sampler.end_frame();
        Some(output)
    }

    /// Stop the loop and disarm the double click timer
    pub fn teardown(&mut self) {
        if self.running {
            tracing::info!("Canvas frame loop stopped");
        }
        self.running = false;
        self.machine.disarm_double_click();
    }

    /// Tear down and hand back the dispatcher
    pub fn into_dispatcher(mut self) -> D {
        self.teardown();
        self.dispatcher
    }
}
