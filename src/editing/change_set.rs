// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Change-sets and the actions sent to the external dispatcher.
//!
//! A change-set maps glyph addresses to new values and is the only way the
//! canvas affects the glyph. A `None` value means "clear this field".

use super::edit_types::EditType;
use crate::canvas::CanvasMode;
use crate::model::Address;
use serde::Serialize;
use std::collections::BTreeMap;

/// Parametric changes for one glyph
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeSet {
    pub changes: BTreeMap<Address, Option<f64>>,
    /// Glyph the changes were computed against
    pub glyph_name: String,
    pub edit_type: EditType,
}

impl ChangeSet {
    pub fn new(glyph_name: impl Into<String>, edit_type: EditType) -> Self {
        Self {
            changes: BTreeMap::new(),
            glyph_name: glyph_name.into(),
            edit_type,
        }
    }

    /// Set a field; non-finite values are dropped
    pub fn set(&mut self, address: Address, value: f64) {
        if value.is_finite() {
            self.changes.insert(address, Some(value));
        } else {
            tracing::warn!("Dropping non-finite value {} for {}", value, address);
        }
    }

    /// Clear a field back to its computed default
    pub fn clear(&mut self, address: Address) {
        self.changes.insert(address, None);
    }

    pub fn with(mut self, address: Address, value: f64) -> Self {
        self.set(address, value);
        self
    }

    pub fn with_cleared(mut self, address: Address) -> Self {
        self.clear(address);
        self
    }

    /// Value recorded for an address: `Some(None)` means cleared
    pub fn get(&self, address: &str) -> Option<Option<f64>> {
        self.changes.get(&Address::from(address)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Fold another change-set in; its values win on conflicts
    pub fn merge(&mut self, other: ChangeSet) {
        self.changes.extend(other.changes);
    }
}

/// An action for the external dispatcher
///
/// Serializes as `{ "action": "<name>", "payload": { ... } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action", content = "payload", rename_all = "kebab-case")]
pub enum Action {
    ChangeGlyphNodeManually(ChangeSet),
    ChangeComponent {
        glyph: String,
        id: String,
        name: String,
    },
    ChangeComponentClass {
        #[serde(rename = "componentClass")]
        component_class: String,
        name: String,
    },
    StoreValue {
        #[serde(rename = "canvasMode")]
        canvas_mode: CanvasMode,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::ChangeGlyphNodeManually(_) => "change-glyph-node-manually",
            Action::ChangeComponent { .. } => "change-component",
            Action::ChangeComponentClass { .. } => "change-component-class",
            Action::StoreValue { .. } => "store-value",
        }
    }

    pub fn change_set(&self) -> Option<&ChangeSet> {
        match self {
            Action::ChangeGlyphNodeManually(changes) => Some(changes),
            _ => None,
        }
    }
}

/// Receives actions produced by the canvas
///
/// Dispatch is fire-and-forget: the canvas never waits for confirmation.
pub trait ActionDispatcher {
    fn dispatch(&mut self, action: Action);
}

impl<F: FnMut(Action)> ActionDispatcher for F {
    fn dispatch(&mut self, action: Action) {
        self(action)
    }
}

/// Dispatcher that keeps every action in order
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    pub actions: Vec<Action>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded actions, leaving the log empty
    pub fn take(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }
}

impl ActionDispatcher for RecordingDispatcher {
    fn dispatch(&mut self, action: Action) {
        tracing::debug!("dispatch {}", action.name());
        self.actions.push(action);
    }
}
