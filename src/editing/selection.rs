// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Selection state: the ordered item selection and the contour cycle.
//!
//! `Selection` wraps an `Arc<Vec<InteractiveItem>>` so frame outputs can
//! hand it to the renderer without copying. Mutations produce a new list
//! (copy-on-write via `Arc::make_mut`). Order is the hit tester's order,
//! which decides the order change-sets are dispatched in.

use super::item::InteractiveItem;
use crate::model::Address;
use std::sync::Arc;

/// An ordered set of selected items, unique by id
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    inner: Arc<Vec<InteractiveItem>>,
}

impl Selection {
    /// Create a new empty selection
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Vec::new()),
        }
    }

    /// Selection holding exactly `item`
    pub fn single(item: InteractiveItem) -> Self {
        Self {
            inner: Arc::new(vec![item]),
        }
    }

    /// Select `items`, dropping later duplicates
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a InteractiveItem>) -> Self {
        let mut selection = Self::new();
        for item in items {
            selection.insert(item.clone());
        }
        selection
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Check if an item with this id is selected
    pub fn contains(&self, id: &Address) -> bool {
        self.inner.iter().any(|item| &item.id == id)
    }

    pub fn first(&self) -> Option<&InteractiveItem> {
        self.inner.first()
    }

    /// The only selected item, if exactly one is selected
    pub fn single_item(&self) -> Option<&InteractiveItem> {
        match self.inner.as_slice() {
            [item] => Some(item),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveItem> {
        self.inner.iter()
    }

    /// Append an item unless one with the same id is already selected
    pub fn insert(&mut self, item: InteractiveItem) {
        if !self.contains(&item.id) {
            Arc::make_mut(&mut self.inner).push(item);
        }
    }

    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.inner = Arc::new(Vec::new());
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

/// The selected contour and the cycle position among overlapping contours
///
/// Clicking where `k` contours overlap selects `candidates[index mod k]`
/// and advances `index`, so successive clicks visit every candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourSelection {
    current: Option<InteractiveItem>,
    index: usize,
}

impl ContourSelection {
    pub fn current(&self) -> Option<&InteractiveItem> {
        self.current.as_ref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Select the next candidate in the cycle
    ///
    /// Returns the newly selected contour, or `None` when there are no
    /// candidates (the selection is left unchanged).
    pub fn select_next(&mut self, candidates: &[&InteractiveItem]) -> Option<&InteractiveItem> {
        if candidates.is_empty() {
            return None;
        }
        let picked = candidates[self.index % candidates.len()].clone();
        self.index += 1;
        self.current = Some(picked);
        self.current.as_ref()
    }

    /// Whether the selected contour is among `candidates`
    pub fn is_hit(&self, candidates: &[&InteractiveItem]) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| candidates.iter().any(|c| c.id == current.id))
    }

    /// Forget the contour and restart the cycle
    pub fn clear(&mut self) {
        self.current = None;
        self.index = 0;
    }
}
