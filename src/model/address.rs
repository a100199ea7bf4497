// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Dotted-path addresses into the parametric glyph tree.
//!
//! An address such as `contours.0.nodes.2.dirIn` names a single value in
//! the glyph. Captured modification prefixes come in two spellings: with a
//! trailing dot (`contours.0.nodes.2.`) and without (`contours.0.nodes.2`).
//! [`Address::field`] accepts both.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dotted path into the glyph tree
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty path segments, in order
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Address of a child field
    pub fn field(&self, name: &str) -> Address {
        if self.0.is_empty() || self.0.ends_with('.') {
            Address(format!("{}{}", self.0, name))
        } else {
            Address(format!("{}.{}", self.0, name))
        }
    }

    /// Keep only the first `depth` segments
    ///
    /// Dependency entries point at a field deep inside the depending node;
    /// truncating to four segments (`contours.N.nodes.M`) reaches the node.
    pub fn truncated(&self, depth: usize) -> Address {
        Address(self.segments().take(depth).collect::<Vec<_>>().join("."))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Address {
    fn from(path: String) -> Self {
        Self(path)
    }
}
