// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Error type for the fallible outer surfaces (config files, replay scripts).
//!
//! The per-frame core never fails: missing glyph data is skipped, not
//! reported.

use std::path::PathBuf;

/// Errors raised while loading configuration or replay scripts
#[derive(Debug, thiserror::Error)]
pub enum CanvasError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid canvas config")]
    Config(#[from] toml::de::Error),

    #[error("invalid replay script")]
    Script(#[from] serde_json::Error),

    #[error("replay script has no glyph named {0:?}")]
    MissingGlyph(String),
}

impl CanvasError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
