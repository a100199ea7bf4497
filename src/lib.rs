// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph Canvas: the interaction core of a parametric skeleton glyph editor
//!
//! The host samples input, resolves hit tests and renders; this crate turns
//! each frame of that into canvas state and parametric change-sets.

use anyhow::Context;
use std::path::PathBuf;

pub mod canvas;
pub mod config;
pub mod editing;
pub mod error;
pub mod input;
pub mod model;
pub mod replay;
pub mod settings;

pub use canvas::{CanvasMachine, CanvasMode, FrameInput, FrameLoop, FrameOutput, UiState};
pub use config::CanvasConfig;
pub use error::CanvasError;
pub use model::{Address, Glyph};

/// Entry point for the `glyph-canvas` replay tool
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("glyph_canvas=info".parse()?),
        )
        .init();

    let Some(args) = handle_command_line_args() else {
        tracing::error!("Usage: glyph-canvas <session.json> [--config canvas.toml]");
        anyhow::bail!("missing session script");
    };

    let script = replay::ReplayScript::load(&args.script)
        .with_context(|| format!("failed to load session {}", args.script.display()))?;
    let config = args
        .config
        .as_ref()
        .map(|path| {
            CanvasConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))
        })
        .transpose()?;

    let report = script.run(config).context("replay failed")?;
    for action in &report.actions {
        println!("{}", serde_json::to_string(action)?);
    }
    tracing::info!(
        "Replayed {} frames: {} actions, ended in {} / {:?}",
        report.frames,
        report.actions.len(),
        report.mode.as_str(),
        report.sub_state.primary
    );
    Ok(())
}

struct CommandLineArgs {
    script: PathBuf,
    config: Option<PathBuf>,
}

/// Parse `<script> [--config <path>]`
fn handle_command_line_args() -> Option<CommandLineArgs> {
    let mut args = std::env::args().skip(1);
    let mut script = None;
    let mut config = None;

    while let Some(arg) = args.next() {
        if arg == "--config" {
            config = Some(PathBuf::from(args.next()?));
        } else if script.is_none() {
            script = Some(PathBuf::from(arg));
        } else {
            tracing::warn!("Ignoring extra argument: {}", arg);
        }
    }

    Some(CommandLineArgs {
        script: script?,
        config,
    })
}
