// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph Canvas: replay a scripted canvas session and print its actions

fn main() -> anyhow::Result<()> {
    glyph_canvas::run()
}
