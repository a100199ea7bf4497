// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Glyph data model

pub mod address;
pub mod glyph;

pub use address::Address;
pub use glyph::Glyph;
