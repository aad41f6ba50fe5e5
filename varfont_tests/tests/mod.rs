// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integration tests spanning the codec, the glyph sources and the compiler.
//!
//! - `util` holds the scratch directory and fixture helpers shared by the
//!   other modules.
//! - Test names start with their topic (`compile_`, `emit_`, `reader_`...).

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod compile;
mod util;
