// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph sources for Varfont fonts.
//!
//! Glyphs come either from an outline font, rendered with [Swash] and
//! thresholded to one bit per pixel ([`OutlineFont`]), or from a pre-drawn
//! grid of cells in an image ([`Atlas`]). Both implement [`Rasterizer`], and
//! [`add_glyphs`] moves their output into a [`GlyphSet`], which rejects
//! duplicate character codes across sources.
//!
//! [Swash]: https://docs.rs/swash

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]

mod atlas;
mod error;
mod outline;

pub use atlas::Atlas;
pub use error::{Axis, RasterError};
pub use outline::{OutlineFont, OutlineStyle};

use varfont::{Bitmap, Glyph, GlyphSet};

/// A producer of fixed-height monochrome glyph bitmaps.
///
/// The height is fixed when the rasterizer is created, from the row count of
/// the font it is building.
pub trait Rasterizer {
    /// Character codes this source provides.
    fn codes(&self) -> Vec<u32>;

    /// Renders the glyph for `code`.
    fn rasterize(&mut self, code: u32) -> Result<Bitmap, RasterError>;
}

/// Renders every glyph of `source` into `set`.
///
/// Each code is checked against the set before it is rendered, so a
/// duplicate is reported without doing the work. Returns the number of
/// glyphs added.
pub fn add_glyphs(set: &mut GlyphSet, source: &mut dyn Rasterizer) -> Result<usize, RasterError> {
    let codes = source.codes();
    for &code in &codes {
        set.check_vacant(code)?;
        let bitmap = source.rasterize(code)?;
        set.insert(Glyph::new(code, bitmap)?)?;
    }
    Ok(codes.len())
}
