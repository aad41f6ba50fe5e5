// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compiles glyph-set descriptions into Varfont fonts. See `./main.rs` for
//! the command line front end.
//!
//! Loading a [`Description`], gathering its glyphs with [`build_glyph_set`]
//! and handing the result to an [`OutputTarget`] produces the files to write.
//! Every step either succeeds completely or fails with an [`Error`] naming
//! the section and character at fault.

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET

// Only the binary uses these.
use anyhow as _;
use clap as _;
use env_logger as _;

mod config;
mod emit;
mod error;

pub use config::{Description, Section};
pub use emit::{c_identifier, debug_dump, Artifact, OutputTarget};
pub use error::Error;

use varfont::GlyphSet;
use varfont_raster::{add_glyphs, Atlas, OutlineFont, RasterError, Rasterizer};

/// Renders every section of `desc` into one glyph set.
///
/// Sections are processed in order. The first duplicate character code,
/// malformed atlas or unmappable character stops the build.
pub fn build_glyph_set(desc: &Description) -> Result<GlyphSet, Error> {
    let mut set = GlyphSet::new(desc.rows)?;
    for (index, section) in desc.sections.iter().enumerate() {
        let mut source = open_section(section, desc.rows)
            .map_err(|source| Error::Section { index, source })?;
        let added = add_glyphs(&mut set, source.as_mut())
            .map_err(|source| Error::Section { index, source })?;
        log::info!(
            "section {index} ({} {}): {added} glyphs",
            section.kind(),
            section.path().display()
        );
    }
    Ok(set)
}

fn open_section(section: &Section, rows: u32) -> Result<Box<dyn Rasterizer>, RasterError> {
    Ok(match section {
        Section::Outline { path, chars, style } => {
            Box::new(OutlineFont::open(path, chars, style.clone(), rows)?)
        }
        Section::Atlas {
            path,
            col_width,
            first_char,
        } => Box::new(Atlas::open(path, *col_width, rows, *first_char)?),
    })
}
