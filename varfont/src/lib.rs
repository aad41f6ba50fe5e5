// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Varfont is the codec behind the `VAR1` packed bitmap font format used by
//! small monochrome displays.
//!
//! A font is a set of glyphs of equal height (a whole number of 8 pixel
//! row-groups) and varying width. Each glyph is packed into one byte per
//! column per row-group, run-length coded, and placed behind an offset table
//! so a device can find any glyph with a binary search and decode it with a
//! byte counter.
//!
//! ## Features
//!
//! - `std` (enabled by default): Enables the `std` feature of `log`.
//!
//! ## Example
//!
//! ```
//! use varfont::{Bitmap, FontBlob, FontReader, Glyph, GlyphSet};
//!
//! let mut set = GlyphSet::new(1).unwrap();
//! let bar = Bitmap::from_fn(3, 8, |x, _| x == 1);
//! set.insert(Glyph::new(u32::from('|'), bar.clone()).unwrap()).unwrap();
//!
//! let bytes = FontBlob::compile(&set).unwrap().to_bytes();
//! assert_eq!(&bytes[..4], b"VAR1");
//!
//! let reader = FontReader::new(&bytes).unwrap();
//! assert_eq!(reader.glyph(b'|').unwrap(), bar);
//! ```

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
#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod bitmap;
mod blob;
mod error;
mod glyph_set;
mod pack;
mod reader;
pub mod rle;
mod table;

pub use bitmap::{Bitmap, Glyph};
pub use blob::{EncodedGlyph, FontBlob, HEADER_SIZE, MAGIC};
pub use error::{Error, ErrorKind};
pub use glyph_set::GlyphSet;
pub use pack::{pack_columns, unpack_columns};
pub use reader::FontReader;
pub use table::{build_offset_table, OffsetTableEntry, ENTRY_SIZE};
