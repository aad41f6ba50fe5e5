// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Assembly of the complete font container.
//!
//! ```text
//! 0      "VAR1"
//! 4      glyph count
//! 5      row count (glyph height / 8)
//! 6      offset table, 4 bytes per glyph, ascending code
//! 6+4n   token streams, same order
//! ```

use alloc::vec::Vec;

use crate::table::{build_offset_table, OffsetTableEntry, ENTRY_SIZE};
use crate::{pack_columns, rle, Error, ErrorKind, GlyphSet};

/// Identifier at the start of every blob.
pub const MAGIC: [u8; 4] = *b"VAR1";

/// Size of the fixed header before the offset table.
pub const HEADER_SIZE: usize = 6;

/// A glyph's table entry together with its token stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedGlyph {
    /// The offset table entry.
    pub entry: OffsetTableEntry,
    /// The run-length coded column bytes.
    pub data: Vec<u8>,
}

/// A compiled font, ready to be written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontBlob {
    rows: u8,
    glyphs: Vec<EncodedGlyph>,
}

impl FontBlob {
    /// Packs, encodes and lays out every glyph of `set`.
    pub fn compile(set: &GlyphSet) -> Result<Self, Error> {
        if set.is_empty() {
            return Err(Error::new(ErrorKind::NoGlyphs, None, 0));
        }
        let encoded: Vec<Vec<u8>> = set
            .iter()
            .map(|glyph| {
                let packed = pack_columns(glyph.bitmap());
                let data = rle::encode(&packed);
                log::debug!(
                    "glyph {}: width {}, {} packed bytes, {} encoded bytes",
                    glyph.code(),
                    glyph.width(),
                    packed.len(),
                    data.len()
                );
                data
            })
            .collect();
        let table = build_offset_table(
            set.iter()
                .zip(&encoded)
                .map(|(glyph, data)| (glyph.code(), glyph.width(), data.len())),
        )?;
        let glyphs = table
            .into_iter()
            .zip(encoded)
            .map(|(entry, data)| EncodedGlyph { entry, data })
            .collect();
        Ok(Self {
            rows: set.rows(),
            glyphs,
        })
    }

    /// Glyph height in 8 pixel row-groups.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// The encoded glyphs in ascending code order.
    pub fn glyphs(&self) -> &[EncodedGlyph] {
        &self.glyphs
    }

    /// Size of the offset table in bytes.
    pub fn table_len(&self) -> usize {
        self.glyphs.len() * ENTRY_SIZE
    }

    /// Total size of the serialized blob.
    pub fn len(&self) -> usize {
        HEADER_SIZE
            + self.table_len()
            + self.glyphs.iter().map(|glyph| glyph.data.len()).sum::<usize>()
    }

    /// Returns whether the blob holds no glyphs. Compiled blobs never do.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Serializes the header, the offset table and the glyph data.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the glyph set holds at most 255 glyphs"
    )]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&MAGIC);
        out.push(self.glyphs.len() as u8);
        out.push(self.rows);
        for glyph in &self.glyphs {
            out.extend_from_slice(&glyph.entry.to_bytes());
        }
        for glyph in &self.glyphs {
            out.extend_from_slice(&glyph.data);
        }
        out
    }
}
