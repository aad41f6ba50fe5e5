// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-glyph directory at the front of a font blob.

use alloc::vec::Vec;

use crate::{Error, ErrorKind};

/// Size in bytes of one [`OffsetTableEntry`].
pub const ENTRY_SIZE: usize = 4;

/// One offset table record: `[code][width][offset hi][offset lo]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OffsetTableEntry {
    /// Character code.
    pub code: u8,
    /// Width in pixels.
    pub width: u8,
    /// Start of the glyph's token stream, counted from the first table entry.
    pub offset: u16,
}

impl OffsetTableEntry {
    /// The on-disk form of this entry.
    pub fn to_bytes(self) -> [u8; ENTRY_SIZE] {
        let [hi, lo] = self.offset.to_be_bytes();
        [self.code, self.width, hi, lo]
    }

    /// Parses an entry from its on-disk form.
    pub fn from_bytes(bytes: [u8; ENTRY_SIZE]) -> Self {
        Self {
            code: bytes[0],
            width: bytes[1],
            offset: u16::from_be_bytes([bytes[2], bytes[3]]),
        }
    }
}

/// Computes the offset table for glyphs given as `(code, width, encoded_len)`.
///
/// The glyphs must already be in ascending code order. The first offset is
/// the size of the table itself, and each following one adds the encoded
/// length of the glyph before it.
pub fn build_offset_table(
    glyphs: impl ExactSizeIterator<Item = (u8, u8, usize)>,
) -> Result<Vec<OffsetTableEntry>, Error> {
    let mut offset = glyphs.len() * ENTRY_SIZE;
    let mut table = Vec::with_capacity(glyphs.len());
    for (code, width, encoded_len) in glyphs {
        debug_assert!(
            table
                .last()
                .is_none_or(|prev: &OffsetTableEntry| prev.code < code),
            "glyphs must be sorted by code"
        );
        let offset16 = u16::try_from(offset).map_err(|_| {
            Error::new(ErrorKind::OffsetOverflow, Some(code.into()), offset)
        })?;
        table.push(OffsetTableEntry {
            code,
            width,
            offset: offset16,
        });
        offset += encoded_len;
    }
    Ok(table)
}
