// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading glyphs back out of a blob, the same way the display driver does.

use crate::blob::{HEADER_SIZE, MAGIC};
use crate::table::{OffsetTableEntry, ENTRY_SIZE};
use crate::{rle, unpack_columns, Bitmap, Error, ErrorKind};

/// A validated view over a serialized font blob.
#[derive(Clone, Copy, Debug)]
pub struct FontReader<'a> {
    rows: u8,
    table: &'a [u8],
    /// Everything after the header; offsets are relative to its start.
    data: &'a [u8],
}

impl<'a> FontReader<'a> {
    /// Checks the identifier and that the offset table is complete.
    pub fn new(blob: &'a [u8]) -> Result<Self, Error> {
        let Some((header, data)) = blob.split_first_chunk::<HEADER_SIZE>() else {
            return Err(Error::truncated(blob.len()));
        };
        if header[..4] != MAGIC {
            return Err(Error::new(ErrorKind::BadMagic, None, 0));
        }
        let count = usize::from(header[4]);
        let table = data
            .get(..count * ENTRY_SIZE)
            .ok_or_else(|| Error::truncated(blob.len()))?;
        Ok(Self {
            rows: header[5],
            table,
            data,
        })
    }

    /// Glyph height in 8 pixel row-groups.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of glyphs in the table.
    pub fn len(&self) -> usize {
        self.table.len() / ENTRY_SIZE
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Iterates over the offset table entries in stored order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = OffsetTableEntry> + 'a {
        self.table
            .chunks_exact(ENTRY_SIZE)
            .map(|chunk| OffsetTableEntry::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
    }

    /// Binary searches the offset table for `code`.
    pub fn entry(&self, code: u8) -> Option<OffsetTableEntry> {
        let (mut lo, mut hi) = (0, self.len());
        while lo < hi {
            let mid = (lo + hi) / 2;
            let entry = self.entry_at(mid);
            match entry.code.cmp(&code) {
                core::cmp::Ordering::Less => lo = mid + 1,
                core::cmp::Ordering::Greater => hi = mid,
                core::cmp::Ordering::Equal => return Some(entry),
            }
        }
        None
    }

    /// Decodes the column bytes of `code`: exactly `rows * width` of them.
    pub fn columns(&self, code: u8) -> Result<alloc::vec::Vec<u8>, Error> {
        let entry = self
            .entry(code)
            .ok_or_else(|| Error::new(ErrorKind::MissingGlyph, Some(code.into()), 0))?;
        let start = usize::from(entry.offset);
        let stream = self
            .data
            .get(start..)
            .ok_or_else(|| Error::new(ErrorKind::Truncated, Some(code.into()), start))?;
        let len = usize::from(self.rows) * usize::from(entry.width);
        rle::decode(stream, len).map_err(|err| {
            Error::new(err.kind(), Some(code.into()), HEADER_SIZE + start + err.value())
        })
    }

    /// Decodes `code` back into its pixel grid.
    pub fn glyph(&self, code: u8) -> Result<Bitmap, Error> {
        let columns = self.columns(code)?;
        let width = self.entry(code).map_or(0, |entry| entry.width);
        Ok(unpack_columns(
            &columns,
            u32::from(width),
            u32::from(self.rows),
        ))
    }

    fn entry_at(&self, index: usize) -> OffsetTableEntry {
        let at = index * ENTRY_SIZE;
        let chunk = &self.table[at..at + ENTRY_SIZE];
        OffsetTableEntry::from_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])
    }
}
