// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered collections of glyphs sharing one height.

use alloc::collections::BTreeMap;

use crate::{Error, ErrorKind, Glyph};

/// Glyphs of one font, keyed and ordered by character code.
///
/// Every glyph shares the font's height and no code appears twice; both are
/// checked as glyphs are inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    rows: u8,
    glyphs: BTreeMap<u8, Glyph>,
}

impl GlyphSet {
    /// Largest number of glyphs a font can hold.
    pub const MAX_GLYPHS: usize = 255;

    /// Creates an empty set for glyphs `rows * 8` pixels tall.
    pub fn new(rows: u32) -> Result<Self, Error> {
        match u8::try_from(rows) {
            Ok(rows @ 1..) => Ok(Self {
                rows,
                glyphs: BTreeMap::new(),
            }),
            _ => Err(Error::invalid_rows(rows as usize)),
        }
    }

    /// Glyph height in 8 pixel row-groups.
    pub fn rows(&self) -> u8 {
        self.rows
    }

    /// Glyph height in pixels.
    pub fn height(&self) -> u32 {
        u32::from(self.rows) * 8
    }

    /// Adds a glyph.
    ///
    /// Fails if the code is already taken, if the glyph has the wrong
    /// height, or if the set is full.
    pub fn insert(&mut self, glyph: Glyph) -> Result<(), Error> {
        let code = self.check_vacant(glyph.code().into())?;
        if glyph.bitmap().height() != self.height() {
            return Err(Error::new(
                ErrorKind::HeightMismatch,
                Some(code.into()),
                glyph.bitmap().height() as usize,
            ));
        }
        if self.glyphs.len() >= Self::MAX_GLYPHS {
            return Err(Error::new(
                ErrorKind::TooManyGlyphs,
                Some(code.into()),
                self.glyphs.len() + 1,
            ));
        }
        self.glyphs.insert(code, glyph);
        Ok(())
    }

    /// Checks that a glyph for `code` could still be added.
    ///
    /// Fails if the code does not fit in a byte or is already taken.
    pub fn check_vacant(&self, code: u32) -> Result<u8, Error> {
        let code = u8::try_from(code).map_err(|_| Error::char_code_out_of_range(code))?;
        if self.glyphs.contains_key(&code) {
            return Err(Error::duplicate_glyph(code));
        }
        Ok(code)
    }

    /// Returns whether a glyph for `code` is present.
    pub fn contains(&self, code: u32) -> bool {
        u8::try_from(code).is_ok_and(|code| self.glyphs.contains_key(&code))
    }

    /// Returns the glyph for `code`, if present.
    pub fn get(&self, code: u8) -> Option<&Glyph> {
        self.glyphs.get(&code)
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns whether the set has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Iterates over the glyphs in ascending code order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }
}
