// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Error produced while building or reading a packed font blob.
///
/// Carries a non-exhaustive [`ErrorKind`] plus the character code and the
/// offending value, when they are known, so that a failure can be traced
/// back to the glyph-set entry that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    code: Option<u32>,
    value: usize,
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The character code of the glyph being processed, if any.
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// The offending value (a width, a count, an offset, a byte position...).
    pub fn value(&self) -> usize {
        self.value
    }

    pub(crate) fn new(kind: ErrorKind, code: Option<u32>, value: usize) -> Self {
        Self { kind, code, value }
    }

    pub(crate) fn duplicate_glyph(code: u8) -> Self {
        Self::new(ErrorKind::DuplicateGlyph, Some(code.into()), code.into())
    }

    pub(crate) fn char_code_out_of_range(code: u32) -> Self {
        Self::new(ErrorKind::CharCodeOutOfRange, Some(code), code as usize)
    }

    pub(crate) fn invalid_rows(rows: usize) -> Self {
        Self::new(ErrorKind::InvalidRows, None, rows)
    }

    pub(crate) fn truncated(position: usize) -> Self {
        Self::new(ErrorKind::Truncated, None, position)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.code {
            write!(f, "character {}: ", CharDisplay(code))?;
        }
        let value = self.value;
        match self.kind {
            ErrorKind::DuplicateGlyph => f.write_str("duplicate character"),
            ErrorKind::CharCodeOutOfRange => {
                write!(f, "character code {value} does not fit in one byte")
            }
            ErrorKind::WidthOutOfRange => {
                write!(f, "glyph width {value} is not in 1..=255")
            }
            ErrorKind::HeightMismatch => {
                write!(f, "glyph height {value} does not match the font height")
            }
            ErrorKind::InvalidRows => write!(f, "row count {value} is not in 1..=255"),
            ErrorKind::TooManyGlyphs => {
                write!(f, "{value} glyphs do not fit in a one byte glyph count")
            }
            ErrorKind::NoGlyphs => f.write_str("the glyph set is empty"),
            ErrorKind::OffsetOverflow => {
                write!(f, "data offset {value} does not fit in 16 bits")
            }
            ErrorKind::BadMagic => f.write_str("font blob does not start with \"VAR1\""),
            ErrorKind::Truncated => write!(f, "font data truncated at byte {value}"),
            ErrorKind::InvalidToken => {
                write!(f, "zero length run-length token at byte {value}")
            }
            ErrorKind::MissingGlyph => f.write_str("no such glyph in the font"),
        }
    }
}

impl core::error::Error for Error {}

/// The non-exhaustive category of an [`Error`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Two glyphs claimed the same character code.
    DuplicateGlyph,

    /// A character code does not fit in the one byte the offset table reserves for it.
    CharCodeOutOfRange,

    /// A glyph is zero pixels wide, or wider than 255 pixels.
    WidthOutOfRange,

    /// A glyph is not exactly `rows * 8` pixels tall.
    HeightMismatch,

    /// The row count is zero or larger than 255.
    InvalidRows,

    /// More than 255 glyphs were added to one font.
    TooManyGlyphs,

    /// A blob was requested for a font without any glyphs.
    NoGlyphs,

    /// A glyph's data offset does not fit in 16 bits.
    OffsetOverflow,

    /// The blob does not start with the `VAR1` identifier.
    BadMagic,

    /// The blob ended in the middle of a header, table entry or token.
    Truncated,

    /// A run-length control byte declared a zero length.
    InvalidToken,

    /// The requested character is not in the offset table.
    MissingGlyph,
}

/// Formats a character code as `'A' (65)` when printable, or just the number otherwise.
struct CharDisplay(u32);

impl fmt::Display for CharDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match char::from_u32(self.0) {
            Some(c) if c.is_ascii_graphic() => write!(f, "'{c}' ({})", self.0),
            _ => write!(f, "{}", self.0),
        }
    }
}
