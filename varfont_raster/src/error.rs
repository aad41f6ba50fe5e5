// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use std::io;
use std::path::PathBuf;

/// Which dimension of an atlas image failed validation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The horizontal dimension, checked against the column width.
    Width,
    /// The vertical dimension, checked against the glyph height.
    Height,
}

/// Errors produced while turning a glyph source into bitmaps.
#[derive(Debug)]
#[non_exhaustive]
pub enum RasterError {
    /// An atlas image is not made of whole cells.
    NotAMultiple {
        /// The dimension that failed.
        axis: Axis,
        /// The image size along `axis`.
        image: u32,
        /// The cell size along `axis`.
        cell: u32,
    },
    /// Numbering an atlas's cells from `first_char` runs past the largest
    /// character code.
    CodeOverflow {
        /// The code of the first cell.
        first_char: u32,
    },
    /// An atlas image could not be read or decoded.
    Image(image::ImageError),
    /// A source file could not be read.
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },
    /// The font data could not be parsed.
    InvalidFont,
    /// The font has no glyph for the character.
    MissingGlyph {
        /// The character code.
        code: u32,
    },
    /// A rasterized glyph does not fit the font (duplicate code, bad width...).
    Glyph(varfont::Error),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAMultiple { axis, image, cell } => {
                let axis = match axis {
                    Axis::Width => "width",
                    Axis::Height => "height",
                };
                write!(
                    f,
                    "image {axis} {image} is not a multiple of the cell {axis} {cell}"
                )
            }
            Self::CodeOverflow { first_char } => write!(
                f,
                "atlas cells numbered from character {first_char} run past the largest code"
            ),
            Self::Image(err) => write!(f, "failed to load atlas image: {err}"),
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::InvalidFont => f.write_str("failed to parse font data"),
            Self::MissingGlyph { code } => match char::from_u32(*code) {
                Some(c) if !c.is_control() => {
                    write!(f, "font has no glyph for {c:?} ({code})")
                }
                _ => write!(f, "font has no glyph for character {code}"),
            },
            Self::Glyph(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Glyph(err) => Some(err),
            _ => None,
        }
    }
}

impl From<image::ImageError> for RasterError {
    fn from(err: image::ImageError) -> Self {
        Self::Image(err)
    }
}

impl From<varfont::Error> for RasterError {
    fn from(err: varfont::Error) -> Self {
        Self::Glyph(err)
    }
}
