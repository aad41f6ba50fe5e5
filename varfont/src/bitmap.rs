// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monochrome pixel grids and the glyphs built from them.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use crate::{Error, ErrorKind};

/// A monochrome pixel grid, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl Bitmap {
    /// Creates a bitmap with every pixel off.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Creates a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns whether the pixel at `(x, y)` is on. Out of bounds pixels are off.
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.pixels[self.index(x, y)]
    }

    /// Sets the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the bitmap.
    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) outside {}x{} bitmap",
            self.width,
            self.height
        );
        let index = self.index(x, y);
        self.pixels[index] = on;
    }

    /// Returns whether no pixel is on.
    pub fn is_blank(&self) -> bool {
        !self.pixels.contains(&true)
    }

    /// Renders the bitmap as text, one line per pixel row.
    pub fn to_ascii(&self, on: char, off: char) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.get(x, y) { on } else { off });
            }
            out.push('\n');
        }
        out
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// One character of a font: its code and its pixels.
///
/// Validated on construction so that it always fits in an offset table
/// entry: the code and the width each fit in one byte, and the height is a
/// whole number of 8 pixel row-groups.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    code: u8,
    bitmap: Bitmap,
}

impl Glyph {
    /// Creates a glyph for character `code`.
    pub fn new(code: u32, bitmap: Bitmap) -> Result<Self, Error> {
        let code8 = u8::try_from(code).map_err(|_| Error::char_code_out_of_range(code))?;
        if bitmap.width == 0 || bitmap.width > 255 {
            return Err(Error::new(
                ErrorKind::WidthOutOfRange,
                Some(code),
                bitmap.width as usize,
            ));
        }
        if bitmap.height == 0 || !bitmap.height.is_multiple_of(8) {
            return Err(Error::new(
                ErrorKind::HeightMismatch,
                Some(code),
                bitmap.height as usize,
            ));
        }
        Ok(Self {
            code: code8,
            bitmap,
        })
    }

    /// The character code.
    pub fn code(&self) -> u8 {
        self.code
    }

    /// Width in pixels.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "width is checked to be in 1..=255 on construction"
    )]
    pub fn width(&self) -> u8 {
        self.bitmap.width as u8
    }

    /// Height in 8 pixel row-groups.
    pub fn rows(&self) -> u32 {
        self.bitmap.height / 8
    }

    /// The pixel grid.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }
}
