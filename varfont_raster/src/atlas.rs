// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphs sliced out of a pre-drawn bitmap grid.

use std::path::Path;

use image::GrayImage;
use varfont::Bitmap;

use crate::{Axis, RasterError, Rasterizer};

/// Luminance below which an atlas pixel counts as ink.
const INK_THRESHOLD: u8 = 128;

/// A grid of equally sized glyph cells.
///
/// Cells are assigned consecutive character codes in row-major order,
/// starting from `first_char` in the top left cell.
#[derive(Clone, Debug)]
pub struct Atlas {
    image: GrayImage,
    col_width: u32,
    cell_height: u32,
    first_char: u32,
    cells: u32,
}

impl Atlas {
    /// Loads an atlas image from disk. See [`Atlas::new`].
    pub fn open(
        path: &Path,
        col_width: u32,
        rows: u32,
        first_char: u32,
    ) -> Result<Self, RasterError> {
        let image = image::open(path)?.to_luma8();
        log::debug!(
            "loaded atlas {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Self::new(image, col_width, rows, first_char)
    }

    /// Wraps an image whose cells are `col_width` by `rows * 8` pixels.
    ///
    /// Fails if either image dimension is not a whole number of cells, or if
    /// numbering the cells from `first_char` would run past `u32::MAX`.
    pub fn new(
        image: GrayImage,
        col_width: u32,
        rows: u32,
        first_char: u32,
    ) -> Result<Self, RasterError> {
        let cell_height = rows.saturating_mul(8);
        if cell_height == 0 || !image.height().is_multiple_of(cell_height) {
            return Err(RasterError::NotAMultiple {
                axis: Axis::Height,
                image: image.height(),
                cell: cell_height,
            });
        }
        if col_width == 0 || !image.width().is_multiple_of(col_width) {
            return Err(RasterError::NotAMultiple {
                axis: Axis::Width,
                image: image.width(),
                cell: col_width,
            });
        }
        let cells = (image.width() / col_width)
            .checked_mul(image.height() / cell_height)
            .filter(|&cells| first_char.checked_add(cells).is_some())
            .ok_or(RasterError::CodeOverflow { first_char })?;
        Ok(Self {
            image,
            col_width,
            cell_height,
            first_char,
            cells,
        })
    }

    /// Number of cells across.
    pub fn columns(&self) -> u32 {
        self.image.width() / self.col_width
    }

    /// Total number of cells.
    pub fn cells(&self) -> u32 {
        self.cells
    }
}

impl Rasterizer for Atlas {
    fn codes(&self) -> Vec<u32> {
        (self.first_char..self.first_char + self.cells).collect()
    }

    fn rasterize(&mut self, code: u32) -> Result<Bitmap, RasterError> {
        let index = code
            .checked_sub(self.first_char)
            .filter(|&index| index < self.cells)
            .ok_or(RasterError::MissingGlyph { code })?;
        let left = index % self.columns() * self.col_width;
        let top = index / self.columns() * self.cell_height;
        Ok(Bitmap::from_fn(self.col_width, self.cell_height, |x, y| {
            self.image.get_pixel(left + x, top + y).0[0] < INK_THRESHOLD
        }))
    }
}
