// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyphs rendered from an outline font with Swash.

use core::fmt;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};
use swash::scale::{Render, ScaleContext, Source};
use swash::zeno::Format;
use swash::{CacheKey, FontRef};
use varfont::Bitmap;

use crate::{RasterError, Rasterizer};

/// Coverage at or above which a rendered pixel is on.
const COVERAGE_THRESHOLD: u8 = 128;

/// Placement and post-processing of outline glyphs within their cells.
#[derive(Clone, Debug, PartialEq)]
pub struct OutlineStyle {
    /// Font size in pixels per em.
    pub font_size: f32,
    /// Fixed cell width, or 0 to size each cell from the glyph's advance.
    pub col_width: u32,
    /// Horizontal pen offset.
    pub x_offset: i32,
    /// Vertical offset of the ascender line from the top of the cell.
    pub y_offset: i32,
    /// Blank columns added on both sides of variable width cells.
    pub x_pad: u32,
    /// Horizontal scale applied after rendering.
    pub x_scale: Option<f32>,
    /// Columns removed from the right after scaling.
    pub right_trim: u32,
    /// Columns removed from the left after the right trim.
    pub left_trim: u32,
}

impl Default for OutlineStyle {
    fn default() -> Self {
        Self {
            font_size: 8.0,
            col_width: 0,
            x_offset: 0,
            y_offset: 0,
            x_pad: 1,
            x_scale: None,
            right_trim: 0,
            left_trim: 0,
        }
    }
}

/// An outline font together with the characters to take from it.
pub struct OutlineFont {
    data: Vec<u8>,
    offset: u32,
    key: CacheKey,
    chars: BTreeSet<u32>,
    style: OutlineStyle,
    rows: u32,
    context: ScaleContext,
}

impl fmt::Debug for OutlineFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlineFont")
            .field("data", &self.data.len())
            .field("offset", &self.offset)
            .field("chars", &self.chars)
            .field("style", &self.style)
            .field("rows", &self.rows)
            .finish_non_exhaustive()
    }
}

impl OutlineFont {
    /// Loads a font file from disk. See [`OutlineFont::new`].
    pub fn open(
        path: &Path,
        chars: &str,
        style: OutlineStyle,
        rows: u32,
    ) -> Result<Self, RasterError> {
        let data = fs::read(path).map_err(|source| RasterError::Io {
            path: path.to_owned(),
            source,
        })?;
        log::debug!("loaded font {} ({} bytes)", path.display(), data.len());
        Self::new(data, chars, style, rows)
    }

    /// Parses the first font in `data`.
    ///
    /// Each distinct character of `chars` becomes one glyph, `rows * 8`
    /// pixels tall.
    pub fn new(
        data: Vec<u8>,
        chars: &str,
        style: OutlineStyle,
        rows: u32,
    ) -> Result<Self, RasterError> {
        let font = FontRef::from_index(&data, 0).ok_or(RasterError::InvalidFont)?;
        let (offset, key) = (font.offset, font.key);
        Ok(Self {
            data,
            offset,
            key,
            chars: chars.chars().map(u32::from).collect(),
            style,
            rows,
            context: ScaleContext::new(),
        })
    }

    /// The characters this font contributes, in ascending order.
    pub fn chars(&self) -> impl Iterator<Item = u32> + '_ {
        self.chars.iter().copied()
    }
}

impl Rasterizer for OutlineFont {
    fn codes(&self) -> Vec<u32> {
        self.chars().collect()
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "pixel metrics of small bitmap fonts fit in i32"
    )]
    fn rasterize(&mut self, code: u32) -> Result<Bitmap, RasterError> {
        let font = FontRef {
            data: &self.data,
            offset: self.offset,
            key: self.key,
        };
        let glyph_id = char::from_u32(code)
            .map(|c| font.charmap().map(c))
            .filter(|&id| id != 0)
            .ok_or(RasterError::MissingGlyph { code })?;
        let style = &self.style;
        let ascent = font.metrics(&[]).scale(style.font_size).ascent;
        let advance = font
            .glyph_metrics(&[])
            .scale(style.font_size)
            .advance_width(glyph_id);

        let width = cell_width(advance, style);
        let height = self.rows * 8;
        let mut canvas = GrayImage::new(width, height);

        let mut scaler = self
            .context
            .builder(font)
            .size(style.font_size)
            .hint(true)
            .build();
        let rendered = Render::new(&[Source::Outline])
            .format(Format::Alpha)
            .render(&mut scaler, glyph_id);

        // Whitespace has no outline and renders as an empty cell.
        if let Some(image) = rendered {
            let origin = (
                style.x_offset + style.x_pad as i32 + image.placement.left,
                style.y_offset + ascent.round() as i32 - image.placement.top,
            );
            blit(&mut canvas, &image.data, image.placement.width, origin);
        }
        log::debug!("rendered {code} into a {width}x{height} cell");

        let bitmap = post_process(canvas, style);
        if bitmap.is_blank() && !char::from_u32(code).is_some_and(char::is_whitespace) {
            log::warn!("character {code} rendered blank; check font_size and y_offset");
        }
        Ok(bitmap)
    }
}

/// Width of the cell a glyph with the given advance is drawn into.
///
/// A fixed `col_width` wins; otherwise the advance is rounded up, with one
/// spare column and `x_pad` on each side.
pub(crate) fn cell_width(advance: f32, style: &OutlineStyle) -> u32 {
    if style.col_width != 0 {
        return style.col_width;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "advances of small bitmap fonts fit in u32"
    )]
    let advance = advance.ceil().max(0.0) as u32;
    advance + 1 + style.x_pad * 2
}

/// Copies a row-major coverage mask `width` pixels wide onto `canvas` with
/// its top left pixel at `origin`. Pixels outside the canvas are dropped.
pub(crate) fn blit(canvas: &mut GrayImage, coverage: &[u8], width: u32, origin: (i32, i32)) {
    if width == 0 {
        return;
    }
    for (row, line) in (0_i64..).zip(coverage.chunks(width as usize)) {
        for (col, &value) in (0_i64..).zip(line) {
            let x = i64::from(origin.0) + col;
            let y = i64::from(origin.1) + row;
            if let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) {
                if x < canvas.width() && y < canvas.height() {
                    canvas.put_pixel(x, y, Luma([value]));
                }
            }
        }
    }
}

/// Applies the horizontal scale and trims, then thresholds the coverage.
pub(crate) fn post_process(mut canvas: GrayImage, style: &OutlineStyle) -> Bitmap {
    let height = canvas.height();
    if let Some(scale) = style.x_scale {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "scaled widths of glyph cells are small and non-negative"
        )]
        let scaled = (canvas.width() as f32 * scale).max(0.0) as u32;
        if scaled == 0 {
            return Bitmap::new(0, height);
        }
        canvas = imageops::resize(&canvas, scaled, height, FilterType::Nearest);
    }
    if style.right_trim > 0 {
        let width = canvas.width().saturating_sub(style.right_trim);
        canvas = imageops::crop_imm(&canvas, 0, 0, width, height).to_image();
    }
    if style.left_trim > 0 {
        let left = style.left_trim.min(canvas.width());
        let width = canvas.width() - left;
        canvas = imageops::crop_imm(&canvas, left, 0, width, height).to_image();
    }
    Bitmap::from_fn(canvas.width(), height, |x, y| {
        canvas.get_pixel(x, y).0[0] >= COVERAGE_THRESHOLD
    })
}
