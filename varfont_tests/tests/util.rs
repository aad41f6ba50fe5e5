// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scratch directories and fixtures.

use std::path::{Path, PathBuf};
use std::{env, fs, process};

use image::{GrayImage, Luma};
use varfont::{Bitmap, Glyph, GlyphSet};

/// A directory under the system temp dir, removed again on drop.
pub(crate) struct Scratch {
    dir: PathBuf,
}

impl Scratch {
    pub(crate) fn new(name: &str) -> Self {
        let dir = env::temp_dir().join(format!("varfont-{}-{name}", process::id()));
        // Left over from an aborted run.
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Self { dir }
    }

    pub(crate) fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub(crate) fn write(&self, file: &str, contents: &str) -> PathBuf {
        let path = self.path(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Saves a grid of `columns * rows` cells as a PNG, inked by [`pattern`].
    pub(crate) fn atlas(&self, file: &str, grid: Grid) -> PathBuf {
        let path = self.path(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        grid.image().save(&path).unwrap();
        path
    }

    /// Names of the files directly inside the directory, sorted.
    pub(crate) fn listing(&self) -> Vec<String> {
        let mut names: Vec<_> = fs::read_dir(&self.dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Layout of a generated atlas.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Grid {
    pub(crate) columns: u32,
    pub(crate) rows: u32,
    pub(crate) col_width: u32,
    pub(crate) cell_height: u32,
}

impl Grid {
    pub(crate) fn cells(self) -> u32 {
        self.columns * self.rows
    }

    pub(crate) fn image(self) -> GrayImage {
        GrayImage::from_fn(
            self.columns * self.col_width,
            self.rows * self.cell_height,
            |x, y| {
                let cell = y / self.cell_height * self.columns + x / self.col_width;
                if pattern(cell, x % self.col_width, y % self.cell_height) {
                    Luma([0])
                } else {
                    Luma([255])
                }
            },
        )
    }

    /// The bitmap the atlas should yield for `cell`.
    pub(crate) fn expected(self, cell: u32) -> Bitmap {
        Bitmap::from_fn(self.col_width, self.cell_height, |x, y| {
            pattern(cell, x, y)
        })
    }
}

/// A diagonal hatch that differs from cell to cell.
pub(crate) fn pattern(cell: u32, x: u32, y: u32) -> bool {
    (x + y + cell) % (cell % 3 + 2) == 0
}

/// A one row-group set with a glyph per `(code, bitmap)`.
pub(crate) fn glyph_set(glyphs: impl IntoIterator<Item = (char, Bitmap)>) -> GlyphSet {
    let mut set = GlyphSet::new(1).unwrap();
    for (c, bitmap) in glyphs {
        set.insert(Glyph::new(u32::from(c), bitmap).unwrap())
            .unwrap();
    }
    set
}

/// Reads a file written by a test.
pub(crate) fn read(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap()
}
