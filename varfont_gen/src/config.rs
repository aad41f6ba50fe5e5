// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Glyph-set descriptions.
//!
//! A description is a JSON document naming the glyph height and the sections
//! glyphs are drawn from:
//!
//! ```json
//! {
//!   "rows": 2,
//!   "output_type": "VariableFont",
//!   "sections": [
//!     { "type": "ttf", "path": "DejaVuSans.ttf", "font_size": 14, "chars": "0123456789" },
//!     { "type": "image_grid", "path": "icons.png", "col_width": 16, "first_char": 1 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use varfont_raster::OutlineStyle;

use crate::{Error, OutputTarget};

/// A parsed glyph-set description.
#[derive(Clone, Debug, PartialEq)]
pub struct Description {
    /// Glyph height in 8 pixel row-groups.
    pub rows: u32,
    /// The output kind named in the description, if any.
    pub output: Option<OutputTarget>,
    /// Glyph sources, in the order they are added to the font.
    pub sections: Vec<Section>,
}

/// One source of glyphs.
#[derive(Clone, Debug, PartialEq)]
pub enum Section {
    /// Characters rendered from an outline font file.
    Outline {
        /// The font file.
        path: PathBuf,
        /// Characters to render; each distinct one becomes a glyph.
        chars: String,
        /// Placement and post-processing.
        style: OutlineStyle,
    },
    /// Cells sliced out of a bitmap grid.
    Atlas {
        /// The image file.
        path: PathBuf,
        /// Width of each cell.
        col_width: u32,
        /// Character code of the top left cell.
        first_char: u32,
    },
}

impl Section {
    /// The file this section reads.
    pub fn path(&self) -> &Path {
        match self {
            Self::Outline { path, .. } | Self::Atlas { path, .. } => path,
        }
    }

    /// Short name of the section kind, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Outline { .. } => "outline",
            Self::Atlas { .. } => "atlas",
        }
    }
}

#[derive(Deserialize)]
struct RawDescription {
    rows: u32,
    output_type: Option<String>,
    sections: Vec<RawSection>,
}

/// Every parameter any section kind accepts; which ones are required depends
/// on `type`.
#[derive(Deserialize)]
struct RawSection {
    #[serde(rename = "type")]
    kind: String,
    path: Option<PathBuf>,
    font_size: Option<f32>,
    chars: Option<String>,
    col_width: Option<u32>,
    x_offset: Option<i32>,
    y_offset: Option<i32>,
    x_pad: Option<u32>,
    x_scale: Option<f32>,
    right_trim: Option<u32>,
    left_trim: Option<u32>,
    first_char: Option<u32>,
}

impl RawSection {
    fn into_section(self, index: usize, base: &Path) -> Result<Section, Error> {
        let missing = |name| Error::MissingParameter { index, name };
        let path = |path: Option<PathBuf>| {
            path.map(|path| base.join(path))
                .ok_or_else(|| missing("path"))
        };
        match self.kind.as_str() {
            "ttf" | "outline" => {
                let defaults = OutlineStyle::default();
                Ok(Section::Outline {
                    path: path(self.path)?,
                    chars: self.chars.ok_or_else(|| missing("chars"))?,
                    style: OutlineStyle {
                        font_size: self.font_size.ok_or_else(|| missing("font_size"))?,
                        col_width: self.col_width.unwrap_or(defaults.col_width),
                        x_offset: self.x_offset.unwrap_or(defaults.x_offset),
                        y_offset: self.y_offset.unwrap_or(defaults.y_offset),
                        x_pad: self.x_pad.unwrap_or(defaults.x_pad),
                        x_scale: self.x_scale,
                        right_trim: self.right_trim.unwrap_or(defaults.right_trim),
                        left_trim: self.left_trim.unwrap_or(defaults.left_trim),
                    },
                })
            }
            "image_grid" | "atlas" => Ok(Section::Atlas {
                path: path(self.path)?,
                col_width: self.col_width.ok_or_else(|| missing("col_width"))?,
                first_char: self.first_char.ok_or_else(|| missing("first_char"))?,
            }),
            _ => Err(Error::UnrecognizedSectionKind {
                index,
                kind: self.kind.clone(),
            }),
        }
    }
}

impl Description {
    /// Reads and parses the description at `path`.
    ///
    /// Section paths are resolved against the directory holding the file.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new(""));
        Self::parse(&text, base)
    }

    /// Parses a description, resolving relative section paths against `base`.
    pub fn parse(text: &str, base: &Path) -> Result<Self, Error> {
        let raw: RawDescription = serde_json::from_str(text)?;
        let output = raw
            .output_type
            .as_deref()
            .map(OutputTarget::from_str)
            .transpose()?;
        let sections = raw
            .sections
            .into_iter()
            .enumerate()
            .map(|(index, section)| section.into_section(index, base))
            .collect::<Result<_, _>>()?;
        Ok(Self {
            rows: raw.rows,
            output,
            sections,
        })
    }
}
