// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::io;
use std::path::PathBuf;

use varfont_raster::RasterError;

/// Errors produced while loading a description or compiling it.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// A file could not be read.
    Io {
        /// The file.
        path: PathBuf,
        /// The underlying failure.
        source: io::Error,
    },
    /// The description is not valid JSON or has fields of the wrong type.
    Parse(serde_json::Error),
    /// A section's `type` is not one of the known kinds.
    UnrecognizedSectionKind {
        /// Position of the section in the description.
        index: usize,
        /// The rejected kind.
        kind: String,
    },
    /// The requested output kind is not one of the known kinds.
    UnrecognizedOutputKind(String),
    /// A section lacks a parameter its kind requires.
    MissingParameter {
        /// Position of the section in the description.
        index: usize,
        /// The parameter name.
        name: &'static str,
    },
    /// A section failed to produce its glyphs.
    Section {
        /// Position of the section in the description.
        index: usize,
        /// The underlying failure.
        source: RasterError,
    },
    /// The glyphs do not form a valid font.
    Font(varfont::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Parse(err) => write!(f, "invalid description: {err}"),
            Self::UnrecognizedSectionKind { index, kind } => {
                write!(f, "section {index}: unrecognized section type {kind:?}")
            }
            Self::UnrecognizedOutputKind(kind) => {
                write!(f, "unrecognized output type {kind:?}")
            }
            Self::MissingParameter { index, name } => {
                write!(f, "section {index}: missing parameter `{name}`")
            }
            Self::Section { index, source } => write!(f, "section {index}: {source}"),
            Self::Font(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Section { source, .. } => Some(source),
            Self::Font(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<varfont::Error> for Error {
    fn from(err: varfont::Error) -> Self {
        Self::Font(err)
    }
}
