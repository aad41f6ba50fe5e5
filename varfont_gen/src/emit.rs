// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Output formats.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use varfont::{Bitmap, FontBlob, GlyphSet, MAGIC};

use crate::Error;

/// Encoded bytes per line of C source.
const BYTES_PER_LINE: usize = 16;

/// What a compiled glyph set is turned into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// The raw blob, as `<out>.bin`.
    Binary,
    /// A C array holding the blob, as `<out>.c` with a matching `<out>.h`.
    CSource,
    /// ASCII art of every glyph, as `<out>.txt`.
    Debug,
}

impl FromStr for OutputTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "binary" | "bin" => Ok(Self::Binary),
            "VariableFont" | "c" => Ok(Self::CSource),
            "debug" => Ok(Self::Debug),
            _ => Err(Error::UnrecognizedOutputKind(s.to_owned())),
        }
    }
}

/// A file to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    /// Where it goes.
    pub path: PathBuf,
    /// What goes in it.
    pub contents: Vec<u8>,
}

impl OutputTarget {
    /// Produces the files for `set`, named after `out` with the extension
    /// replaced.
    ///
    /// Nothing is written; every file is built in memory first so that a
    /// failure leaves no partial output behind.
    pub fn emit(self, set: &GlyphSet, out: &Path) -> Result<Vec<Artifact>, Error> {
        match self {
            Self::Binary => {
                let blob = FontBlob::compile(set)?;
                log::info!("compiled {} glyphs into {} bytes", set.len(), blob.len());
                Ok(vec![Artifact {
                    path: out.with_extension("bin"),
                    contents: blob.to_bytes(),
                }])
            }
            Self::CSource => {
                let blob = FontBlob::compile(set)?;
                log::info!("compiled {} glyphs into {} bytes", set.len(), blob.len());
                let name = c_identifier(out);
                let source = CSource {
                    name: &name,
                    blob: &blob,
                    set,
                };
                let header = CHeader { name: &name };
                Ok(vec![
                    Artifact {
                        path: out.with_extension("c"),
                        contents: source.to_string().into_bytes(),
                    },
                    Artifact {
                        path: out.with_extension("h"),
                        contents: header.to_string().into_bytes(),
                    },
                ])
            }
            Self::Debug => Ok(vec![Artifact {
                path: out.with_extension("txt"),
                contents: debug_dump(set.iter().map(|glyph| (glyph.code(), glyph.bitmap())))
                    .into_bytes(),
            }]),
        }
    }
}

/// Renders glyphs as `*`/`.` art, each preceded by a blank line and its
/// character.
pub fn debug_dump<'a>(glyphs: impl IntoIterator<Item = (u8, &'a Bitmap)>) -> String {
    glyphs
        .into_iter()
        .map(|(code, bitmap)| format!("\n{}:\n{}", CharLabel(code), bitmap.to_ascii('*', '.')))
        .collect()
}

/// The C array name for output `out`: its file stem, with anything that
/// cannot appear in an identifier replaced by `_`.
pub fn c_identifier(out: &Path) -> String {
    let stem = out
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    let mut name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if !name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') {
        name.insert(0, '_');
    }
    name
}

fn is_printable(code: u8) -> bool {
    (0x20..0x7F).contains(&code)
}

/// A character as it appears in debug output.
struct CharLabel(u8);

impl fmt::Display for CharLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if is_printable(self.0) {
            write!(f, "{}", char::from(self.0))
        } else {
            write!(f, "0x{:02X}", self.0)
        }
    }
}

/// A character code as a C expression.
struct CChar(u8);

impl fmt::Display for CChar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            b'\'' => f.write_str(r"'\''"),
            b'\\' => f.write_str(r"'\\'"),
            code if is_printable(code) => write!(f, "'{}'", char::from(code)),
            code => write!(f, "{code}"),
        }
    }
}

struct CSource<'a> {
    name: &'a str,
    blob: &'a FontBlob,
    set: &'a GlyphSet,
}

impl fmt::Display for CSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyphs = self.blob.glyphs();
        writeln!(f, "// Generated font data for {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "#include <inttypes.h>")?;
        writeln!(f, "#include <avr/pgmspace.h>")?;
        writeln!(f)?;
        writeln!(f, "const uint8_t {}[] PROGMEM = {{", self.name)?;
        let [m0, m1, m2, m3] = MAGIC;
        writeln!(
            f,
            "    0x{m0:02X}, 0x{m1:02X}, 0x{m2:02X}, 0x{m3:02X},  // id: VAR1"
        )?;
        writeln!(f, "    0x{:02X}, // num_chars", glyphs.len())?;
        writeln!(f, "    0x{:02X}, // height", self.blob.rows())?;
        writeln!(f)?;

        writeln!(f, "    // Character offsets")?;
        for glyph in glyphs {
            let entry = glyph.entry;
            let [hi, lo] = entry.offset.to_be_bytes();
            writeln!(
                f,
                "    {}, {}, 0x{hi:02X}, 0x{lo:02X},  // off={}",
                CChar(entry.code),
                entry.width,
                entry.offset
            )?;
        }

        writeln!(f, "    // Character data")?;
        for (glyph, encoded) in self.set.iter().zip(glyphs) {
            let code = glyph.code();
            write!(f, "    // Character {code} (0x{code:02X})")?;
            if is_printable(code) {
                write!(f, " ({})", char::from(code))?;
            }
            writeln!(f)?;
            for line in glyph.bitmap().to_ascii('#', '-').lines() {
                writeln!(f, "    // {line}")?;
            }
            for chunk in encoded.data.chunks(BYTES_PER_LINE) {
                f.write_str("    ")?;
                for (i, byte) in chunk.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "0x{byte:02X}")?;
                }
                writeln!(f, ",")?;
            }
        }
        writeln!(f, "}};")
    }
}

struct CHeader<'a> {
    name: &'a str,
}

impl fmt::Display for CHeader<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = format!("{}_H", self.name.to_ascii_uppercase());
        writeln!(f, "#ifndef {guard}")?;
        writeln!(f, "#define {guard}")?;
        writeln!(f, "// Generated font data for {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "#include <inttypes.h>")?;
        writeln!(f, "#include <avr/pgmspace.h>")?;
        writeln!(f)?;
        writeln!(f, "extern const uint8_t {}[] PROGMEM;", self.name)?;
        writeln!(f)?;
        writeln!(f, "#endif  // {guard}")
    }
}

#[cfg(test)]
mod tests {
    use super::{c_identifier, debug_dump, CChar, CharLabel, OutputTarget};
    use crate::Error;
    use std::path::Path;
    use varfont::{Bitmap, Glyph, GlyphSet};

    fn small_set() -> GlyphSet {
        let mut set = GlyphSet::new(1).unwrap();
        let bar = Bitmap::from_fn(2, 8, |x, _| x == 0);
        set.insert(Glyph::new(u32::from('|'), bar).unwrap()).unwrap();
        set.insert(Glyph::new(7, Bitmap::new(1, 8)).unwrap())
            .unwrap();
        set
    }

    #[test]
    fn output_kinds() {
        let parse = |s: &str| s.parse::<OutputTarget>().unwrap();
        assert_eq!(parse("VariableFont"), OutputTarget::CSource);
        assert_eq!(parse("binary"), OutputTarget::Binary);
        assert_eq!(parse("debug"), OutputTarget::Debug);
        assert!(matches!(
            "png".parse::<OutputTarget>(),
            Err(Error::UnrecognizedOutputKind(_))
        ));
    }

    #[test]
    fn identifiers() {
        assert_eq!(c_identifier(Path::new("out/font-5x8.v2.json")), "font_5x8_v2");
        assert_eq!(c_identifier(Path::new("7seg.json")), "_7seg");
    }

    #[test]
    fn c_chars() {
        assert_eq!(CChar(b'A').to_string(), "'A'");
        assert_eq!(CChar(b' ').to_string(), "' '");
        assert_eq!(CChar(b'\'').to_string(), r"'\''");
        assert_eq!(CChar(b'\\').to_string(), r"'\\'");
        assert_eq!(CChar(0x7F).to_string(), "127");
        assert_eq!(CChar(3).to_string(), "3");
    }

    #[test]
    fn char_labels() {
        assert_eq!(CharLabel(b'A').to_string(), "A");
        assert_eq!(CharLabel(b' ').to_string(), " ");
        assert_eq!(CharLabel(b'~').to_string(), "~");
        assert_eq!(CharLabel(0x0A).to_string(), "0x0A");
        assert_eq!(CharLabel(0x7F).to_string(), "0x7F");
        assert_eq!(CharLabel(0xE9).to_string(), "0xE9");
    }

    #[test]
    fn debug_format() {
        let set = small_set();
        let text = debug_dump(set.iter().map(|glyph| (glyph.code(), glyph.bitmap())));
        let expected = format!("\n0x07:\n{}\n|:\n{}", ".\n".repeat(8), "*.\n".repeat(8));
        assert_eq!(text, expected);
    }

    #[test]
    fn binary_blob() {
        let artifacts = OutputTarget::Binary
            .emit(&small_set(), Path::new("build/tiny.json"))
            .unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].path, Path::new("build/tiny.bin"));
        // Glyph 7 is one blank column, a single repeat. '|' has two different
        // columns, a single literal.
        assert_eq!(
            artifacts[0].contents,
            [
                b'V', b'A', b'R', b'1', 2, 1, //
                7, 1, 0, 8, //
                b'|', 2, 0, 10, //
                1, 0, //
                0x82, 0xFF, 0x00,
            ]
        );
    }

    #[test]
    fn c_source_and_header() {
        let artifacts = OutputTarget::CSource
            .emit(&small_set(), Path::new("tiny-font.json"))
            .unwrap();
        assert_eq!(artifacts[0].path, Path::new("tiny-font.c"));
        assert_eq!(artifacts[1].path, Path::new("tiny-font.h"));

        let source = String::from_utf8(artifacts[0].contents.clone()).unwrap();
        let mut expected = String::from(
            "// Generated font data for tiny_font\n\
             \n\
             #include <inttypes.h>\n\
             #include <avr/pgmspace.h>\n\
             \n\
             const uint8_t tiny_font[] PROGMEM = {\n    \
             0x56, 0x41, 0x52, 0x31,  // id: VAR1\n    \
             0x02, // num_chars\n    \
             0x01, // height\n\
             \n    \
             // Character offsets\n    \
             7, 1, 0x00, 0x08,  // off=8\n    \
             '|', 2, 0x00, 0x0A,  // off=10\n    \
             // Character data\n    \
             // Character 7 (0x07)\n",
        );
        expected.push_str(&"    // -\n".repeat(8));
        expected.push_str("    0x01, 0x00,\n    // Character 124 (0x7C) (|)\n");
        expected.push_str(&"    // #-\n".repeat(8));
        expected.push_str("    0x82, 0xFF, 0x00,\n};\n");
        assert_eq!(source, expected);

        let header = String::from_utf8(artifacts[1].contents.clone()).unwrap();
        assert!(header.starts_with("#ifndef TINY_FONT_H\n#define TINY_FONT_H\n"));
        assert!(header.contains("extern const uint8_t tiny_font[] PROGMEM;\n"));
        assert!(header.ends_with("#endif  // TINY_FONT_H\n"));
    }

    #[test]
    fn long_data_wraps_at_sixteen_bytes() {
        let mut set = GlyphSet::new(1).unwrap();
        // Alternating columns never repeat, so 20 columns encode as one
        // 21 byte literal.
        let zigzag = Bitmap::from_fn(20, 8, |x, y| (x + y) % 2 == 0);
        set.insert(Glyph::new(u32::from('z'), zigzag).unwrap())
            .unwrap();
        let artifacts = OutputTarget::CSource
            .emit(&set, Path::new("z.json"))
            .unwrap();
        let source = String::from_utf8(artifacts[0].contents.clone()).unwrap();
        let data: Vec<&str> = source
            .lines()
            .filter(|line| line.starts_with("    0x") && !line.contains("//"))
            .collect();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].matches("0x").count(), 16);
        assert!(data[0].starts_with("    0x94, 0x55, 0xAA, 0x55,"));
        assert_eq!(data[1].matches("0x").count(), 5);
    }

    #[test]
    fn empty_set_has_no_blob() {
        let set = GlyphSet::new(1).unwrap();
        let err = OutputTarget::Binary
            .emit(&set, Path::new("x"))
            .unwrap_err();
        assert!(matches!(err, Error::Font(_)));
        let debug = OutputTarget::Debug.emit(&set, Path::new("x")).unwrap();
        assert!(debug[0].contents.is_empty());
    }
}
