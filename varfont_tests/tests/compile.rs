// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Descriptions through to glyph sets.

use varfont::{ErrorKind, FontReader};
use varfont_gen::{build_glyph_set, Description, Error, OutputTarget};
use varfont_raster::{Axis, RasterError};

use crate::util::{Grid, Scratch};

const GRID: Grid = Grid {
    columns: 3,
    rows: 2,
    col_width: 5,
    cell_height: 8,
};

#[test]
fn compile_atlas_round_trip() {
    let scratch = Scratch::new("compile_atlas_round_trip");
    scratch.atlas("art/grid.png", GRID);
    let desc_path = scratch.write(
        "fonts/grid.json",
        r#"{
            "rows": 1,
            "output_type": "binary",
            "sections": [
                { "type": "image_grid", "path": "../art/grid.png", "col_width": 5, "first_char": 97 }
            ]
        }"#,
    );

    let desc = Description::load(&desc_path).unwrap();
    assert_eq!(desc.output, Some(OutputTarget::Binary));
    let set = build_glyph_set(&desc).unwrap();
    assert_eq!(set.len(), 6);

    let artifacts = OutputTarget::Binary.emit(&set, &desc_path).unwrap();
    assert_eq!(artifacts[0].path, scratch.path("fonts/grid.bin"));
    let reader = FontReader::new(&artifacts[0].contents).unwrap();
    assert_eq!(reader.rows(), 1);
    assert_eq!(reader.len(), 6);
    for cell in 0..GRID.cells() {
        let code = b'a' + cell as u8;
        assert_eq!(
            reader.glyph(code).unwrap(),
            GRID.expected(cell),
            "cell {cell}"
        );
    }
}

#[test]
fn compile_duplicate_code_across_sections() {
    let scratch = Scratch::new("compile_duplicate_code_across_sections");
    let grid = Grid {
        columns: 2,
        rows: 1,
        ..GRID
    };
    scratch.atlas("a.png", grid);
    scratch.atlas("b.png", grid);
    // The first section covers 'A' and 'B', the second '@' and 'A'.
    let desc_path = scratch.write(
        "dup.json",
        r#"{
            "rows": 1,
            "sections": [
                { "type": "image_grid", "path": "a.png", "col_width": 5, "first_char": 65 },
                { "type": "atlas", "path": "b.png", "col_width": 5, "first_char": 64 }
            ]
        }"#,
    );

    let desc = Description::load(&desc_path).unwrap();
    let err = build_glyph_set(&desc).unwrap_err();
    let Error::Section {
        index: 1,
        source: RasterError::Glyph(err),
    } = err
    else {
        panic!("unexpected error {err}");
    };
    assert_eq!(err.kind(), ErrorKind::DuplicateGlyph);
    assert_eq!(err.code(), Some(u32::from('A')));
    assert_eq!(scratch.listing(), ["a.png", "b.png", "dup.json"]);
}

#[test]
fn compile_atlas_height_not_a_multiple() {
    let scratch = Scratch::new("compile_atlas_height_not_a_multiple");
    scratch.atlas(
        "short.png",
        Grid {
            columns: 2,
            rows: 1,
            col_width: 5,
            cell_height: 12,
        },
    );
    let desc = Description::parse(
        r#"{ "rows": 1, "sections": [
            { "type": "image_grid", "path": "short.png", "col_width": 5, "first_char": 32 }
        ] }"#,
        &scratch.path(""),
    )
    .unwrap();

    let err = build_glyph_set(&desc).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Section {
                index: 0,
                source: RasterError::NotAMultiple {
                    axis: Axis::Height,
                    image: 12,
                    cell: 8,
                },
            }
        ),
        "unexpected error {err}"
    );
}

#[test]
fn compile_atlas_width_not_a_multiple() {
    let scratch = Scratch::new("compile_atlas_width_not_a_multiple");
    scratch.atlas("wide.png", GRID);
    let desc = Description::parse(
        r#"{ "rows": 1, "sections": [
            { "type": "image_grid", "path": "wide.png", "col_width": 4, "first_char": 32 }
        ] }"#,
        &scratch.path(""),
    )
    .unwrap();

    let err = build_glyph_set(&desc).unwrap_err();
    assert!(
        matches!(
            err,
            Error::Section {
                source: RasterError::NotAMultiple {
                    axis: Axis::Width,
                    image: 15,
                    cell: 4,
                },
                ..
            }
        ),
        "unexpected error {err}"
    );
}

#[test]
fn compile_unrecognized_section_kind() {
    let scratch = Scratch::new("compile_unrecognized_section_kind");
    let desc_path = scratch.write(
        "bad.json",
        r#"{ "rows": 1, "sections": [ { "type": "bdf", "path": "font.bdf" } ] }"#,
    );
    let err = Description::load(&desc_path).unwrap_err();
    assert!(matches!(err, Error::UnrecognizedSectionKind { index: 0, .. }));
    assert_eq!(
        err.to_string(),
        "section 0: unrecognized section type \"bdf\""
    );
}

#[test]
fn compile_missing_description() {
    let scratch = Scratch::new("compile_missing_description");
    let err = Description::load(&scratch.path("nope.json")).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn compile_too_many_glyphs() {
    let scratch = Scratch::new("compile_too_many_glyphs");
    // 16 x 16 cells starting at 0 would need codes 0..=255.
    scratch.atlas(
        "full.png",
        Grid {
            columns: 16,
            rows: 16,
            col_width: 1,
            cell_height: 8,
        },
    );
    let desc = Description::parse(
        r#"{ "rows": 1, "sections": [
            { "type": "image_grid", "path": "full.png", "col_width": 1, "first_char": 0 }
        ] }"#,
        &scratch.path(""),
    )
    .unwrap();
    let Err(Error::Section {
        source: RasterError::Glyph(err),
        ..
    }) = build_glyph_set(&desc)
    else {
        panic!("256 glyphs accepted");
    };
    assert_eq!(err.kind(), ErrorKind::TooManyGlyphs);
    assert_eq!(err.code(), Some(255));
}
