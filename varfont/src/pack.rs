// Copyright 2025 the Varfont Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column packing: one byte per (row-group, column) pair.
//!
//! Row-groups are the outer loop and columns the inner one. Within a byte,
//! bit `k` is the pixel `k` rows below the top of the row-group. The display
//! driver walks the data in exactly this order, so it must not change.

use alloc::vec::Vec;

use crate::Bitmap;

/// Packs a bitmap whose height is a multiple of 8 into column bytes.
///
/// The result holds `height / 8 * width` bytes.
pub fn pack_columns(bitmap: &Bitmap) -> Vec<u8> {
    let rows = bitmap.height() / 8;
    let mut out = Vec::with_capacity(rows as usize * bitmap.width() as usize);
    for row in 0..rows {
        for x in 0..bitmap.width() {
            let mut byte = 0_u8;
            for bit in 0..8 {
                if bitmap.get(x, row * 8 + bit) {
                    byte |= 1 << bit;
                }
            }
            out.push(byte);
        }
    }
    out
}

/// Rebuilds a `width` by `rows * 8` bitmap from column bytes.
///
/// Missing trailing bytes leave their pixels off; extra bytes are ignored.
pub fn unpack_columns(data: &[u8], width: u32, rows: u32) -> Bitmap {
    let mut bitmap = Bitmap::new(width, rows * 8);
    let mut bytes = data.iter();
    for row in 0..rows {
        for x in 0..width {
            let Some(&byte) = bytes.next() else {
                return bitmap;
            };
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    bitmap.set(x, row * 8 + bit, true);
                }
            }
        }
    }
    bitmap
}

#[cfg(test)]
mod tests {
    use super::{pack_columns, unpack_columns};
    use crate::Bitmap;

    #[test]
    fn row_group_major_order() {
        // 2 columns, 2 row-groups: a single pixel in each quadrant.
        let mut bitmap = Bitmap::new(2, 16);
        bitmap.set(0, 0, true);
        bitmap.set(1, 7, true);
        bitmap.set(0, 9, true);
        bitmap.set(1, 15, true);
        assert_eq!(pack_columns(&bitmap), [0x01, 0x80, 0x02, 0x80]);
    }

    #[test]
    fn full_column() {
        let bitmap = Bitmap::from_fn(3, 8, |x, _| x == 1);
        assert_eq!(pack_columns(&bitmap), [0x00, 0xFF, 0x00]);
    }

    #[test]
    fn unpack_restores_pixels() {
        let bitmap = Bitmap::from_fn(5, 24, |x, y| (x * 7 + y * 3) % 5 == 0);
        let packed = pack_columns(&bitmap);
        assert_eq!(packed.len(), 15);
        assert_eq!(unpack_columns(&packed, 5, 3), bitmap);
    }

    #[test]
    fn unpack_short_data() {
        let bitmap = unpack_columns(&[0xFF], 2, 1);
        assert!(bitmap.get(0, 3));
        assert!(!bitmap.get(1, 3));
    }
}
