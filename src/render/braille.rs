//! Numeric values to braille dots, one dot per half-column.
//!
//! ### Workflow
//! 1. [`dot_for`] maps a value into pixel space: `height` character rows
//!    give `4 * height` vertical pixels, pixel 0 at the bottom.
//! 2. [`Canvas::plot`] drops one dot per sample into a row-major mask
//!    grid, left half-column for even sample indexes, right for odd.
//! 3. [`Canvas::line`] renders a mask row as braille scalars
//!    U+2800..U+28FF (`BRAILLE_BASE + mask`).
//!
//! The dot tables are indexed by sub-row *from the bottom of the cell*,
//! so `LEFT_DOTS[0]` is the lowest left dot and `LEFT_DOTS[3]` the
//! highest.

use crate::core::constants::{BRAILLE_BASE, BRAILLE_VERTICAL_RESOLUTION};
use crate::render::compress::Compressed;

/// Left half-column dots, bottom to top: ⡀ ⠄ ⠂ ⠁
pub const LEFT_DOTS: [u8; 4] = [0x40, 0x04, 0x02, 0x01];
/// Right half-column dots, bottom to top: ⢀ ⠠ ⠐ ⠈
pub const RIGHT_DOTS: [u8; 4] = [0x80, 0x20, 0x10, 0x08];

/// Axis tick in the left half-column (⠁).
pub const LEFT_TICK: u8 = 0x01;
/// Axis tick in the right half-column (⠈).
pub const RIGHT_TICK: u8 = 0x08;

/// Braille scalar for `mask`; the zero mask is the blank braille cell.
#[inline]
#[must_use]
pub fn glyph(mask: u8) -> char {
    char::from_u32(BRAILLE_BASE + u32::from(mask)).unwrap_or(' ')
}

/// Inverse of [`glyph`]; `None` for characters outside the braille block.
#[inline]
#[must_use]
pub fn mask_of(ch: char) -> Option<u8> {
    let scalar = u32::from(ch);
    scalar
        .checked_sub(BRAILLE_BASE)
        .and_then(|d| u8::try_from(d).ok())
}

/// Pixel position of `value`: `(cell_row, sub_row)` with `cell_row`
/// counted from the top and `sub_row` from the bottom of that cell.
///
/// A flat series (`max == min`) sits mid-scale.
#[must_use]
pub fn dot_for(value: f64, min: f64, max: f64, height: usize) -> (usize, usize) {
    let span = max - min;
    let normalized = if span > 0.0 {
        ((value - min) / span).clamp(0.0, 1.0)
    } else {
        0.5
    };
    let top = height * BRAILLE_VERTICAL_RESOLUTION - 1;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[allow(clippy::cast_sign_loss)]
    let pixel = ((normalized * top as f64) as usize).min(top);
    let cell = height - 1 - pixel / BRAILLE_VERTICAL_RESOLUTION;
    (cell, pixel % BRAILLE_VERTICAL_RESOLUTION)
}

/// Row-major mask grid for one chart body.
pub struct Canvas {
    width: usize,
    height: usize,
    masks: Vec<u8>,
}

impl Canvas {
    /// Plot every sample of `series`; sample `i` lands in column `i / 2`,
    /// even indexes on the left dots and odd on the right.
    #[must_use]
    pub fn plot(series: &Compressed, min: f64, max: f64, height: usize) -> Self {
        let width = series.cells();
        let mut canvas = Self {
            width,
            height,
            masks: vec![0; width * height],
        };
        for index in 0..series.unit_count() {
            let dots = if index % 2 == 0 { &LEFT_DOTS } else { &RIGHT_DOTS };
            let col = index / 2;
            for &value in series.group(index) {
                let (cell, sub) = dot_for(value, min, max, height);
                canvas.masks[cell * width + col] |= dots[sub];
            }
        }
        canvas
    }

    #[inline]
    #[must_use]
    pub fn mask(&self, row: usize, col: usize) -> u8 {
        self.masks[row * self.width + col]
    }

    /// Braille text for one row, top row first.
    #[must_use]
    pub fn line(&self, row: usize) -> String {
        (0..self.width).map(|col| glyph(self.mask(row, col))).collect()
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }
}
