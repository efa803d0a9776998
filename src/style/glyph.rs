//! Glyph density ramp rendered from a built-in 5x7 bitmap font

use super::{CellPainter, Patch, StyleParams};
use crate::sample::CellSummary;

/// Characters from emptiest to densest
pub const GLYPH_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

/// One row per entry, most significant of the low 5 bits is the leftmost column
const GLYPHS: [[u8; GLYPH_HEIGHT as usize]; 10] = [
    // ' '
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
    // '.'
    [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
    // ':'
    [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
    // '-'
    [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
    // '='
    [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
    // '+'
    [0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000],
    // '*'
    [0b00000, 0b10101, 0b01110, 0b11111, 0b01110, 0b10101, 0b00000],
    // '#'
    [0b01010, 0b01010, 0b11111, 0b01010, 0b11111, 0b01010, 0b01010],
    // '%'
    [0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011],
    // '@'
    [0b01110, 0b10001, 0b10111, 0b10101, 0b10111, 0b10000, 0b01111],
];

/// Index into [`GLYPH_RAMP`] for a dot strength in `[0, 1]`.
pub fn ramp_index(strength: f32) -> usize {
    let last = GLYPH_RAMP.len() - 1;
    ((strength.clamp(0.0, 1.0) * last as f32).round() as usize).min(last)
}

/// Whether the glyph at `index` sets the font pixel `(gx, gy)`
fn glyph_bit(index: usize, gx: u32, gy: u32) -> bool {
    let row = GLYPHS[index][gy as usize];
    (row >> (GLYPH_WIDTH - 1 - gx)) & 1 == 1
}

/// Painter for [`Style::Ascii`](super::Style::Ascii)
///
/// The glyph is scaled nearest-neighbour to fill the cell.
#[derive(Debug, Clone, Copy, Default)]
pub struct Glyph;

impl CellPainter for Glyph {
    fn paint(&self, cell: &CellSummary, params: &StyleParams, patch: &mut Patch<'_>) {
        let index = ramp_index(params.strength(cell));
        if index == 0 {
            return;
        }

        let (w, h) = (patch.width(), patch.height());
        patch.fill_where(cell.color, |x, y| {
            let gx = (x * GLYPH_WIDTH / w).min(GLYPH_WIDTH - 1);
            let gy = (y * GLYPH_HEIGHT / h).min(GLYPH_HEIGHT - 1);
            glyph_bit(index, gx, gy)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::testing::{cell, inked, paint};
    use crate::style::Polarity;
    use image::Rgba;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_ramp_index() {
        assert_eq!(ramp_index(0.0), 0);
        assert_eq!(ramp_index(1.0), 9);
        assert_eq!(ramp_index(0.5), 5);
        assert_eq!(ramp_index(-3.0), 0);
    }

    #[test]
    fn test_glyph_rows_fit_width() {
        for glyph in GLYPHS {
            for row in glyph {
                assert!(row < 1 << GLYPH_WIDTH);
            }
        }
    }

    #[test]
    fn test_blank_for_white_with_ink() {
        let params = StyleParams { background: WHITE, polarity: Polarity::Ink };
        let image = paint(&Glyph, &cell([255, 255, 255, 255]), &params, 10, 14);
        assert_eq!(inked(&image, WHITE), 0);
    }

    #[test]
    fn test_at_sign_for_black() {
        let params = StyleParams { background: WHITE, polarity: Polarity::Ink };
        // Exactly 2x scale of the 5x7 font
        let image = paint(&Glyph, &cell([0, 0, 0, 255]), &params, 10, 14);
        let set_bits: u32 = GLYPHS[9].iter().map(|row| row.count_ones()).sum();
        assert_eq!(inked(&image, WHITE) as u32, set_bits * 4);
        // Top-left font pixel of '@' is clear, the one next to it is set
        assert_eq!(*image.get_pixel(0, 0), WHITE);
        assert_eq!(*image.get_pixel(2, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_glyph_uses_cell_color() {
        let params = StyleParams { background: WHITE, polarity: Polarity::Ink };
        let image = paint(&Glyph, &cell([200, 0, 0, 255]), &params, 5, 7);
        assert!(image.pixels().any(|p| *p == Rgba([200, 0, 0, 255])));
        assert!(image.pixels().all(|p| *p == WHITE || *p == Rgba([200, 0, 0, 255])));
    }
}
