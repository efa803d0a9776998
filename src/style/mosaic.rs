//! Flat mosaic: the whole cell takes the cell color

use super::{CellPainter, Patch, StyleParams};
use crate::sample::CellSummary;

/// Painter for [`Style::Pixel`](super::Style::Pixel)
#[derive(Debug, Clone, Copy, Default)]
pub struct Mosaic;

impl CellPainter for Mosaic {
    fn paint(&self, cell: &CellSummary, _params: &StyleParams, patch: &mut Patch<'_>) {
        patch.fill_where(cell.color, |_, _| true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::testing::{cell, paint};
    use image::Rgba;

    #[test]
    fn test_fills_whole_cell() {
        let params = StyleParams { background: Rgba([255, 255, 255, 255]), ..Default::default() };
        let image = paint(&Mosaic, &cell([10, 200, 30, 255]), &params, 3, 5);
        assert!(image.pixels().all(|p| *p == Rgba([10, 200, 30, 255])));
    }

    #[test]
    fn test_ignores_luminance() {
        let params = StyleParams::default();
        let white = paint(&Mosaic, &cell([255, 255, 255, 255]), &params, 4, 4);
        assert!(white.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }
}
