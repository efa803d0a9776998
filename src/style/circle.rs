//! Halftone discs

use super::{CellPainter, Patch, StyleParams};
use crate::sample::CellSummary;

/// Painter for [`Style::Circle`](super::Style::Circle)
///
/// A pixel belongs to the disc when its center `(x + 0.5, y + 0.5)` lies
/// within the radius of the cell center.
#[derive(Debug, Clone, Copy, Default)]
pub struct Circle;

impl CellPainter for Circle {
    fn paint(&self, cell: &CellSummary, params: &StyleParams, patch: &mut Patch<'_>) {
        let strength = params.strength(cell);
        if strength <= 0.0 {
            return;
        }

        let (w, h) = (patch.width() as f32, patch.height() as f32);
        let radius = strength.sqrt() * w.min(h) / 2.0;
        let (cx, cy) = (w / 2.0, h / 2.0);
        let r2 = radius * radius;

        patch.fill_where(cell.color, |x, y| {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            dx * dx + dy * dy <= r2
        });
    }
}
