//! Centered square dots

use super::{CellPainter, Patch, StyleParams};
use crate::sample::CellSummary;

/// Painter for [`Style::Square`](super::Style::Square)
#[derive(Debug, Clone, Copy, Default)]
pub struct Square;

impl CellPainter for Square {
    fn paint(&self, cell: &CellSummary, params: &StyleParams, patch: &mut Patch<'_>) {
        let strength = params.strength(cell);
        if strength <= 0.0 {
            return;
        }

        let (w, h) = (patch.width(), patch.height());
        let side = ((strength.sqrt() * w.min(h) as f32).round() as u32).min(w.min(h));
        let left = (w - side) / 2;
        let top = (h - side) / 2;

        patch.fill_where(cell.color, |x, y| {
            x >= left && x < left + side && y >= top && y < top + side
        });
    }
}
