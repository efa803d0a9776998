//! Centered diamond dots

use super::{CellPainter, Patch, StyleParams};
use crate::sample::CellSummary;

/// Painter for [`Style::Diamond`](super::Style::Diamond)
#[derive(Debug, Clone, Copy, Default)]
pub struct Diamond;

impl CellPainter for Diamond {
    fn paint(&self, cell: &CellSummary, params: &StyleParams, patch: &mut Patch<'_>) {
        let strength = params.strength(cell);
        if strength <= 0.0 {
            return;
        }

        let (w, h) = (patch.width() as f32, patch.height() as f32);
        let reach = strength.sqrt() * w.min(h) / 2.0;
        let (cx, cy) = (w / 2.0, h / 2.0);

        patch.fill_where(cell.color, |x, y| {
            (x as f32 + 0.5 - cx).abs() + (y as f32 + 0.5 - cy).abs() <= reach
        });
    }
}
