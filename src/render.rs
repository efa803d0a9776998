//! Compositing cell patches into the output buffer
//!
//! The output is `cols * cell_width` by `rows * cell_height` pixels: remainder
//! cells at the right and bottom edges are drawn at full cell size so that
//! every dot sits on a uniform grid.
//!
//! Each row of cells owns a disjoint band of output rows, so bands are
//! painted in parallel without locking.

use image::RgbaImage;
use rayon::prelude::*;

use crate::pixels::PixelBuffer;
use crate::sample::Grid;
use crate::style::{Patch, Style, StyleParams};

/// Draw every cell of `grid` in `style`.
///
/// # Examples
///
/// ```
/// use dotart::pixels::PixelBuffer;
/// use dotart::render::render;
/// use dotart::sample::{summarize, Reduction};
/// use dotart::style::{Style, StyleParams};
///
/// let source = PixelBuffer::solid(6, 4, image::Rgba([0, 0, 0, 255]));
/// let grid = summarize(&source, 2, Reduction::Average).unwrap();
/// let output = render(&grid, Style::Square, &StyleParams::default());
/// assert_eq!(output.dimensions(), (6, 4));
/// ```
pub fn render(grid: &Grid, style: Style, params: &StyleParams) -> PixelBuffer {
    let (width, height) = grid.output_dimensions();
    let mut image = RgbaImage::from_pixel(width, height, params.background);
    if grid.is_empty() {
        return PixelBuffer::from_image(image);
    }

    let painter = style.painter();
    let cell_width = grid.cell_width();
    let cell_height = grid.cell_height();
    let stride = width as usize * 4;
    let band_len = stride * cell_height as usize;

    let data: &mut [u8] = &mut image;
    data.par_chunks_mut(band_len).enumerate().for_each(|(row, band)| {
        for cell in grid.row(row as u32) {
            let mut patch =
                Patch::new(band, stride, cell.col * cell_width, cell_width, cell_height);
            painter.paint(cell, params, &mut patch);
        }
    });

    tracing::debug!(%style, width, height, cells = grid.len(), "rendered dot art");

    PixelBuffer::from_image(image)
}
