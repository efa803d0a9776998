//! Grid sampling: reduce each cell of a pixel buffer to one summary
//!
//! The image is partitioned into `cols x rows` cells of `cell_size` pixels.
//! A cell size larger than the image is clamped to the image dimension, so
//! there is always at least one cell. The last column and row may be
//! narrower remainder cells; they are summarized over the pixels actually
//! present, never over padding.
//!
//! Rows of cells are independent and are summarized in parallel; the result
//! is always collected in row-major order.

use std::collections::HashMap;

use clap::ValueEnum;
use image::Rgba;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::luminance;
use crate::pixels::PixelBuffer;

/// How the pixels of one cell are reduced to a single color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    /// Alpha-weighted mean of the color channels, straight mean of alpha
    #[default]
    Average,
    /// Most frequent exact RGBA value; ties go to the value seen first
    Dominant,
}

impl Reduction {
    /// Parse a reduction name
    pub fn from_str(s: &str) -> Option<Reduction> {
        match s.to_lowercase().as_str() {
            "average" | "mean" => Some(Reduction::Average),
            "dominant" | "mode" => Some(Reduction::Dominant),
            _ => None,
        }
    }
}

impl std::fmt::Display for Reduction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reduction::Average => write!(f, "average"),
            Reduction::Dominant => write!(f, "dominant"),
        }
    }
}

/// Error produced while sampling
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("cell size must be a positive integer, got {0}")]
    InvalidCellSize(u32),
}

/// The reduced value of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSummary {
    /// Column index in the grid
    pub col: u32,
    /// Row index in the grid
    pub row: u32,
    /// Source pixels actually covered (smaller than the cell for remainder cells)
    pub width: u32,
    pub height: u32,
    /// Representative color
    pub color: Rgba<u8>,
    /// Perceptual luminance of `color`, in `[0, 1]`
    pub luminance: f32,
    /// Mean alpha of the covered pixels, in `[0, 1]`
    pub coverage: f32,
}

/// Cell summaries of a sampled image, in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cols: u32,
    rows: u32,
    cell_width: u32,
    cell_height: u32,
    cells: Vec<CellSummary>,
}

impl Grid {
    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Effective cell width after clamping to the image width
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Effective cell height after clamping to the image height
    pub fn cell_height(&self) -> u32 {
        self.cell_height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[CellSummary] {
        &self.cells
    }

    /// Summaries of one row of cells
    pub fn row(&self, row: u32) -> &[CellSummary] {
        let start = (row * self.cols) as usize;
        &self.cells[start..start + self.cols as usize]
    }

    pub fn get(&self, col: u32, row: u32) -> Option<&CellSummary> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get((row * self.cols + col) as usize)
    }

    /// Size of a rendering where every cell, remainders included, is drawn
    /// at full cell size.
    pub fn output_dimensions(&self) -> (u32, u32) {
        (self.cols * self.cell_width, self.rows * self.cell_height)
    }
}

/// Partition `buffer` into cells and summarize each one.
///
/// # Errors
///
/// Returns [`SampleError::InvalidCellSize`] when `cell_size` is zero.
///
/// # Examples
///
/// ```
/// use dotart::pixels::PixelBuffer;
/// use dotart::sample::{summarize, Reduction};
///
/// let buffer = PixelBuffer::solid(10, 7, image::Rgba([0, 0, 0, 255]));
/// let grid = summarize(&buffer, 4, Reduction::Average).unwrap();
/// assert_eq!((grid.cols(), grid.rows()), (3, 2));
/// assert_eq!(grid.len(), 6);
/// ```
pub fn summarize(
    buffer: &PixelBuffer,
    cell_size: u32,
    reduction: Reduction,
) -> Result<Grid, SampleError> {
    if cell_size == 0 {
        return Err(SampleError::InvalidCellSize(cell_size));
    }

    let (width, height) = buffer.dimensions();
    let cell_width = cell_size.min(width).max(1);
    let cell_height = cell_size.min(height).max(1);
    let cols = width.div_ceil(cell_width);
    let rows = height.div_ceil(cell_height);

    tracing::trace!(cols, rows, cell_width, cell_height, %reduction, "sampling grid");

    let cells: Vec<CellSummary> = (0..rows)
        .into_par_iter()
        .flat_map_iter(|row| {
            (0..cols).map(move |col| {
                let x0 = col * cell_width;
                let y0 = row * cell_height;
                let x1 = (x0 + cell_width).min(width);
                let y1 = (y0 + cell_height).min(height);
                let (color, coverage) = match reduction {
                    Reduction::Average => average_color(buffer, x0..x1, y0..y1),
                    Reduction::Dominant => {
                        let color = dominant_color(buffer, x0..x1, y0..y1);
                        (color, color[3] as f32 / 255.0)
                    }
                };
                CellSummary {
                    col,
                    row,
                    width: x1 - x0,
                    height: y1 - y0,
                    color,
                    luminance: luminance(color),
                    coverage,
                }
            })
        })
        .collect();

    Ok(Grid { cols, rows, cell_width, cell_height, cells })
}

/// Rounded integer division
fn div_round(numerator: u64, denominator: u64) -> u8 {
    ((numerator + denominator / 2) / denominator).min(255) as u8
}

fn average_color(
    buffer: &PixelBuffer,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
) -> (Rgba<u8>, f32) {
    let mut plain = [0u64; 3];
    let mut weighted = [0u64; 3];
    let mut alpha = 0u64;
    let mut count = 0u64;

    for y in ys {
        for x in xs.clone() {
            let p = buffer.pixel(x, y);
            let a = p[3] as u64;
            for c in 0..3 {
                plain[c] += p[c] as u64;
                weighted[c] += p[c] as u64 * a;
            }
            alpha += a;
            count += 1;
        }
    }

    if count == 0 {
        return (crate::pixels::TRANSPARENT, 0.0);
    }

    // Fully transparent cells keep their straight mean so the color is not lost
    let channel = |c: usize| {
        if alpha > 0 {
            div_round(weighted[c], alpha)
        } else {
            div_round(plain[c], count)
        }
    };

    let coverage = alpha as f32 / (count * 255) as f32;
    (Rgba([channel(0), channel(1), channel(2), div_round(alpha, count)]), coverage)
}

fn dominant_color(
    buffer: &PixelBuffer,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
) -> Rgba<u8> {
    // color -> (count, first seen)
    let mut counts: HashMap<[u8; 4], (u32, u32)> = HashMap::new();
    let mut seen = 0u32;

    for y in ys {
        for x in xs.clone() {
            let entry = counts.entry(buffer.pixel(x, y).0).or_insert((0, seen));
            entry.0 += 1;
            seen += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(color, _)| Rgba(color))
        .unwrap_or(crate::pixels::TRANSPARENT)
}
