//! Letterboxing onto a fixed square canvas
//!
//! Fitting every input onto the same canvas makes `dots` meaningful: a
//! 512 pixel canvas with 32 dots per side always yields 16 pixel cells,
//! whatever the source resolution. When `dots` does not divide the canvas
//! the fitted image is cropped to the `dots` cells that fit.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::pixels::PixelBuffer;

/// Size of the fitted image inside a `size x size` canvas, preserving the
/// source aspect ratio. Neither side is ever smaller than one pixel.
pub fn fitted_dimensions(width: u32, height: u32, size: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (size, size);
    }
    let aspect = width as f64 / height as f64;
    let (w, h) = if aspect > 1.0 {
        // Landscape
        (size, (size as f64 / aspect) as u32)
    } else {
        // Portrait or square
        ((size as f64 * aspect) as u32, size)
    };
    (w.clamp(1, size), h.clamp(1, size))
}

/// Resize `source` to fit a `size x size` canvas filled with `backdrop`,
/// centered and composited over the backdrop.
pub fn fit_to_canvas(source: &PixelBuffer, size: u32, backdrop: Rgba<u8>) -> PixelBuffer {
    let (width, height) = fitted_dimensions(source.width(), source.height(), size);
    let resized = if (width, height) == source.dimensions() {
        source.as_image().clone()
    } else {
        imageops::resize(source.as_image(), width, height, FilterType::Lanczos3)
    };

    let mut canvas = RgbaImage::from_pixel(size, size, backdrop);
    let x = (size - width) / 2;
    let y = (size - height) / 2;
    imageops::overlay(&mut canvas, &resized, x as i64, y as i64);

    tracing::debug!(
        source_width = source.width(),
        source_height = source.height(),
        width,
        height,
        size,
        "fitted image to canvas"
    );

    PixelBuffer::from_image(canvas)
}

/// Keep only the top-left `side x side` square of a fitted canvas.
pub fn crop_to_grid(canvas: PixelBuffer, side: u32) -> PixelBuffer {
    if side >= canvas.width() && side >= canvas.height() {
        return canvas;
    }
    let (width, height) = (side.min(canvas.width()), side.min(canvas.height()));
    PixelBuffer::from_image(imageops::crop_imm(canvas.as_image(), 0, 0, width, height).to_image())
}
