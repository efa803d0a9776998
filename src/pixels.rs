//! Owned RGBA pixel buffers passed between pipeline stages

use image::{Rgba, RgbaImage};

/// Fully transparent black, the default backdrop for rendered patches
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An owned rectangle of RGBA8 pixels.
///
/// The raw layout is row-major, 4 bytes per pixel, so
/// `width * height * 4 == as_raw().len()` always holds. Buffers produced by
/// the decoder are never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes. Returns `None` when the length does not match
    /// `width * height * 4`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        RgbaImage::from_raw(width, height, data).map(Self::from_image)
    }

    /// Wrap an `image` crate buffer.
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// A buffer filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba<u8>) -> Self {
        Self::from_image(RgbaImage::from_pixel(width, height, color))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True when the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Pixel at `(x, y)`. Panics when out of bounds, like `RgbaImage`.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.image.get_pixel(x, y)
    }

    /// Raw RGBA bytes, row-major
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.image.into_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self::from_image(image)
    }
}
