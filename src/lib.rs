//! dotart - Library for turning raster images into dot art
//!
//! This library provides functionality to:
//! - Decode PNG, JPEG, GIF and BMP bytes into RGBA pixels
//! - Reduce the image to a grid of cell colors
//! - Redraw every cell as a halftone dot, square, diamond, mosaic tile or glyph
//! - Encode the result as PNG
//!
//! ```
//! use dotart::{generate, DotArtOptions};
//!
//! let image = image::RgbaImage::from_pixel(16, 16, image::Rgba([0, 0, 0, 255]));
//! let mut png = Vec::new();
//! image::DynamicImage::ImageRgba8(image)
//!     .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
//!     .unwrap();
//!
//! let art = generate("circle", &png, &DotArtOptions::default().with_cell_size(4)).unwrap();
//! assert_eq!(art.dimensions(), (16, 16));
//! ```

pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod options;
pub mod output;
pub mod pixels;
pub mod render;
pub mod sample;
pub mod style;
pub mod suggest;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use engine::{generate, Engine};
pub use error::{ErrorKind, GenerateError, Stage};
pub use options::DotArtOptions;
pub use pixels::PixelBuffer;
pub use style::Style;
