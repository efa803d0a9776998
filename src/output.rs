//! PNG output and file path generation

use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{ColorType, ImageEncoder};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pixels::PixelBuffer;
use crate::style::Style;

/// Largest accepted `--scale` factor
pub const MAX_SCALE: u8 = 16;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Encode a buffer as an RGBA8 PNG in memory.
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, OutputError> {
    let mut bytes = Vec::new();
    PngEncoder::new(&mut bytes).write_image(
        buffer.as_raw(),
        buffer.width(),
        buffer.height(),
        ColorType::Rgba8,
    )?;
    Ok(bytes)
}

/// Save a buffer to a PNG file, creating parent directories as needed.
pub fn save_png(buffer: &PixelBuffer, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, encode_png(buffer)?)?;
    tracing::debug!(path = %path.display(), "wrote png");
    Ok(())
}

/// Scale a buffer by an integer factor using nearest-neighbor interpolation.
///
/// Factors of 0 or 1 return the buffer unchanged.
pub fn scale(buffer: PixelBuffer, factor: u8) -> PixelBuffer {
    if factor <= 1 {
        return buffer;
    }
    let (w, h) = buffer.dimensions();
    let resized = image::imageops::resize(
        buffer.as_image(),
        w * factor as u32,
        h * factor as u32,
        FilterType::Nearest,
    );
    PixelBuffer::from_image(resized)
}

/// Work out where the rendering of `input` in `style` is written.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `-o` | `{input_dir}/{input_stem}_{style}.png` |
/// | `-o art.png` | `art.png` |
/// | `-o dir/` or an existing directory | `dir/{input_stem}_{style}.png` |
pub fn output_path(input: &Path, style: Style, output_arg: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let file_name = format!("{}_{}.png", stem, style);

    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                output.join(file_name)
            } else {
                output.to_path_buf()
            }
        }
        None => match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(file_name),
            _ => PathBuf::from(file_name),
        },
    }
}
