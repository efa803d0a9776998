//! Image decoding from raw encoded bytes
//!
//! The input format is detected from the byte signature only; file
//! extensions are never consulted. Supported encodings:
//!
//! | Format | Signature | Notes |
//! |--------|-----------|-------|
//! | PNG | `89 50 4E 47` | all color types, converted to RGBA8 |
//! | JPEG | `FF D8 FF` | baseline and progressive |
//! | GIF | `GIF87a` / `GIF89a` | first frame only |
//! | BMP | `BM` | |

use image::ImageFormat;
use thiserror::Error;

use crate::pixels::PixelBuffer;

/// Raster encodings accepted by [`decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl InputFormat {
    /// Every supported format, in detection order
    pub const ALL: [InputFormat; 4] =
        [InputFormat::Png, InputFormat::Jpeg, InputFormat::Gif, InputFormat::Bmp];

    /// Map an `image` crate format onto the supported set.
    pub fn from_image_format(format: ImageFormat) -> Option<InputFormat> {
        match format {
            ImageFormat::Png => Some(InputFormat::Png),
            ImageFormat::Jpeg => Some(InputFormat::Jpeg),
            ImageFormat::Gif => Some(InputFormat::Gif),
            ImageFormat::Bmp => Some(InputFormat::Bmp),
            _ => None,
        }
    }

    pub fn image_format(&self) -> ImageFormat {
        match self {
            InputFormat::Png => ImageFormat::Png,
            InputFormat::Jpeg => ImageFormat::Jpeg,
            InputFormat::Gif => ImageFormat::Gif,
            InputFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Png => write!(f, "png"),
            InputFormat::Jpeg => write!(f, "jpeg"),
            InputFormat::Gif => write!(f, "gif"),
            InputFormat::Bmp => write!(f, "bmp"),
        }
    }
}

/// Error produced while decoding input bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Zero-length input
    #[error("input is empty")]
    EmptyInput,
    /// No supported signature matched
    #[error(
        "unsupported image format{}",
        .detected.as_ref().map(|d| format!(" '{}'", d)).unwrap_or_default()
    )]
    UnsupportedFormat {
        /// Name of a recognized but unsupported format, if any
        detected: Option<String>,
    },
    /// The signature matched but the stream could not be parsed
    #[error("corrupt {format} data: {message}")]
    CorruptData { format: InputFormat, message: String },
}

/// Detect the input format from its leading bytes.
pub fn sniff_format(bytes: &[u8]) -> Result<InputFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let guessed =
        image::guess_format(bytes).map_err(|_| DecodeError::UnsupportedFormat { detected: None })?;

    InputFormat::from_image_format(guessed).ok_or_else(|| DecodeError::UnsupportedFormat {
        detected: Some(format!("{:?}", guessed).to_lowercase()),
    })
}

/// Decode raw encoded bytes into an RGBA pixel buffer.
///
/// # Errors
///
/// * [`DecodeError::EmptyInput`] when `bytes` is empty
/// * [`DecodeError::UnsupportedFormat`] when the signature is not PNG, JPEG, GIF or BMP
/// * [`DecodeError::CorruptData`] when the stream is truncated or malformed,
///   or describes a zero-sized image
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let format = sniff_format(bytes)?;

    let decoded = image::load_from_memory_with_format(bytes, format.image_format())
        .map_err(|e| DecodeError::CorruptData { format, message: e.to_string() })?;

    let rgba = decoded.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(DecodeError::CorruptData {
            format,
            message: format!("image has zero size ({}x{})", rgba.width(), rgba.height()),
        });
    }

    tracing::debug!(%format, width = rgba.width(), height = rgba.height(), "decoded input image");

    Ok(PixelBuffer::from_image(rgba))
}


#[cfg(test)]
mod tests {
    use super::fixtures::{encode, png, solid};
    use super::*;

    fn close(a: u8, b: u8, tolerance: u8) -> bool {
        a.abs_diff(b) <= tolerance
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(&[]), Err(DecodeError::EmptyInput));
        assert_eq!(sniff_format(&[]), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn test_decode_png_exact() {
        let mut img = solid(3, 2, [255, 0, 0, 255]);
        img.put_pixel(1, 1, image::Rgba([0, 0, 255, 128]));

        let buffer = decode(&png(&img)).unwrap();
        assert_eq!(buffer.dimensions(), (3, 2));
        assert_eq!(buffer.pixel(0, 0), image::Rgba([255, 0, 0, 255]));
        assert_eq!(buffer.pixel(1, 1), image::Rgba([0, 0, 255, 128]));
    }

    #[test]
    fn test_solid_color_survives_every_format() {
        let color = [200, 120, 40, 255];
        for format in InputFormat::ALL {
            let bytes = encode(&solid(16, 8, color), format);
            assert_eq!(sniff_format(&bytes), Ok(format));

            let buffer = decode(&bytes).unwrap_or_else(|e| panic!("{} failed: {}", format, e));
            assert_eq!(buffer.dimensions(), (16, 8), "{} dimensions", format);

            let tolerance = match format {
                InputFormat::Jpeg => 4,
                InputFormat::Gif => 8,
                _ => 0,
            };
            for y in 0..8 {
                for x in 0..16 {
                    let p = buffer.pixel(x, y);
                    for c in 0..4 {
                        assert!(
                            close(p[c], color[c], tolerance),
                            "{} pixel ({}, {}) channel {}: {} vs {}",
                            format,
                            x,
                            y,
                            c,
                            p[c],
                            color[c]
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_unknown_signature() {
        let err = decode(b"definitely not an image").unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedFormat { detected: None });
    }

    #[test]
    fn test_recognized_but_unsupported_signature() {
        // Little-endian TIFF header
        let err = decode(&[0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00]).unwrap_err();
        assert_eq!(err, DecodeError::UnsupportedFormat { detected: Some("tiff".to_string()) });
    }

    #[test]
    fn test_truncated_png_is_corrupt() {
        let bytes = png(&solid(8, 8, [0, 0, 0, 255]));
        let err = decode(&bytes[..24]).unwrap_err();
        match err {
            DecodeError::CorruptData { format, .. } => assert_eq!(format, InputFormat::Png),
            other => panic!("expected CorruptData, got {:?}", other),
        }
    }

    #[test]
    fn test_signature_only_jpeg_is_corrupt() {
        let err = decode(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).unwrap_err();
        assert!(matches!(err, DecodeError::CorruptData { format: InputFormat::Jpeg, .. }));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(DecodeError::EmptyInput.to_string(), "input is empty");
        assert_eq!(
            DecodeError::UnsupportedFormat { detected: Some("tiff".into()) }.to_string(),
            "unsupported image format 'tiff'"
        );
        assert_eq!(
            DecodeError::UnsupportedFormat { detected: None }.to_string(),
            "unsupported image format"
        );
    }
}
