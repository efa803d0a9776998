//! Color helpers: CSS color parsing, hex formatting and perceptual luminance
//!
//! Color strings accept the following formats:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `white`, `transparent`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// Rec. 601 luma weights in thousandths; they sum to exactly 1000
pub const LUMA_WEIGHTS: [u32; 3] = [299, 587, 114];

/// Parse a CSS color string into an RGBA color.
///
/// # Examples
///
/// ```
/// use dotart::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("rgb(0, 255, 0)").unwrap(), image::Rgba([0, 255, 0, 255]));
/// assert_eq!(parse_color("white").unwrap(), image::Rgba([255, 255, 255, 255]));
/// assert_eq!(parse_color("transparent").unwrap()[3], 0);
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    match s.strip_prefix('#') {
        Some(hex) => parse_hex_color(hex),
        None => parse_css_color(s),
    }
}

/// Parse the digits of a hex color (without the leading '#')
fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    // All ASCII from here on, so byte indexing is safe
    let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|d| d * 17);
    let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);

    let channels = match hex.len() {
        3 => [digit(0), digit(1), digit(2), Ok(255)],
        4 => [digit(0), digit(1), digit(2), digit(3)],
        6 => [pair(0), pair(2), pair(4), Ok(255)],
        8 => [pair(0), pair(2), pair(4), pair(6)],
        len => return Err(ColorError::InvalidLength(len)),
    };

    let mut out = [0u8; 4];
    for (slot, value) in out.iter_mut().zip(channels) {
        *slot = value.map_err(|e| ColorError::CssParse(e.to_string()))?;
    }
    Ok(Rgba(out))
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    let rgb_color = css_color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        // Components with 'none' values come back as float colors
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
                Ok(Rgba([channel(rgb.r), channel(rgb.g), channel(rgb.b), channel(rgb.alpha)]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}

/// Format a color as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
pub fn to_hex(color: Rgba<u8>) -> String {
    let [r, g, b, a] = color.0;
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
    }
}

/// Perceptual luminance of a color in `[0, 1]`, ignoring alpha.
///
/// Computed in integers so that white is exactly 1.0 and black exactly 0.0.
pub fn luminance(color: Rgba<u8>) -> f32 {
    let weighted = LUMA_WEIGHTS[0] * color[0] as u32
        + LUMA_WEIGHTS[1] * color[1] as u32
        + LUMA_WEIGHTS[2] * color[2] as u32;
    weighted as f32 / (1000.0 * 255.0)
}

/// Composite `src` over `dst` (Porter-Duff source-over, straight alpha).
pub fn blend_over(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }

    let src_alpha = src[3] as f32 / 255.0;
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let composite = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let result = (s * src_alpha + d * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        (result.clamp(0.0, 1.0) * 255.0).round() as u8
    };

    Rgba([
        composite(src[0], dst[0]),
        composite(src[1], dst[1]),
        composite(src[2], dst[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

/// Serde adapter storing optional colors as CSS strings (`"#FFFFFF"`, `"white"`, ...)
pub mod serde_css {
    use image::Rgba;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        color: &Option<Rgba<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match color {
            Some(c) => serializer.serialize_some(&super::to_hex(*c)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Rgba<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| super::parse_color(&s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
