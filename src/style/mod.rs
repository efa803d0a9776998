//! Dot styles: how one cell summary becomes one drawn patch
//!
//! Every [`Style`] variant is backed by a [`CellPainter`]. A painter sees
//! exactly one [`CellSummary`] plus the global [`StyleParams`] and draws into
//! a cell-sized [`Patch`] that starts out filled with the background. Painters
//! never look at neighbouring cells, so cells can be painted in any order or
//! concurrently.
//!
//! # Dot size
//!
//! Sized styles derive a dot *strength* `s` in `[0, 1]` from the cell
//! luminance according to [`Polarity`]. The dot *area* is proportional to
//! `s`, so linear sizes (radius, side) scale with `sqrt(s)`. A strength of
//! zero draws nothing.
//!
//! | Style | Shape |
//! |-------|-------|
//! | `pixel` | whole cell, size ignored (mosaic) |
//! | `circle` | centered disc, radius `sqrt(s) * min(w, h) / 2` |
//! | `square` | centered square, side `sqrt(s) * min(w, h)` |
//! | `diamond` | centered diamond, half-diagonal `sqrt(s) * min(w, h) / 2` |
//! | `ascii` | 5x7 glyph from the ramp ` .:-=+*#%@` picked by `s` |

mod circle;
mod diamond;
mod glyph;
mod mosaic;
mod square;

pub use circle::Circle;
pub use diamond::Diamond;
pub use glyph::{Glyph, GLYPH_RAMP};
pub use mosaic::Mosaic;
pub use square::Square;

use clap::ValueEnum;
use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::blend_over;
use crate::pixels::TRANSPARENT;
use crate::sample::CellSummary;
use crate::suggest::closest;

/// Rendering algorithm selected by name at the call boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Flat mosaic: every cell filled with its color
    Pixel,
    /// Halftone disc sized by luminance
    Circle,
    /// Square dot sized by luminance
    Square,
    /// Diamond dot sized by luminance
    Diamond,
    /// Glyph density ramp
    Ascii,
}

impl Style {
    /// Every style, in the order they are listed to users
    pub const ALL: [Style; 5] =
        [Style::Pixel, Style::Circle, Style::Square, Style::Diamond, Style::Ascii];

    /// The identifier accepted by [`str::parse`]
    pub fn name(&self) -> &'static str {
        match self {
            Style::Pixel => "pixel",
            Style::Circle => "circle",
            Style::Square => "square",
            Style::Diamond => "diamond",
            Style::Ascii => "ascii",
        }
    }

    /// One-line description for listings
    pub fn description(&self) -> &'static str {
        match self {
            Style::Pixel => "flat mosaic, each cell filled with its color",
            Style::Circle => "halftone discs sized by brightness",
            Style::Square => "square dots sized by brightness",
            Style::Diamond => "diamond dots sized by brightness",
            Style::Ascii => "glyphs from a density ramp, tinted with the cell color",
        }
    }

    /// Identifiers of every style
    pub fn names() -> Vec<&'static str> {
        Style::ALL.iter().map(Style::name).collect()
    }

    /// The painter that draws cells in this style
    pub fn painter(&self) -> &'static dyn CellPainter {
        match self {
            Style::Pixel => &Mosaic,
            Style::Circle => &Circle,
            Style::Square => &Square,
            Style::Diamond => &Diamond,
            Style::Ascii => &Glyph,
        }
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Style {
    type Err = StyleError;

    /// Exact identifiers only; unknown names never fall back to a default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Style::ALL.into_iter().find(|style| style.name() == s).ok_or_else(|| {
            StyleError::UnknownStyle {
                name: s.to_string(),
                suggestion: closest(s, &Style::names(), 2),
            }
        })
    }
}

/// Error produced while selecting a style
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error(
        "unknown style '{name}' (available: {}){}",
        Style::names().join(", "),
        .suggestion.map(|s| format!(". Did you mean '{}'?", s)).unwrap_or_default()
    )]
    UnknownStyle { name: String, suggestion: Option<&'static str> },
}

/// Which end of the brightness scale draws the larger dot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Darker cells draw larger dots, like ink on paper
    #[default]
    Ink,
    /// Brighter cells draw larger dots, like light on a dark screen
    Light,
}

impl Polarity {
    /// Parse a polarity name
    pub fn from_str(s: &str) -> Option<Polarity> {
        match s.to_lowercase().as_str() {
            "ink" | "dark" => Some(Polarity::Ink),
            "light" | "bright" => Some(Polarity::Light),
            _ => None,
        }
    }

    /// Dot strength in `[0, 1]` for a cell luminance.
    pub fn strength(&self, luminance: f32) -> f32 {
        let luminance = luminance.clamp(0.0, 1.0);
        match self {
            Polarity::Ink => 1.0 - luminance,
            Polarity::Light => luminance,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Ink => write!(f, "ink"),
            Polarity::Light => write!(f, "light"),
        }
    }
}

/// Parameters shared by every cell of one rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    /// Color of every pixel not covered by a dot
    pub background: Rgba<u8>,
    /// Luminance to dot size mapping
    pub polarity: Polarity,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self { background: TRANSPARENT, polarity: Polarity::Ink }
    }
}

impl StyleParams {
    /// Dot strength for a cell under these parameters
    pub fn strength(&self, cell: &CellSummary) -> f32 {
        self.polarity.strength(cell.luminance)
    }
}

/// Draws one cell.
///
/// Implementations must be pure: the same cell and parameters always produce
/// the same patch.
pub trait CellPainter: Send + Sync {
    fn paint(&self, cell: &CellSummary, params: &StyleParams, patch: &mut Patch<'_>);
}

/// A cell-sized window into a band of output rows.
pub struct Patch<'a> {
    data: &'a mut [u8],
    stride: usize,
    x_offset: u32,
    width: u32,
    height: u32,
}

impl<'a> Patch<'a> {
    /// A `width x height` window starting at column `x_offset` of `data`,
    /// whose rows are `stride` bytes apart.
    pub fn new(data: &'a mut [u8], stride: usize, x_offset: u32, width: u32, height: u32) -> Self {
        debug_assert!(stride >= (x_offset + width) as usize * 4);
        debug_assert!(data.len() >= stride * height as usize);
        Self { data, stride, x_offset, width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride + (self.x_offset + x) as usize * 4
    }

    pub fn get(&self, x: u32, y: u32) -> Rgba<u8> {
        let i = self.offset(x, y);
        Rgba([self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]])
    }

    /// Composite `color` over the pixel at `(x, y)`.
    pub fn blend(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        let out = blend_over(color, self.get(x, y));
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&out.0);
    }

    /// Composite `color` over every pixel for which `covered(x, y)` holds.
    pub fn fill_where(&mut self, color: Rgba<u8>, covered: impl Fn(u32, u32) -> bool) {
        for y in 0..self.height {
            for x in 0..self.width {
                if covered(x, y) {
                    self.blend(x, y, color);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_style() {
        for style in Style::ALL {
            assert_eq!(style.name().parse::<Style>(), Ok(style));
            assert_eq!(style.to_string(), style.name());
        }
    }

    #[test]
    fn test_unknown_style_has_no_fallback() {
        let err = "not-a-style".parse::<Style>().unwrap_err();
        assert_eq!(err, StyleError::UnknownStyle { name: "not-a-style".into(), suggestion: None });
        assert!(err.to_string().contains("available: pixel, circle, square, diamond, ascii"));

        // Identifiers are exact
        assert!("Circle".parse::<Style>().is_err());
        assert!("".parse::<Style>().is_err());
    }

    #[test]
    fn test_unknown_style_suggestion() {
        let err = "circel".parse::<Style>().unwrap_err();
        assert!(err.to_string().ends_with("Did you mean 'circle'?"), "{}", err);
    }

    #[test]
    fn test_polarity_strength() {
        assert_eq!(Polarity::Ink.strength(0.0), 1.0);
        assert_eq!(Polarity::Ink.strength(1.0), 0.0);
        assert_eq!(Polarity::Light.strength(1.0), 1.0);
        assert_eq!(Polarity::Light.strength(0.25), 0.25);
        assert_eq!(Polarity::Ink.strength(2.0), 0.0);
        assert_eq!(Polarity::from_str("LIGHT"), Some(Polarity::Light));
        assert_eq!(Polarity::from_str("grey"), None);
    }

    #[test]
    fn test_patch_window() {
        // 4x2 band, patch covering columns 2..4
        let mut data = vec![0u8; 4 * 2 * 4];
        let mut patch = Patch::new(&mut data, 16, 2, 2, 2);
        patch.fill_where(Rgba([9, 9, 9, 255]), |x, y| x == 1 && y == 1);
        assert_eq!(patch.get(1, 1), Rgba([9, 9, 9, 255]));
        assert_eq!(patch.get(0, 0), Rgba([0, 0, 0, 0]));
        // (3, 1) in band coordinates
        assert_eq!(&data[16 + 12..16 + 16], &[9, 9, 9, 255]);
    }
}
