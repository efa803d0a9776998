//! Conversion options and their string/JSON forms
//!
//! Recognized keys:
//!
//! | Key | Value | Default |
//! |-----|-------|---------|
//! | `cell_size` | positive integer | 8 |
//! | `background` | CSS color | `transparent` |
//! | `polarity` | `ink` or `light` | `ink` |
//! | `reduction` | `average` or `dominant` | `average` |
//! | `canvas` | positive integer, at most [`MAX_CANVAS`] | unset |
//! | `dots` | positive integer, at most `canvas` | unset |
//! | `backdrop` | CSS color | `white` |
//!
//! Keys may be written with `-` or `_`. Any other key is rejected with
//! [`OptionsError::UnknownOption`]; options are never silently ignored.

use image::Rgba;
use thiserror::Error;

use crate::color::parse_color;
use crate::pixels::TRANSPARENT;
use crate::sample::Reduction;
use crate::style::{Polarity, StyleParams};
use crate::suggest::closest;

/// Cell edge in pixels when nothing else is configured
pub const DEFAULT_CELL_SIZE: u32 = 8;

/// Largest accepted canvas side in pixels
pub const MAX_CANVAS: u32 = 8192;

/// Every recognized option key
pub const OPTION_KEYS: [&str; 7] =
    ["cell_size", "background", "polarity", "reduction", "canvas", "dots", "backdrop"];

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Error produced while reading or validating options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error(
        "unrecognized option '{key}'{}",
        .suggestion.map(|s| format!(". Did you mean '{}'?", s)).unwrap_or_default()
    )]
    UnknownOption { key: String, suggestion: Option<&'static str> },
    #[error("invalid value '{value}' for option '{key}': {reason}")]
    InvalidValue { key: String, value: String, reason: String },
    #[error("cell size must be a positive integer, got {0}")]
    InvalidCellSize(i64),
    #[error("malformed options: {0}")]
    Malformed(String),
    #[error("{0}")]
    Conflict(String),
}

/// Everything that tunes one conversion besides the style.
#[derive(Debug, Clone, PartialEq)]
pub struct DotArtOptions {
    /// Cell edge in source pixels
    pub cell_size: u32,
    /// Backdrop of every rendered patch
    pub background: Rgba<u8>,
    /// Luminance to dot size mapping
    pub polarity: Polarity,
    /// Cell color reduction
    pub reduction: Reduction,
    /// Letterbox the decoded image onto a square canvas of this size first
    pub canvas: Option<u32>,
    /// Dots per canvas side; overrides `cell_size` with `canvas / dots`
    pub dots: Option<u32>,
    /// Canvas fill color, only used with `canvas`
    pub backdrop: Rgba<u8>,
}

impl Default for DotArtOptions {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            background: TRANSPARENT,
            polarity: Polarity::default(),
            reduction: Reduction::default(),
            canvas: None,
            dots: None,
            backdrop: WHITE,
        }
    }
}

impl DotArtOptions {
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn with_polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Fit onto a `size x size` canvas and draw `dots` cells per side.
    pub fn with_canvas(mut self, size: u32, dots: Option<u32>) -> Self {
        self.canvas = Some(size);
        self.dots = dots;
        self
    }

    pub fn with_backdrop(mut self, backdrop: Rgba<u8>) -> Self {
        self.backdrop = backdrop;
        self
    }

    /// Set one option from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), OptionsError> {
        let normalized = key.trim().replace('-', "_");
        let value = value.trim();
        let invalid = |reason: &str| OptionsError::InvalidValue {
            key: normalized.clone(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        match normalized.as_str() {
            "cell_size" => {
                let n: i64 = value.parse().map_err(|_| invalid("expected an integer"))?;
                if n <= 0 {
                    return Err(OptionsError::InvalidCellSize(n));
                }
                self.cell_size = u32::try_from(n).map_err(|_| invalid("too large"))?;
            }
            "background" => {
                self.background = parse_color(value).map_err(|e| invalid(&e.to_string()))?;
            }
            "backdrop" => {
                self.backdrop = parse_color(value).map_err(|e| invalid(&e.to_string()))?;
            }
            "polarity" => {
                self.polarity =
                    Polarity::from_str(value).ok_or_else(|| invalid("expected 'ink' or 'light'"))?;
            }
            "reduction" => {
                self.reduction = Reduction::from_str(value)
                    .ok_or_else(|| invalid("expected 'average' or 'dominant'"))?;
            }
            "canvas" => {
                let size =
                    parse_positive(value).ok_or_else(|| invalid("expected a positive integer"))?;
                if size > MAX_CANVAS {
                    return Err(invalid(&format!("canvas may be at most {} pixels", MAX_CANVAS)));
                }
                self.canvas = Some(size);
            }
            "dots" => {
                let dots =
                    parse_positive(value).ok_or_else(|| invalid("expected a positive integer"))?;
                self.dots = Some(dots);
            }
            _ => {
                return Err(OptionsError::UnknownOption {
                    key: key.to_string(),
                    suggestion: closest(&normalized, &OPTION_KEYS, 2),
                })
            }
        }
        Ok(())
    }

    /// Build options from `key=value` style pairs on top of the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use dotart::options::DotArtOptions;
    ///
    /// let pairs = [("cell-size", "4"), ("polarity", "light")];
    /// let options = DotArtOptions::from_pairs(pairs).unwrap();
    /// assert_eq!(options.cell_size, 4);
    ///
    /// assert!(DotArtOptions::from_pairs([("sparkle", "yes")]).is_err());
    /// ```
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value.as_ref())?;
        }
        options.validate()?;
        Ok(options)
    }

    /// Build options from a JSON object such as `{"cell_size": 4, "background": "#fff"}`.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| OptionsError::Malformed(e.to_string()))?;

        let mut pairs = Vec::with_capacity(map.len());
        for (key, value) in map {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(OptionsError::InvalidValue {
                        key,
                        value: other.to_string(),
                        reason: "expected a string or a number".to_string(),
                    })
                }
            };
            pairs.push((key, value));
        }
        Self::from_pairs(pairs)
    }

    /// Check combinations that no single setter can see.
    pub fn validate(&self) -> Result<(), OptionsError> {
        match self.canvas {
            Some(0) => {
                return Err(OptionsError::Conflict("canvas size must be positive".to_string()))
            }
            Some(size) if size > MAX_CANVAS => {
                return Err(OptionsError::Conflict(format!(
                    "canvas size {} exceeds the maximum of {}",
                    size, MAX_CANVAS
                )))
            }
            _ => {}
        }
        match (self.canvas, self.dots) {
            (_, Some(0)) => Err(OptionsError::Conflict("dots must be positive".to_string())),
            (None, Some(_)) => {
                Err(OptionsError::Conflict("option 'dots' requires 'canvas'".to_string()))
            }
            (Some(canvas), Some(dots)) if dots > canvas => Err(OptionsError::Conflict(format!(
                "dots ({}) cannot exceed the canvas size ({})",
                dots, canvas
            ))),
            _ => Ok(()),
        }
    }

    /// Side of the square actually covered by `dots` cells on the canvas.
    ///
    /// When `dots` does not divide `canvas`, the leftover strip on the right
    /// and bottom is cropped so exactly `dots` cells are drawn per side.
    pub fn grid_side(&self) -> Option<u32> {
        match (self.canvas, self.dots) {
            (Some(canvas), Some(dots)) if dots > 0 => Some(dots * (canvas / dots)),
            _ => None,
        }
    }

    /// The cell size actually used for sampling
    pub fn effective_cell_size(&self) -> u32 {
        match (self.canvas, self.dots) {
            (Some(canvas), Some(dots)) if dots > 0 => canvas / dots,
            _ => self.cell_size,
        }
    }

    pub fn style_params(&self) -> StyleParams {
        StyleParams { background: self.background, polarity: self.polarity }
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.parse::<u32>().ok().filter(|n| *n > 0)
}
