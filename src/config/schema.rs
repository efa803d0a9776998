//! Configuration schema types for `dotart.toml`
//!
//! Every field is optional; absent fields leave the built-in defaults alone.

use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::options::{DotArtOptions, MAX_CANVAS};
use crate::output::MAX_SCALE;
use crate::sample::Reduction;
use crate::style::{Polarity, Style};

/// Root of `dotart.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DotartConfig {
    /// Defaults for `dotart render`
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// The `[defaults]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell_size: Option<u32>,
    #[serde(with = "crate::color::serde_css", default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Rgba<u8>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarity: Option<Polarity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction: Option<Reduction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dots: Option<u32>,
    #[serde(with = "crate::color::serde_css", default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Rgba<u8>>,
    /// Integer upscale applied to the written PNG
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u8>,
}

impl DefaultsConfig {
    /// Overwrite `options` with every value set in this table.
    pub fn apply_to(&self, options: &mut DotArtOptions) {
        if let Some(cell_size) = self.cell_size {
            options.cell_size = cell_size;
        }
        if let Some(background) = self.background {
            options.background = background;
        }
        if let Some(polarity) = self.polarity {
            options.polarity = polarity;
        }
        if let Some(reduction) = self.reduction {
            options.reduction = reduction;
        }
        if self.canvas.is_some() {
            options.canvas = self.canvas;
        }
        if self.dots.is_some() {
            options.dots = self.dots;
        }
        if let Some(backdrop) = self.backdrop {
            options.backdrop = backdrop;
        }
    }
}

/// A single config validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl DotartConfig {
    /// Collect every semantic problem in the config.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: format!("defaults.{}", field), message })
        };
        let defaults = &self.defaults;

        let positive_fields = [
            ("cell_size", defaults.cell_size),
            ("canvas", defaults.canvas),
            ("dots", defaults.dots),
        ];
        for (field, value) in positive_fields {
            if value == Some(0) {
                push(field, "must be a positive integer".to_string());
            }
        }

        if let Some(canvas) = defaults.canvas.filter(|size| *size > MAX_CANVAS) {
            push("canvas", format!("must be at most {}, got {}", MAX_CANVAS, canvas));
        }

        match (defaults.canvas, defaults.dots) {
            (None, Some(_)) => push("dots", "requires defaults.canvas".to_string()),
            (Some(canvas), Some(dots)) if dots > canvas => {
                push("dots", format!("must not exceed canvas ({})", canvas))
            }
            _ => {}
        }

        if let Some(scale) = defaults.scale {
            if scale == 0 || scale > MAX_SCALE {
                push("scale", format!("must be between 1 and {}", MAX_SCALE));
            }
        }

        errors
    }
}
