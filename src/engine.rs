//! The conversion pipeline: style, options, decode, canvas, sample, render
//!
//! Every call is self-contained. Nothing is cached between calls, so one
//! [`Engine`] can be shared across threads and used concurrently.

use std::sync::Arc;

use crate::canvas::{crop_to_grid, fit_to_canvas};
use crate::decode::decode;
use crate::error::{GenerateError, Stage};
use crate::options::DotArtOptions;
use crate::pixels::PixelBuffer;
use crate::render::render;
use crate::sample::summarize;
use crate::style::Style;

/// Convert encoded image `bytes` into dot art drawn in the named style.
///
/// The style name and options are validated before any decoding work, so
/// a bad style is reported as such even when the bytes are garbage.
///
/// # Examples
///
/// ```
/// use dotart::options::DotArtOptions;
/// use dotart::error::ErrorKind;
///
/// let err = dotart::generate("circle", &[], &DotArtOptions::default()).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::EmptyInput);
/// ```
pub fn generate(
    style_name: &str,
    bytes: &[u8],
    options: &DotArtOptions,
) -> Result<PixelBuffer, GenerateError> {
    let span = tracing::debug_span!("generate", style = style_name, bytes = bytes.len());
    let _enter = span.enter();

    let style: Style = style_name.parse()?;
    options.validate()?;

    let decoded = decode(bytes)?;
    tracing::debug!(stage = %Stage::Decode, width = decoded.width(), height = decoded.height());

    let source = match options.canvas {
        Some(size) => {
            tracing::debug!(stage = %Stage::Canvas, size);
            let fitted = fit_to_canvas(&decoded, size, options.backdrop);
            match options.grid_side() {
                Some(side) => crop_to_grid(fitted, side),
                None => fitted,
            }
        }
        None => decoded,
    };

    let grid = summarize(&source, options.effective_cell_size(), options.reduction)?;
    tracing::debug!(stage = %Stage::Sample, cols = grid.cols(), rows = grid.rows());
    drop(source);

    let output = render(&grid, style, &options.style_params());
    tracing::debug!(stage = %Stage::Render, width = output.width(), height = output.height());
    Ok(output)
}

/// Reusable converter with default options and an optional worker pool.
///
/// Without a pool, parallel stages run on rayon's global pool.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: DotArtOptions,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: DotArtOptions) -> Self {
        self.options = options;
        self
    }

    /// Run parallel stages on a dedicated pool of `jobs` threads.
    ///
    /// `jobs == 0` lets rayon pick the thread count.
    pub fn with_jobs(mut self, jobs: usize) -> Result<Self, rayon::ThreadPoolBuildError> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        self.pool = Some(Arc::new(pool));
        Ok(self)
    }

    pub fn options(&self) -> &DotArtOptions {
        &self.options
    }

    /// Convert with this engine's options.
    pub fn generate(&self, style_name: &str, bytes: &[u8]) -> Result<PixelBuffer, GenerateError> {
        self.generate_with(style_name, bytes, &self.options)
    }

    /// Convert with per-call options.
    pub fn generate_with(
        &self,
        style_name: &str,
        bytes: &[u8],
        options: &DotArtOptions,
    ) -> Result<PixelBuffer, GenerateError> {
        match &self.pool {
            Some(pool) => pool.install(|| generate(style_name, bytes, options)),
            None => generate(style_name, bytes, options),
        }
    }
}
