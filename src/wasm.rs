//! WASM API module for browser/JS interop
//!
//! Provides WebAssembly bindings that turn encoded image bytes into dot art.
//! Failures are thrown as JS errors whose message starts with the error kind,
//! e.g. `unknown_style: style: unknown style 'blob' ...`.

use wasm_bindgen::prelude::*;

use crate::engine::generate;
use crate::error::GenerateError;
use crate::options::DotArtOptions;
use crate::output::encode_png;
use crate::pixels::PixelBuffer;
use crate::style::Style;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Result of rendering dot art to RGBA pixels.
#[wasm_bindgen]
pub struct RenderResult {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl RenderResult {
    /// Width of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the rendered image in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data (4 bytes per pixel)
    #[wasm_bindgen(getter)]
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl From<PixelBuffer> for RenderResult {
    fn from(buffer: PixelBuffer) -> Self {
        Self { width: buffer.width(), height: buffer.height(), pixels: buffer.into_raw() }
    }
}

fn describe(e: &GenerateError) -> String {
    format!("{}: {}", e.kind(), e)
}

fn parse_options(options_json: Option<&str>) -> Result<DotArtOptions, String> {
    match options_json {
        Some(json) if !json.trim().is_empty() => {
            DotArtOptions::from_json(json).map_err(|e| describe(&GenerateError::from(e)))
        }
        _ => Ok(DotArtOptions::default()),
    }
}

fn png_for(style: &str, bytes: &[u8], options_json: Option<&str>) -> Result<Vec<u8>, String> {
    let options = parse_options(options_json)?;
    let buffer = generate(style, bytes, &options).map_err(|e| describe(&e))?;
    encode_png(&buffer).map_err(|e| e.to_string())
}

fn rgba_for(style: &str, bytes: &[u8], options_json: Option<&str>) -> Result<RenderResult, String> {
    let options = parse_options(options_json)?;
    let buffer = generate(style, bytes, &options).map_err(|e| describe(&e))?;
    Ok(buffer.into())
}

/// Convert an encoded image to dot art PNG bytes with default options.
///
/// # Arguments
/// * `style` - Style name, see [`list_styles`]
/// * `bytes` - PNG, JPEG, GIF or BMP file contents
#[wasm_bindgen]
pub fn dot_art_generate(style: &str, bytes: &[u8]) -> Result<Vec<u8>, JsError> {
    png_for(style, bytes, None).map_err(|e| JsError::new(&e))
}

/// Convert an encoded image to dot art PNG bytes.
///
/// `options_json` is an object such as `{"cell_size": 16, "background": "#fff"}`.
#[wasm_bindgen]
pub fn dot_art_generate_with_options(
    style: &str,
    bytes: &[u8],
    options_json: &str,
) -> Result<Vec<u8>, JsError> {
    png_for(style, bytes, Some(options_json)).map_err(|e| JsError::new(&e))
}

/// Convert an encoded image to raw RGBA dot art.
#[wasm_bindgen]
pub fn dot_art_generate_rgba(
    style: &str,
    bytes: &[u8],
    options_json: Option<String>,
) -> Result<RenderResult, JsError> {
    rgba_for(style, bytes, options_json.as_deref()).map_err(|e| JsError::new(&e))
}

/// Names of every available style
#[wasm_bindgen]
pub fn list_styles() -> Vec<String> {
    Style::names().into_iter().map(String::from).collect()
}
