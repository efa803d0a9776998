//! Render command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::color::parse_color;
use crate::config::{find_config, find_config_from, load_config, DotartConfig};
use crate::engine::Engine;
use crate::error::ErrorKind;
use crate::options::DotArtOptions;
use crate::output::{output_path, save_png, scale};
use crate::style::{Style, StyleError};

use super::{RenderArgs, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Style used when neither the command line nor the config names one
pub const DEFAULT_STYLE: Style = Style::Pixel;

/// Execute the render command
pub fn run_render(args: &RenderArgs) -> ExitCode {
    let config = if args.no_config {
        DotartConfig::default()
    } else {
        match load_config(discover_config(&args.input).as_deref()) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    };

    let style = match resolve_style(args, &config) {
        Ok(style) => style,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let options = match build_options(args, &config) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let engine = match args.jobs {
        Some(jobs) => match Engine::new().with_options(options).with_jobs(jobs) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("Error: Cannot start {} worker threads: {}", jobs, e);
                return ExitCode::from(EXIT_ERROR);
            }
        },
        None => Engine::new().with_options(options),
    };

    let bytes = match std::fs::read(&args.input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("Error: Cannot open input file '{}': {}", args.input.display(), e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let buffer = match engine.generate(style.name(), &bytes) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("Error: {}: {}", args.input.display(), e);
            return ExitCode::from(exit_code_for(e.kind()));
        }
    };

    let factor = args.scale.or(config.defaults.scale).unwrap_or(1);
    let buffer = scale(buffer, factor);

    let path = output_path(&args.input, style, args.output.as_deref());
    if let Err(e) = save_png(&buffer, &path) {
        eprintln!("Error: Failed to save '{}': {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!("Saved: {} ({}x{})", path.display(), buffer.width(), buffer.height());
    ExitCode::from(EXIT_SUCCESS)
}

/// The `--style` flag wins over the config, which wins over [`DEFAULT_STYLE`].
fn resolve_style(args: &RenderArgs, config: &DotartConfig) -> Result<Style, StyleError> {
    match &args.style {
        Some(name) => name.parse(),
        None => Ok(config.defaults.style.unwrap_or(DEFAULT_STYLE)),
    }
}

/// Look for dotart.toml beside the input first, then from the working directory.
fn discover_config(input: &Path) -> Option<std::path::PathBuf> {
    let start = input
        .canonicalize()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf));
    start.and_then(find_config_from).or_else(find_config)
}

/// Layer config defaults and command-line flags over the built-in defaults.
fn build_options(args: &RenderArgs, config: &DotartConfig) -> Result<DotArtOptions, String> {
    let mut options = DotArtOptions::default();
    config.defaults.apply_to(&mut options);

    if let Some(cell_size) = args.cell_size {
        options.cell_size = cell_size;
    }
    if let Some(canvas) = args.canvas {
        options.canvas = Some(canvas);
    }
    if let Some(dots) = args.dots {
        options.dots = Some(dots);
    }
    if let Some(polarity) = args.polarity {
        options.polarity = polarity;
    }
    if let Some(reduction) = args.reduction {
        options.reduction = reduction;
    }
    if let Some(background) = &args.background {
        options.background = parse_color(background)
            .map_err(|e| format!("Invalid --background '{}': {}", background, e))?;
    }
    if let Some(backdrop) = &args.backdrop {
        options.backdrop = parse_color(backdrop)
            .map_err(|e| format!("Invalid --backdrop '{}': {}", backdrop, e))?;
    }

    options.validate().map_err(|e| e.to_string())?;
    Ok(options)
}

/// Decoding failures are conversion errors; everything else is a bad argument.
fn exit_code_for(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::EmptyInput | ErrorKind::UnsupportedFormat | ErrorKind::CorruptData => {
            EXIT_ERROR
        }
        ErrorKind::InvalidCellSize | ErrorKind::UnknownStyle | ErrorKind::InvalidOption => {
            EXIT_INVALID_ARGS
        }
    }
}
