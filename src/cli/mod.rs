//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod render;
mod styles;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::sample::Reduction;
use crate::style::Polarity;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// dotart - Turn images into dot art and render to PNG
#[derive(Parser)]
#[command(name = "dotart")]
#[command(about = "dotart - Turn PNG, JPEG, GIF and BMP images into dot art PNGs")]
#[command(version)]
pub struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an image to dot art
    Render(RenderArgs),

    /// List the available styles
    Styles,
}

/// Arguments of `dotart render`. Flags override `dotart.toml` defaults.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Input image (PNG, JPEG, GIF or BMP)
    pub input: PathBuf,

    /// Output file or directory.
    /// If omitted: {input}_{style}.png
    /// If directory (ends with /): dir/{input}_{style}.png
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rendering style (see `dotart styles`)
    #[arg(short, long)]
    pub style: Option<String>,

    /// Cell edge in source pixels (default: 8)
    #[arg(short, long)]
    pub cell_size: Option<u32>,

    /// Dots per canvas side; requires --canvas
    #[arg(long)]
    pub dots: Option<u32>,

    /// Letterbox the input onto a square canvas of this size first
    #[arg(long)]
    pub canvas: Option<u32>,

    /// Background color behind the dots (CSS color, default: transparent)
    #[arg(long)]
    pub background: Option<String>,

    /// Canvas fill color used with --canvas (CSS color, default: white)
    #[arg(long)]
    pub backdrop: Option<String>,

    /// Which end of the brightness scale draws the larger dot
    #[arg(long, value_enum)]
    pub polarity: Option<Polarity>,

    /// How each cell is reduced to one color
    #[arg(long, value_enum)]
    pub reduction: Option<Reduction>,

    /// Scale output by integer factor (1-16, default: 1)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub scale: Option<u8>,

    /// Worker threads for sampling and rendering (default: all cores)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Ignore dotart.toml
    #[arg(long)]
    pub no_config: bool,
}

/// Install the stderr log subscriber.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "dotart=debug" } else { "dotart=warn" };
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time().with_writer(std::io::stderr))
        .try_init();
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Render(args) => render::run_render(&args),
        Commands::Styles => styles::run_styles(),
    }
}
