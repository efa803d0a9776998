//! Styles command implementation

use std::process::ExitCode;

use crate::style::Style;

use super::EXIT_SUCCESS;

/// List every style with its description
pub fn run_styles() -> ExitCode {
    let width = Style::ALL.iter().map(|s| s.name().len()).max().unwrap_or(0);
    for style in Style::ALL {
        println!("  {:width$}  {}", style.name(), style.description(), width = width);
    }
    ExitCode::from(EXIT_SUCCESS)
}
