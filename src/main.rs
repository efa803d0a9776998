//! dotart - Command-line tool for turning images into dot art

use std::process::ExitCode;

use dotart::cli;

fn main() -> ExitCode {
    cli::run()
}
