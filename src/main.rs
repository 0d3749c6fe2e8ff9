//! # pixel-diff CLI
//!
//! Command-line interface for the pixel comparison tool.
//!
//! ## Usage
//! ```bash
//! pixel-diff --img1 before.png --img2 after.png --tolerance 5
//! pixel-diff --img1 a.jpg --img2 b.jpg --format json --json-report
//! ```

mod cli;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            cli::print_error(&e);
            ExitCode::FAILURE
        }
    }
}
