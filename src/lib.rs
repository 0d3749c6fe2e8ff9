//! # Pixel Diff
//!
//! Pixel-by-pixel comparison of two images with a per-channel tolerance.
//!
//! ## What it produces
//! - A difference mask marking every pixel whose channels differ by more
//!   than the tolerance
//! - Two difference images keeping only the differing pixels of each input
//! - A combined image showing where and how the inputs differ
//! - A report with counts and the differing percentage
//!
//! ## Architecture
//! - `core` - The comparison engine
//! - `events` - Progress reporting over channels
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use error::{PixelDiffError, Result};

/// Initialize tracing for the library
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` over the
/// default `warn`. Logs go to stderr.
pub fn init_tracing(verbose: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if verbose { "debug" } else { "warn" })
    });

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
