//! # Store Module
//!
//! Persists the difference images and the report.
//!
//! ## Backends
//! - `FileSystemStore` - PNG files and text in an output directory (default)
//! - `InMemoryStore` - keeps everything in memory, for tests and embedding

mod filesystem;
mod memory;
mod traits;

pub use filesystem::FileSystemStore;
pub use memory::{Artifact, InMemoryStore};
pub use traits::OutputStore;

/// Difference image taken from the first input
pub const FIRST_DIFF_NAME: &str = "diff_img1.png";

/// Difference image taken from the second input
pub const SECOND_DIFF_NAME: &str = "diff_img2.png";

/// Combined difference image
pub const COMBINED_DIFF_NAME: &str = "combined_diff.png";

/// Plain-text report
pub const REPORT_NAME: &str = "comparison_report.txt";

/// JSON report
pub const JSON_REPORT_NAME: &str = "comparison_report.json";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";
