//! # Core Module
//!
//! The UI-agnostic comparison engine.
//!
//! ## Modules
//! - `raster` - Decoded pixel grids
//! - `codec` - Input validation, decoding and PNG encoding
//! - `comparator` - Per-channel differences and the tolerance mask
//! - `render` - Difference images built from the mask
//! - `reporter` - Text and JSON reports
//! - `store` - Where outputs are written
//! - `pipeline` - Orchestrates the full workflow

pub mod codec;
pub mod comparator;
pub mod pipeline;
pub mod raster;
pub mod render;
pub mod reporter;
pub mod store;

// Re-export commonly used types
pub use comparator::{CompareConfig, Comparator, ComparisonResult, DifferenceMask, Tolerance};
pub use raster::{PixelMode, Raster};
pub use render::{CombinedStyle, DifferenceImages};
