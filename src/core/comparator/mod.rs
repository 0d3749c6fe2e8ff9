//! # Comparator Module
//!
//! Tolerance-based pixel comparison of two rasters.
//!
//! ## How It Works
//! 1. Validate that both rasters share size and mode
//! 2. Compute the per-channel absolute difference
//! 3. Threshold it into a difference mask (any channel over `T` flags the pixel)
//! 4. Render the three difference images
//! 5. Summarize the mask into counts
//!
//! ## Thresholds
//! | Tolerance | T   | Flags                  |
//! |-----------|-----|------------------------|
//! | 0%        | 0   | any difference         |
//! | 5%        | 13  | channel diff > 13      |
//! | 20%       | 51  | channel diff > 51      |
//! | 100%      | 255 | nothing                |

mod difference;
mod mask;
mod tolerance;

pub use difference::{compute_difference, DifferenceGrid};
pub use mask::{apply_tolerance, DifferenceMask};
pub use tolerance::Tolerance;

use crate::core::raster::Raster;
use crate::core::render::{build_difference_images, CombinedStyle, DifferenceImages};
use crate::error::{IncompatibleImagesError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Summary statistics of one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Pixels in each image (W x H)
    pub total_pixels: u64,
    /// Pixels flagged in the difference mask
    pub differing_pixels: u64,
    /// Share of differing pixels (0-100)
    pub percent_different: f64,
    /// Tolerance percentage the comparison ran with
    pub tolerance_percent: f64,
    /// Absolute channel threshold derived from the tolerance
    pub threshold: u8,
}

impl ComparisonResult {
    /// True when no pixel differs beyond the tolerance
    pub fn is_similar(&self) -> bool {
        self.differing_pixels == 0
    }

    /// Pixels within tolerance
    pub fn matching_pixels(&self) -> u64 {
        self.total_pixels - self.differing_pixels
    }
}

/// Check that two rasters can be compared pixel by pixel
pub fn validate(first: &Raster, second: &Raster) -> std::result::Result<(), IncompatibleImagesError> {
    if first.dimensions() != second.dimensions() {
        return Err(IncompatibleImagesError::SizeMismatch {
            first: first.dimensions(),
            second: second.dimensions(),
        });
    }
    if first.mode() != second.mode() {
        return Err(IncompatibleImagesError::ModeMismatch {
            first: first.mode(),
            second: second.mode(),
        });
    }
    Ok(())
}

/// Reduce a mask to counts.
///
/// An empty mask (0 pixels) reports 0% different.
pub fn summarize(mask: &DifferenceMask, tolerance: Tolerance) -> ComparisonResult {
    let total_pixels = mask.len();
    let differing_pixels = mask.count_different();
    let percent_different = if total_pixels == 0 {
        0.0
    } else {
        100.0 * differing_pixels as f64 / total_pixels as f64
    };

    ComparisonResult {
        total_pixels,
        differing_pixels,
        percent_different,
        tolerance_percent: tolerance.percent(),
        threshold: tolerance.threshold(),
    }
}

/// Comparison settings
#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    /// Tolerance applied to every channel
    pub tolerance: Tolerance,
    /// How the combined difference image is drawn
    pub combined_style: CombinedStyle,
    /// Whether both input files must share a container format
    pub strict_format: bool,
}

impl CompareConfig {
    /// Create a configuration with defaults (0% tolerance, marker colours)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tolerance
    pub fn tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set how the combined difference image is drawn
    pub fn combined_style(mut self, style: CombinedStyle) -> Self {
        self.combined_style = style;
        self
    }

    /// Require both input files to share a container format
    pub fn strict_format(mut self, strict: bool) -> Self {
        self.strict_format = strict;
        self
    }
}

/// Everything one comparison produces
#[derive(Debug, Clone)]
pub struct Comparison {
    pub mask: DifferenceMask,
    pub images: DifferenceImages,
    pub result: ComparisonResult,
}

/// Runs the validate → diff → threshold → render → summarize pipeline
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare two rasters.
    ///
    /// Fails without producing anything if the rasters are incompatible.
    pub fn compare(&self, first: &Raster, second: &Raster) -> Result<Comparison> {
        let tolerance = self.config.tolerance;

        let diff = compute_difference(first, second)?;
        debug!(
            width = diff.width(),
            height = diff.height(),
            mode = %diff.mode(),
            max_difference = diff.max_difference(),
            "computed difference grid"
        );

        let mask = apply_tolerance(&diff, tolerance);
        let images = build_difference_images(first, second, &mask, self.config.combined_style)?;
        let result = summarize(&mask, tolerance);

        debug!(
            threshold = tolerance.threshold(),
            differing = result.differing_pixels,
            total = result.total_pixels,
            "applied tolerance"
        );

        Ok(Comparison {
            mask,
            images,
            result,
        })
    }
}
