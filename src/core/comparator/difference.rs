//! Per-channel absolute difference between two rasters.

use super::validate;
use crate::core::raster::{PixelMode, Raster};
use crate::error::IncompatibleImagesError;
use rayon::prelude::*;

/// Absolute per-channel differences, same shape and mode as the inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceGrid {
    raster: Raster,
}

impl DifferenceGrid {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn mode(&self) -> PixelMode {
        self.raster.mode()
    }

    /// Channel differences of the pixel at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        self.raster.pixel(x, y)
    }

    /// Largest channel difference anywhere in the grid
    pub fn max_difference(&self) -> u8 {
        self.raster.samples().iter().copied().max().unwrap_or(0)
    }

    /// The differences as a raster (useful for inspection or export)
    pub fn as_raster(&self) -> &Raster {
        &self.raster
    }
}

/// Compute |first - second| for every sample.
///
/// Rows are processed in parallel; each output sample depends only on
/// the two input samples at the same position.
pub fn compute_difference(
    first: &Raster,
    second: &Raster,
) -> Result<DifferenceGrid, IncompatibleImagesError> {
    validate(first, second)?;

    let mut raster = Raster::blank(first.width(), first.height(), first.mode());
    let stride = first.row_stride();

    if stride > 0 {
        raster
            .samples_mut()
            .par_chunks_mut(stride)
            .zip(first.samples().par_chunks(stride))
            .zip(second.samples().par_chunks(stride))
            .for_each(|((out, a), b)| {
                for ((o, &x), &y) in out.iter_mut().zip(a).zip(b) {
                    *o = x.abs_diff(y);
                }
            });
    }

    Ok(DifferenceGrid { raster })
}
