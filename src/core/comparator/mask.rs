//! Boolean difference mask produced by thresholding a difference grid.

use super::{DifferenceGrid, Tolerance};
use rayon::prelude::*;

/// Marks which pixels differ beyond the tolerance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl DifferenceMask {
    /// Build a mask from row-major flags.
    ///
    /// Returns `None` if `bits.len() != width * height`.
    pub fn from_bits(width: u32, height: u32, bits: Vec<bool>) -> Option<Self> {
        if bits.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            bits,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether the pixel at (x, y) is different
    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.bits[y as usize * self.width as usize + x as usize]
    }

    /// Row-major flags
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of pixels in the mask
    pub fn len(&self) -> u64 {
        self.bits.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of pixels flagged as different
    pub fn count_different(&self) -> u64 {
        self.bits.iter().filter(|&&b| b).count() as u64
    }

    /// Coordinates of every flagged pixel, row-major
    pub fn different_positions(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let width = self.width.max(1) as usize;
        self.bits
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b)
            .map(move |(i, _)| ((i % width) as u32, (i / width) as u32))
    }
}

/// Threshold a difference grid.
///
/// A pixel is different when any of its channels exceeds the tolerance.
/// For grayscale this is the single channel; for RGB one channel over the
/// threshold is enough to flag the whole pixel.
pub fn apply_tolerance(diff: &DifferenceGrid, tolerance: Tolerance) -> DifferenceMask {
    let width = diff.width() as usize;
    let channels = diff.mode().channels();
    let mut bits = vec![false; width * diff.height() as usize];

    if width > 0 {
        bits.par_chunks_mut(width)
            .zip(diff.as_raster().samples().par_chunks(width * channels))
            .for_each(|(flags, row)| {
                for (flag, pixel) in flags.iter_mut().zip(row.chunks_exact(channels)) {
                    *flag = pixel.iter().any(|&d| tolerance.exceeds(d));
                }
            });
    }

    DifferenceMask {
        width: diff.width(),
        height: diff.height(),
        bits,
    }
}
