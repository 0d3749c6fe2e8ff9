//! # Raster Module
//!
//! Decoded pixel grids shared by the comparator, the renderer and the codec.
//!
//! A [`Raster`] is a row-major, interleaved buffer of 8-bit samples with
//! one channel (grayscale) or three channels (RGB).

use image::{DynamicImage, GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

/// Pixel format of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PixelMode {
    /// One 8-bit intensity per pixel
    Grayscale,
    /// Three 8-bit intensities per pixel (R, G, B)
    Rgb,
}

impl PixelMode {
    /// Number of samples per pixel
    pub const fn channels(self) -> usize {
        match self {
            PixelMode::Grayscale => 1,
            PixelMode::Rgb => 3,
        }
    }
}

/// Uses the conventional short mode names (`L`, `RGB`).
impl std::fmt::Display for PixelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PixelMode::Grayscale => write!(f, "L"),
            PixelMode::Rgb => write!(f, "RGB"),
        }
    }
}

/// A rectangular grid of 8-bit pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    mode: PixelMode,
    samples: Vec<u8>,
}

impl Raster {
    /// Wrap an existing sample buffer.
    ///
    /// Returns `None` if the buffer length is not `width * height * channels`.
    pub fn from_raw(width: u32, height: u32, mode: PixelMode, samples: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(mode.channels())?;

        if samples.len() != expected {
            return None;
        }

        Some(Self {
            width,
            height,
            mode,
            samples,
        })
    }

    /// Create a raster where every sample is zero (black)
    pub fn blank(width: u32, height: u32, mode: PixelMode) -> Self {
        let len = width as usize * height as usize * mode.channels();
        Self {
            width,
            height,
            mode,
            samples: vec![0; len],
        }
    }

    /// Create a raster with every pixel set to `pixel`.
    ///
    /// Returns `None` if `pixel` does not have one sample per channel.
    pub fn filled(width: u32, height: u32, mode: PixelMode, pixel: &[u8]) -> Option<Self> {
        if pixel.len() != mode.channels() {
            return None;
        }
        let samples = pixel
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * mode.channels())
            .collect();
        Self::from_raw(width, height, mode, samples)
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

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Number of pixels (W x H)
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Number of samples in one row
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.mode.channels()
    }

    /// Raw interleaved samples
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }

    /// Samples of the pixel at (x, y)
    ///
    /// # Panics
    /// Panics if the coordinates are outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let channels = self.mode.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        &self.samples[start..start + channels]
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> std::slice::ChunksExact<'_, u8> {
        self.samples.chunks_exact(self.mode.channels())
    }

    /// Convert a decoded image onto one of the two supported modes.
    ///
    /// Luma images (any bit depth, with or without alpha) become grayscale,
    /// everything with colour becomes RGB. Alpha is dropped.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());

        if image.color().has_color() {
            Self {
                width,
                height,
                mode: PixelMode::Rgb,
                samples: image.to_rgb8().into_raw(),
            }
        } else {
            Self {
                width,
                height,
                mode: PixelMode::Grayscale,
                samples: image.to_luma8().into_raw(),
            }
        }
    }

    /// Convert into an `image` crate buffer for encoding
    pub fn to_dynamic(&self) -> DynamicImage {
        let samples = self.samples.clone();
        let image = match self.mode {
            PixelMode::Grayscale => GrayImage::from_raw(self.width, self.height, samples)
                .map(DynamicImage::ImageLuma8),
            PixelMode::Rgb => RgbImage::from_raw(self.width, self.height, samples)
                .map(DynamicImage::ImageRgb8),
        };

        // Length is checked on construction, so the fallback is unreachable.
        image.unwrap_or_else(|| DynamicImage::new_rgb8(self.width, self.height))
    }
}
