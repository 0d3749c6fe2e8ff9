//! # Render Module
//!
//! Turns a difference mask into the three output images.
//!
//! ## Outputs
//! - `first`: pixels of the first image where the mask is set, black elsewhere
//! - `second`: pixels of the second image where the mask is set, black elsewhere
//! - `combined`: always RGB, black where the mask is clear; masked pixels are
//!   drawn according to [`CombinedStyle`]
//!
//! ## Marker colours
//! | Colour  | Meaning                                      |
//! |---------|----------------------------------------------|
//! | red     | first image brighter at this pixel           |
//! | blue    | second image brighter at this pixel          |
//! | magenta | same brightness, different colour            |

use crate::core::comparator::{validate, DifferenceMask};
use crate::core::raster::{PixelMode, Raster};
use crate::error::IncompatibleImagesError;
use serde::{Deserialize, Serialize};

/// Sample value used for pixels that are not different
pub const BACKGROUND: u8 = 0;

/// Marks pixels where the first image is brighter
pub const FIRST_BRIGHTER: [u8; 3] = [255, 0, 0];

/// Marks pixels where the second image is brighter
pub const SECOND_BRIGHTER: [u8; 3] = [0, 0, 255];

/// Marks pixels with equal brightness but a different colour
pub const HUE_SHIFT: [u8; 3] = [255, 0, 255];

/// How differing pixels are drawn in the combined image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombinedStyle {
    /// Solid marker colours telling which image is brighter
    #[default]
    Markers,
    /// Channel-wise saturating sum of both difference images
    Overlay,
}

impl std::fmt::Display for CombinedStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CombinedStyle::Markers => write!(f, "markers"),
            CombinedStyle::Overlay => write!(f, "overlay"),
        }
    }
}

/// The three rendered difference images
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifferenceImages {
    /// Differing pixels taken from the first image
    pub first: Raster,
    /// Differing pixels taken from the second image
    pub second: Raster,
    /// Both sources drawn together (RGB)
    pub combined: Raster,
}

/// Render the difference images for a mask
pub fn build_difference_images(
    first: &Raster,
    second: &Raster,
    mask: &DifferenceMask,
    style: CombinedStyle,
) -> Result<DifferenceImages, IncompatibleImagesError> {
    validate(first, second)?;
    if mask.dimensions() != first.dimensions() {
        return Err(IncompatibleImagesError::SizeMismatch {
            first: first.dimensions(),
            second: mask.dimensions(),
        });
    }

    let first_only = keep_masked(first, mask);
    let second_only = keep_masked(second, mask);

    let combined = match style {
        CombinedStyle::Markers => draw_markers(first, second, mask),
        CombinedStyle::Overlay => draw_overlay(&first_only, &second_only),
    };

    Ok(DifferenceImages {
        first: first_only,
        second: second_only,
        combined,
    })
}

/// Copy pixels where the mask is set; everything else stays at `BACKGROUND`
fn keep_masked(source: &Raster, mask: &DifferenceMask) -> Raster {
    let channels = source.mode().channels();
    let mut out = Raster::blank(source.width(), source.height(), source.mode());

    for ((target, pixel), &different) in out
        .samples_mut()
        .chunks_exact_mut(channels)
        .zip(source.pixels())
        .zip(mask.bits())
    {
        if different {
            target.copy_from_slice(pixel);
        }
    }

    out
}

fn draw_markers(first: &Raster, second: &Raster, mask: &DifferenceMask) -> Raster {
    let mut out = Raster::blank(first.width(), first.height(), PixelMode::Rgb);

    for (((target, a), b), &different) in out
        .samples_mut()
        .chunks_exact_mut(3)
        .zip(first.pixels())
        .zip(second.pixels())
        .zip(mask.bits())
    {
        if !different {
            continue;
        }
        let marker = match intensity(a).cmp(&intensity(b)) {
            std::cmp::Ordering::Greater => FIRST_BRIGHTER,
            std::cmp::Ordering::Less => SECOND_BRIGHTER,
            std::cmp::Ordering::Equal => HUE_SHIFT,
        };
        target.copy_from_slice(&marker);
    }

    out
}

fn draw_overlay(first_only: &Raster, second_only: &Raster) -> Raster {
    let mut out = Raster::blank(first_only.width(), first_only.height(), PixelMode::Rgb);

    for ((target, a), b) in out
        .samples_mut()
        .chunks_exact_mut(3)
        .zip(first_only.pixels())
        .zip(second_only.pixels())
    {
        for ((t, x), y) in target.iter_mut().zip(as_rgb(a)).zip(as_rgb(b)) {
            *t = x.saturating_add(y);
        }
    }

    out
}

fn intensity(pixel: &[u8]) -> u16 {
    pixel.iter().map(|&v| v as u16).sum()
}

fn as_rgb(pixel: &[u8]) -> [u8; 3] {
    match *pixel {
        [v] => [v, v, v],
        [r, g, b] => [r, g, b],
        _ => [BACKGROUND; 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(samples: &[u8]) -> Raster {
        Raster::from_raw(2, 2, PixelMode::Grayscale, samples.to_vec()).unwrap()
    }

    fn mask(bits: &[bool]) -> DifferenceMask {
        DifferenceMask::from_bits(2, 2, bits.to_vec()).unwrap()
    }

    #[test]
    fn source_images_keep_only_masked_pixels() {
        let first = gray(&[10, 10, 10, 10]);
        let second = gray(&[10, 50, 10, 10]);
        let mask = mask(&[false, true, false, false]);

        let images =
            build_difference_images(&first, &second, &mask, CombinedStyle::Markers).unwrap();

        assert_eq!(images.first.samples(), &[0, 10, 0, 0]);
        assert_eq!(images.second.samples(), &[0, 50, 0, 0]);
        assert_eq!(images.first.mode(), PixelMode::Grayscale);
    }

    #[test]
    fn markers_tell_which_image_is_brighter() {
        let first = gray(&[200, 10, 77, 0]);
        let second = gray(&[100, 90, 77, 0]);
        let mask = mask(&[true, true, false, false]);

        let images =
            build_difference_images(&first, &second, &mask, CombinedStyle::Markers).unwrap();

        assert_eq!(images.combined.mode(), PixelMode::Rgb);
        assert_eq!(images.combined.pixel(0, 0), &FIRST_BRIGHTER);
        assert_eq!(images.combined.pixel(1, 0), &SECOND_BRIGHTER);
        assert_eq!(images.combined.pixel(0, 1), &[0, 0, 0]);
    }

    #[test]
    fn markers_flag_hue_shift() {
        let first = Raster::filled(1, 1, PixelMode::Rgb, &[255, 0, 0]).unwrap();
        let second = Raster::filled(1, 1, PixelMode::Rgb, &[0, 255, 0]).unwrap();
        let mask = DifferenceMask::from_bits(1, 1, vec![true]).unwrap();

        let images =
            build_difference_images(&first, &second, &mask, CombinedStyle::Markers).unwrap();

        assert_eq!(images.combined.pixel(0, 0), &HUE_SHIFT);
    }

    #[test]
    fn overlay_saturates_instead_of_wrapping() {
        let first = Raster::filled(1, 1, PixelMode::Rgb, &[0, 255, 0]).unwrap();
        let second = Raster::filled(1, 1, PixelMode::Rgb, &[0, 128, 0]).unwrap();
        let mask = DifferenceMask::from_bits(1, 1, vec![true]).unwrap();

        let images =
            build_difference_images(&first, &second, &mask, CombinedStyle::Overlay).unwrap();

        assert_eq!(images.combined.pixel(0, 0), &[0, 255, 0]);
    }

    #[test]
    fn overlay_expands_grayscale() {
        let first = gray(&[0, 30, 0, 0]);
        let second = gray(&[0, 40, 0, 0]);
        let mask = mask(&[false, true, false, false]);

        let images =
            build_difference_images(&first, &second, &mask, CombinedStyle::Overlay).unwrap();

        assert_eq!(images.combined.pixel(1, 0), &[70, 70, 70]);
        assert_eq!(images.combined.pixel(0, 0), &[0, 0, 0]);
    }

    #[test]
    fn mask_of_wrong_size_is_rejected() {
        let first = gray(&[0; 4]);
        let mask = DifferenceMask::from_bits(1, 1, vec![true]).unwrap();

        assert!(build_difference_images(&first, &first, &mask, CombinedStyle::Markers).is_err());
    }

    #[test]
    fn style_display() {
        assert_eq!(CombinedStyle::default().to_string(), "markers");
        assert_eq!(CombinedStyle::Overlay.to_string(), "overlay");
    }
}
