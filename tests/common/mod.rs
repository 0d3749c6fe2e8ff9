//! Test image generators shared by the integration tests.

#![allow(dead_code)]

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::path::{Path, PathBuf};

pub const GREEN: [u8; 3] = [0, 255, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Solid colour image; the container follows the extension of `name`
pub fn solid(dir: &Path, name: &str, color: [u8; 3], size: (u32, u32)) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(size.0, size.1, Rgb(color))
        .save(&path)
        .unwrap();
    path
}

/// Green 100x100 image with a red 11x11 square at (10,10)
pub fn small_difference(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut img = RgbImage::from_pixel(100, 100, Rgb(GREEN));
    for y in 10..=20 {
        for x in 10..=20 {
            img.put_pixel(x, y, Rgb(RED));
        }
    }
    img.save(&path).unwrap();
    path
}

/// Green 100x100 image with two 10x10 blocks: one 12 levels off the
/// background in R and B, one 25 levels off
pub fn tolerance_blocks(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    let mut img = RgbImage::from_pixel(100, 100, Rgb(GREEN));
    for y in 20..30 {
        for x in 20..30 {
            img.put_pixel(x, y, Rgb([12, 255, 12]));
        }
    }
    for y in 30..40 {
        for x in 30..40 {
            img.put_pixel(x, y, Rgb([25, 255, 25]));
        }
    }
    img.save(&path).unwrap();
    path
}

/// Solid grayscale image
pub fn grayscale(dir: &Path, name: &str, intensity: u8, size: (u32, u32)) -> PathBuf {
    let path = dir.join(name);
    GrayImage::from_pixel(size.0, size.1, Luma([intensity]))
        .save(&path)
        .unwrap();
    path
}

/// Zero-byte file with an image extension
pub fn empty_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"").unwrap();
    path
}

/// A PDF-looking file
pub fn fake_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("invalid_image.pdf");
    std::fs::write(&path, b"%PDF-1.4\n%").unwrap();
    path
}
