//! # Codec Module
//!
//! Reads input images into rasters and writes rasters back out as PNG.
//!
//! ## Supported inputs
//! `.jpg`, `.jpeg`, `.png`, `.bmp`, `.tiff`, `.tif`, `.gif` (case-insensitive).
//! The extension is checked before the file is opened; the magic bytes are
//! checked before a full decode is attempted.

mod bytes;
mod decode;
mod encode;

pub use bytes::{has_image_header, read_file_bytes, FileBytes};
pub use decode::ImageDecoder;
pub use encode::encode_png;

use crate::error::{DecodeError, IncompatibleImagesError, PixelDiffError};
use std::path::Path;

/// Extensions accepted for input images
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "gif"];

/// Container formats accepted as input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
    Tiff,
    Gif,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("jpg" | "jpeg") => Some(Self::Jpeg),
            Some("png") => Some(Self::Png),
            Some("bmp") => Some(Self::Bmp),
            Some("tiff" | "tif") => Some(Self::Tiff),
            Some("gif") => Some(Self::Gif),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageFormat::Jpeg => write!(f, "JPEG"),
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Bmp => write!(f, "BMP"),
            ImageFormat::Tiff => write!(f, "TIFF"),
            ImageFormat::Gif => write!(f, "GIF"),
        }
    }
}

/// Check that an input path exists and has a supported extension
pub fn check_input(path: &Path) -> Result<ImageFormat, DecodeError> {
    if !path.is_file() {
        return Err(DecodeError::NotFound {
            path: path.to_path_buf(),
        });
    }

    ImageFormat::from_path(path).ok_or_else(|| DecodeError::UnsupportedExtension {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default(),
    })
}

/// Require two inputs to share a container format
pub fn check_same_format(first: &Path, second: &Path) -> Result<(), PixelDiffError> {
    let first_format = check_input(first)?;
    let second_format = check_input(second)?;

    if first_format != second_format {
        return Err(IncompatibleImagesError::FormatMismatch {
            first: first_format.to_string(),
            second: second_format.to_string(),
        }
        .into());
    }
    Ok(())
}
