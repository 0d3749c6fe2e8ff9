//! # Error Module
//!
//! Error types for the pixel comparison tool.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, sizes, modes, the offending value
//! - **Fail fast** - every error aborts the run, nothing is retried

use crate::core::raster::PixelMode;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum PixelDiffError {
    #[error("Incompatible images: {0}")]
    Incompatible(#[from] IncompatibleImagesError),

    #[error("Invalid tolerance: {0}")]
    Tolerance(#[from] ToleranceError),

    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

/// The two inputs cannot be compared pixel by pixel
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IncompatibleImagesError {
    #[error("Images have different sizes: {}x{} vs {}x{}", first.0, first.1, second.0, second.1)]
    SizeMismatch {
        first: (u32, u32),
        second: (u32, u32),
    },

    #[error("Image modes do not match: {first} vs {second}")]
    ModeMismatch { first: PixelMode, second: PixelMode },

    #[error("Image formats do not match: {first} vs {second}")]
    FormatMismatch { first: String, second: String },
}

/// Tolerance outside the accepted percentage range
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToleranceError {
    #[error("Tolerance value '{value}' must be between 0 and 100")]
    OutOfRange { value: f64 },

    #[error("Tolerance value '{input}' is not a valid number")]
    NotANumber { input: String },
}

/// Errors that occur while loading an input image
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("File '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("File '{}' is not a supported image format (.{extension})", path.display())]
    UnsupportedExtension { path: PathBuf, extension: String },

    #[error("Could not decode image {}: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to read image file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while persisting difference images or the report
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode {}: {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, PixelDiffError>;
