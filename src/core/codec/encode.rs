//! PNG encoding of output rasters.

use crate::core::raster::Raster;
use crate::error::WriteError;
use image::ImageError;
use std::path::Path;

/// Write a raster to `path` as PNG.
///
/// PNG is lossless, so the written samples match the raster exactly.
pub fn encode_png(raster: &Raster, path: &Path) -> Result<(), WriteError> {
    raster
        .to_dynamic()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| match e {
            ImageError::IoError(source) => WriteError::Io {
                path: path.to_path_buf(),
                source,
            },
            other => WriteError::Encode {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        })
}
