//! Output store trait definition.

use crate::core::raster::Raster;
use crate::error::WriteError;
use std::path::PathBuf;
use std::sync::Arc;

/// Trait for places the comparison outputs can be written to
pub trait OutputStore: Send + Sync {
    /// Persist a difference image under `name`
    ///
    /// Returns where the image ended up.
    fn write_image(&self, name: &str, image: &Raster) -> Result<PathBuf, WriteError>;

    /// Persist a text document (report) under `name`
    fn write_text(&self, name: &str, contents: &str) -> Result<PathBuf, WriteError>;

    /// Human-readable description of the destination
    fn describe(&self) -> String;
}

impl<S: OutputStore + ?Sized> OutputStore for Arc<S> {
    fn write_image(&self, name: &str, image: &Raster) -> Result<PathBuf, WriteError> {
        (**self).write_image(name, image)
    }

    fn write_text(&self, name: &str, contents: &str) -> Result<PathBuf, WriteError> {
        (**self).write_text(name, contents)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
