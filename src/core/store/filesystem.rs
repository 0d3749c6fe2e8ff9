//! On-disk output store.

use super::OutputStore;
use crate::core::codec::encode_png;
use crate::core::raster::Raster;
use crate::error::WriteError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes outputs into a directory, creating it on first write
#[derive(Debug, Clone)]
pub struct FileSystemStore {
    root: PathBuf,
}

impl FileSystemStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn prepare(&self, name: &str) -> Result<PathBuf, WriteError> {
        std::fs::create_dir_all(&self.root).map_err(|e| WriteError::CreateDirectory {
            path: self.root.clone(),
            source: e,
        })?;
        Ok(self.root.join(name))
    }
}

impl OutputStore for FileSystemStore {
    fn write_image(&self, name: &str, image: &Raster) -> Result<PathBuf, WriteError> {
        let path = self.prepare(name)?;
        encode_png(image, &path)?;
        debug!(path = %path.display(), "wrote image");
        Ok(path)
    }

    fn write_text(&self, name: &str, contents: &str) -> Result<PathBuf, WriteError> {
        let path = self.prepare(name)?;
        std::fs::write(&path, contents).map_err(|e| WriteError::Io {
            path: path.clone(),
            source: e,
        })?;
        debug!(path = %path.display(), "wrote text");
        Ok(path)
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::raster::PixelMode;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(dir.path().join("nested").join("output"));

        let path = store
            .write_text("comparison_report.txt", "Total Pixels: 4")
            .unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(path).unwrap(), "Total Pixels: 4");
    }

    #[test]
    fn writes_png_images() {
        let dir = TempDir::new().unwrap();
        let store = FileSystemStore::new(dir.path());

        let path = store
            .write_image("diff_img1.png", &Raster::blank(3, 2, PixelMode::Rgb))
            .unwrap();

        let decoded = image::open(path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (3, 2));
    }

    #[test]
    fn unwritable_root_is_reported() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let store = FileSystemStore::new(blocker.join("output"));
        let result = store.write_text("comparison_report.txt", "x");

        assert!(matches!(result, Err(WriteError::CreateDirectory { .. })));
    }
}
