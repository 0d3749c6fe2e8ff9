//! Memory-mapped file reading for large inputs.
//!
//! Files of 1 MiB or more are mapped instead of copied, which matters for
//! the multi-megapixel images this tool is usually pointed at.

use crate::error::DecodeError;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Minimum file size to use memory-mapped I/O (1MB)
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Read file bytes, memory-mapping large files
pub fn read_file_bytes(path: &Path) -> Result<FileBytes, DecodeError> {
    let io_error = |source| DecodeError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = std::fs::metadata(path).map_err(io_error)?;

    if metadata.len() >= MMAP_THRESHOLD {
        let file = File::open(path).map_err(io_error)?;
        // SAFETY: the mapping is read-only and the file handle outlives
        // every use of the bytes within a single decode.
        let mmap = unsafe { Mmap::map(&file) }.map_err(io_error)?;
        Ok(FileBytes::Mmap(mmap))
    } else {
        let bytes = std::fs::read(path).map_err(io_error)?;
        Ok(FileBytes::Vec(bytes))
    }
}

/// File bytes that may be either owned or memory-mapped.
pub enum FileBytes {
    /// Standard heap-allocated bytes
    Vec(Vec<u8>),
    /// Memory-mapped bytes (zero-copy from disk)
    Mmap(Mmap),
}

impl AsRef<[u8]> for FileBytes {
    fn as_ref(&self) -> &[u8] {
        match self {
            FileBytes::Vec(v) => v,
            FileBytes::Mmap(m) => m,
        }
    }
}

impl std::ops::Deref for FileBytes {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_ref()
    }
}

/// Check the magic bytes of the supported input formats.
///
/// Rejects text files, PDFs and empty files before a full decode is tried.
pub fn has_image_header(bytes: &[u8]) -> bool {
    if bytes.len() < 8 {
        return false;
    }

    // JPEG: FF D8 FF
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return true;
    }

    // PNG: 89 50 4E 47 0D 0A 1A 0A
    if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        return true;
    }

    // GIF: 47 49 46 38
    if bytes.starts_with(b"GIF8") {
        return true;
    }

    // BMP: 42 4D
    if bytes.starts_with(b"BM") {
        return true;
    }

    // TIFF: little or big endian
    bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
}
