//! Memory-mapped source reader
//!
//! Large files are memory-mapped and wrapped in a [`Bytes`] handle, so the
//! scanner and the carved payload share the mapping without copying.
//! Small files are read into an owned buffer.

use crate::domain::entities::SourceFile;
use crate::domain::repositories::{SourceReadError, SourceReader};
use bytes::Bytes;
use memmap2::Mmap;
use std::fs::{self, File};
use std::path::Path;

/// Files smaller than this are read rather than mapped
const DEFAULT_MIN_MAP_LEN: u64 = 64 * 1024;

/// Source reader backed by memory-mapped I/O
///
/// # Example
///
/// ```ignore
/// let reader = MmapSourceReader::new();
/// let source = reader.read(Path::new("IMG_0001.jpg"))?;
/// ```
#[derive(Debug, Clone)]
pub struct MmapSourceReader {
    min_map_len: u64,
}

impl MmapSourceReader {
    /// Creates a reader with the default mapping threshold
    pub fn new() -> Self {
        Self {
            min_map_len: DEFAULT_MIN_MAP_LEN,
        }
    }

    /// Sets the size from which files are memory-mapped
    pub fn with_min_map_len(mut self, bytes: u64) -> Self {
        self.min_map_len = bytes.max(1);
        self
    }
}

impl Default for MmapSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceReader for MmapSourceReader {
    fn read(&self, path: &Path) -> Result<SourceFile, SourceReadError> {
        let file = File::open(path).map_err(|e| SourceReadError::from_io(path, e))?;
        let size = file
            .metadata()
            .map_err(|e| SourceReadError::from_io(path, e))?
            .len();

        if size < self.min_map_len {
            let data = fs::read(path).map_err(|e| SourceReadError::from_io(path, e))?;
            return Ok(SourceFile::from_vec(path, data));
        }

        // The mapping is read-only and the file is not written while the
        // scan runs.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| SourceReadError::from_io(path, e))?;

        Ok(SourceFile::new(path, Bytes::from_owner(mmap)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_nonexistent() {
        let reader = MmapSourceReader::new();
        let result = reader.read(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(SourceReadError::NotFound(_))));
    }

    #[test]
    fn test_read_small_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"\xFF\xD8small\xFF\xD9").unwrap();
        file.flush().unwrap();

        let source = MmapSourceReader::new().read(file.path()).unwrap();
        assert_eq!(source.as_slice(), b"\xFF\xD8small\xFF\xD9");
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_read_mapped_file() {
        let mut file = NamedTempFile::new().unwrap();
        let data: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        let reader = MmapSourceReader::new().with_min_map_len(1024);
        let source = reader.read(file.path()).unwrap();
        assert_eq!(source.len(), 4096);
        assert_eq!(source.as_slice(), data.as_slice());
    }

    #[test]
    fn test_read_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let source = MmapSourceReader::new().read(file.path()).unwrap();
        assert!(source.is_empty());
    }
}
