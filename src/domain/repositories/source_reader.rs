//! Source reader trait
//!
//! Defines how candidate files are loaded into memory.

use crate::domain::entities::SourceFile;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when reading a source file
#[derive(Error, Debug)]
pub enum SourceReadError {
    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SourceReadError {
    /// Maps an I/O error for `path` onto the matching variant
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => SourceReadError::NotFound(path.display().to_string()),
            io::ErrorKind::PermissionDenied => {
                SourceReadError::PermissionDenied(path.display().to_string())
            }
            _ => SourceReadError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }
}

/// Trait for loading the full contents of a candidate file
///
/// # Example
///
/// ```ignore
/// let reader = MmapSourceReader::new();
/// let source = reader.read(Path::new("PXL_20240101_120000.MP.jpg"))?;
/// println!("{} bytes", source.len());
/// ```
pub trait SourceReader: Send + Sync {
    /// Reads the whole file at `path`
    fn read(&self, path: &Path) -> Result<SourceFile, SourceReadError>;
}
