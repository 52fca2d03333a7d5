//! Source file entity

use bytes::Bytes;
use std::path::{Path, PathBuf};

/// The full, immutable contents of a candidate JPEG
///
/// The bytes are held in a reference-counted [`Bytes`] handle, so carved
/// payloads can share the same backing memory instead of copying it.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    bytes: Bytes,
}

impl SourceFile {
    /// Creates a source file from already-loaded bytes
    pub fn new(path: impl Into<PathBuf>, bytes: Bytes) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// Creates a source file from an owned buffer
    pub fn from_vec(path: impl Into<PathBuf>, data: Vec<u8>) -> Self {
        Self::new(path, Bytes::from(data))
    }

    /// Returns the path the bytes were read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the shared byte handle
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Returns the raw contents
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the total length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns whether the file is empty
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
