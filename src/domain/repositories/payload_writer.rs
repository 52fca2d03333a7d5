//! Payload writer trait
//!
//! Defines the interface for persisting carved payloads.

use crate::domain::entities::ExtractionOutcome;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when writing a payload
#[derive(Error, Debug)]
pub enum PayloadWriteError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Source has no usable file name: {0}")]
    InvalidSourceName(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Trait for writing carved payloads to storage
///
/// The writer decides the output name and location; the scanner only
/// supplies the bytes and the source path they came from.
pub trait PayloadWriter: Send + Sync {
    /// Writes one payload and returns where it was saved
    fn write(&self, outcome: &ExtractionOutcome) -> Result<PathBuf, PayloadWriteError>;

    /// Returns the output directory
    fn output_dir(&self) -> &Path;

    /// Returns the number of payloads written so far
    fn files_written(&self) -> usize;

    /// Returns the total bytes written so far
    fn bytes_written(&self) -> u64;
}
