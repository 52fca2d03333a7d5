//! Extraction outcome entity

use super::payload_span::PayloadSpan;
use super::source_file::SourceFile;
use bytes::Bytes;
use std::path::{Path, PathBuf};

/// A carved payload ready to be handed to a writer
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    source_path: PathBuf,
    payload_bytes: Bytes,
    span: PayloadSpan,
}

impl ExtractionOutcome {
    /// Cuts `span` out of `source`
    ///
    /// The span must come from scanning `source`; its bounds were checked
    /// against the source length when it was built.
    pub fn carve(source: &SourceFile, span: PayloadSpan) -> Self {
        Self {
            source_path: source.path().to_path_buf(),
            payload_bytes: source.bytes().slice(span.range()),
            span,
        }
    }

    /// Returns the path of the motion photo the payload came from
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    /// Returns the payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload_bytes
    }

    /// Returns the payload as a shared handle
    pub fn payload_bytes(&self) -> &Bytes {
        &self.payload_bytes
    }

    /// Returns the span inside the source file
    pub fn span(&self) -> &PayloadSpan {
        &self.span
    }

    /// Returns the payload length in bytes
    pub fn len(&self) -> usize {
        self.payload_bytes.len()
    }

    /// Returns whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload_bytes.is_empty()
    }
}
