//! Payload span entity

use super::container::ContainerKind;
use serde::Serialize;
use std::ops::Range;

/// A `[start, end)` byte range of a source file holding an embedded container
///
/// A span can only be built through [`PayloadSpan::new`], which enforces
/// `start_offset < end_offset <= total_length`. The carver additionally
/// guarantees `start_offset >= eoi_offset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadSpan {
    start_offset: usize,
    end_offset: usize,
    container_kind: ContainerKind,
}

impl PayloadSpan {
    /// Creates a span, or `None` when the range is empty or runs past
    /// `total_length`
    pub fn new(
        start_offset: usize,
        end_offset: usize,
        container_kind: ContainerKind,
        total_length: usize,
    ) -> Option<Self> {
        if start_offset >= end_offset || end_offset > total_length {
            return None;
        }
        Some(Self {
            start_offset,
            end_offset,
            container_kind,
        })
    }

    /// Returns the offset of the first payload byte
    pub fn start_offset(&self) -> usize {
        self.start_offset
    }

    /// Returns the offset one past the last payload byte
    pub fn end_offset(&self) -> usize {
        self.end_offset
    }

    /// Returns the detected container kind
    pub fn container_kind(&self) -> ContainerKind {
        self.container_kind
    }

    /// Returns the payload length in bytes
    pub fn len(&self) -> usize {
        self.end_offset - self.start_offset
    }

    /// Always false: a span is never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the span as a slice range
    pub fn range(&self) -> Range<usize> {
        self.start_offset..self.end_offset
    }
}
