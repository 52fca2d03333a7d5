//! Scan result entity
//!
//! The outcome of running the locator, validator and carver over one
//! source buffer.

use super::payload_span::PayloadSpan;
use serde::Serialize;
use std::fmt;

/// Terminal status of a successful scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    /// A container was located after the image end
    PayloadFound,
    /// A motion tag was required and none was present
    SkippedNoMotionTag,
    /// Nothing recognizable follows the image end
    NoPayloadFound,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ScanStatus::PayloadFound => "payload found",
            ScanStatus::SkippedNoMotionTag => "skipped: no motion tag",
            ScanStatus::NoPayloadFound => "no payload found",
        };
        f.write_str(text)
    }
}

/// Result of scanning a single source buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Offset immediately after the end-of-image marker
    eoi_offset: Option<usize>,
    /// Vocabulary entry that matched before the image end
    matched_tag: Option<&'static str>,
    /// Located payload, if any
    payload: Option<PayloadSpan>,
    status: ScanStatus,
}

impl ScanResult {
    /// A scan that located a payload
    pub fn payload_found(
        eoi_offset: usize,
        matched_tag: Option<&'static str>,
        span: PayloadSpan,
    ) -> Self {
        Self {
            eoi_offset: Some(eoi_offset),
            matched_tag,
            payload: Some(span),
            status: ScanStatus::PayloadFound,
        }
    }

    /// A scan stopped by the motion tag gate
    pub fn skipped_no_motion_tag(eoi_offset: usize) -> Self {
        Self {
            eoi_offset: Some(eoi_offset),
            matched_tag: None,
            payload: None,
            status: ScanStatus::SkippedNoMotionTag,
        }
    }

    /// A scan that found nothing after the image end
    pub fn no_payload(eoi_offset: usize, matched_tag: Option<&'static str>) -> Self {
        Self {
            eoi_offset: Some(eoi_offset),
            matched_tag,
            payload: None,
            status: ScanStatus::NoPayloadFound,
        }
    }

    /// Returns the offset just past the end-of-image marker
    pub fn eoi_offset(&self) -> Option<usize> {
        self.eoi_offset
    }

    /// Returns whether a motion tag was seen before the image end
    pub fn motion_tag_present(&self) -> bool {
        self.matched_tag.is_some()
    }

    /// Returns the motion tag that matched
    pub fn matched_tag(&self) -> Option<&'static str> {
        self.matched_tag
    }

    /// Returns the located payload span
    pub fn payload(&self) -> Option<&PayloadSpan> {
        self.payload.as_ref()
    }

    /// Returns the scan status
    pub fn status(&self) -> ScanStatus {
        self.status
    }
}
