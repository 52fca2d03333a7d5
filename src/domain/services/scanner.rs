//! Motion photo scanner
//!
//! Chains locator, validator and carver over one source buffer.

use super::boundary_locator::locate_eoi_with;
use super::motion_tag_validator::MotionTagValidator;
use super::payload_carver::PayloadCarver;
use crate::domain::entities::{ExtractionOutcome, ScanConfig, ScanResult, SourceFile};
use thiserror::Error;
use tracing::debug;

/// Per-file scan failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("not a JPEG: no end-of-image marker found")]
    NotAJpeg,

    #[error("malformed payload span {start}..{end} in a {total_length}-byte file")]
    MalformedPayloadSpan {
        start: usize,
        end: usize,
        total_length: usize,
    },
}

/// Scans motion photos for an appended video
///
/// The scanner holds no mutable state; one instance can be shared across
/// threads and every call depends only on the buffer it is given.
///
/// # Example
///
/// ```
/// use motioncarve::domain::entities::{ScanConfig, ScanStatus};
/// use motioncarve::domain::services::MotionPhotoScanner;
///
/// let mut data = vec![0xFF, 0xD8, 0xFF, 0xD9];
/// data.extend_from_slice(&[0, 0, 0, 16]);
/// data.extend_from_slice(b"ftypisom");
/// data.extend_from_slice(&[0; 4]);
///
/// let scanner = MotionPhotoScanner::new(ScanConfig::default());
/// let result = scanner.scan(&data).unwrap();
/// assert_eq!(result.status(), ScanStatus::PayloadFound);
/// assert_eq!(result.payload().unwrap().start_offset(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct MotionPhotoScanner {
    config: ScanConfig,
    validator: MotionTagValidator,
    carver: PayloadCarver,
}

impl MotionPhotoScanner {
    /// Creates a scanner with the default tag vocabulary and MP4 signature
    pub fn new(config: ScanConfig) -> Self {
        Self::with_parts(config, MotionTagValidator::new(), PayloadCarver::new())
    }

    /// Creates a scanner from explicit stages
    pub fn with_parts(
        config: ScanConfig,
        validator: MotionTagValidator,
        carver: PayloadCarver,
    ) -> Self {
        Self {
            config,
            validator,
            carver,
        }
    }

    /// Returns the configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scans a buffer
    ///
    /// With `require_motion_tag` set, a buffer without a tag before the
    /// image end is reported as skipped and the tail is never searched.
    pub fn scan(&self, data: &[u8]) -> Result<ScanResult, ScanError> {
        let eoi = locate_eoi_with(data, self.config.eoi_search)?;
        let tag = self.validator.find_tag(data, eoi);

        if self.config.require_motion_tag && tag.is_none() {
            debug!(eoi, "no motion tag before image end");
            return Ok(ScanResult::skipped_no_motion_tag(eoi));
        }

        match self
            .carver
            .carve(data, eoi, self.config.max_tail_search_bytes)?
        {
            Some(span) => {
                debug!(
                    eoi,
                    start = span.start_offset(),
                    end = span.end_offset(),
                    kind = %span.container_kind(),
                    "payload located"
                );
                Ok(ScanResult::payload_found(eoi, tag, span))
            }
            None => Ok(ScanResult::no_payload(eoi, tag)),
        }
    }

    /// Scans a source file and carves its payload
    pub fn extract(&self, source: &SourceFile) -> Result<Option<ExtractionOutcome>, ScanError> {
        let result = self.scan(source.as_slice())?;

        Ok(result
            .payload()
            .map(|span| ExtractionOutcome::carve(source, *span)))
    }
}

impl Default for MotionPhotoScanner {
    fn default() -> Self {
        Self::new(ScanConfig::default())
    }
}
