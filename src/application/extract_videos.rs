//! Extract videos use case
//!
//! Runs the scanner over a batch of candidate files and writes every
//! carved payload. Files are independent, so the batch is a parallel map;
//! a failure on one file is recorded in its report and never stops the
//! others.

use crate::application::dto::{BatchReport, FileReport, FileStatus};
use crate::domain::entities::{ExtractionOutcome, ScanConfig, ScanResult, ScanStatus, SourceFile};
use crate::domain::repositories::{PayloadWriter, SourceReader};
use crate::domain::services::{MotionPhotoScanner, PayloadCarver, ScanError, xmp_packets};
use crate::utils::hex_preview;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Progress callback: `(files done, files total)`
pub type ProgressCallback = Box<dyn Fn(usize, usize) + Send + Sync>;

const XMP_PREVIEW_LEN: usize = 200;
const TAIL_PREVIEW_MIN: usize = 16;

/// Extract videos use case
///
/// Reads each file through `R`, scans it, and persists the payload
/// through `W`.
pub struct ExtractVideosUseCase<R: SourceReader, W: PayloadWriter> {
    reader: R,
    writer: W,
    scanner: MotionPhotoScanner,
}

impl<R: SourceReader, W: PayloadWriter> ExtractVideosUseCase<R, W> {
    /// Creates a new extract videos use case
    pub fn new(reader: R, writer: W, config: ScanConfig) -> Self {
        Self {
            reader,
            writer,
            scanner: MotionPhotoScanner::new(config),
        }
    }

    /// Returns the payload writer
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Processes every file in parallel
    ///
    /// The returned report lists files in the order they were given.
    pub fn execute(
        &self,
        source: &Path,
        files: &[PathBuf],
        progress_callback: Option<ProgressCallback>,
    ) -> BatchReport {
        let start_time = Instant::now();
        let total = files.len();

        info!(
            "Scanning {} candidate files (require motion tag: {})",
            total,
            self.scanner.config().require_motion_tag
        );

        let done = AtomicUsize::new(0);
        let reports: Vec<FileReport> = files
            .par_iter()
            .map(|path| {
                let report = self.process_file(path);
                let current = done.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref callback) = progress_callback {
                    callback(current, total);
                }
                report
            })
            .collect();

        let mut batch = BatchReport::new(source, self.writer.output_dir(), *self.scanner.config());
        for report in reports {
            batch.add_file(report);
        }
        batch.duration = start_time.elapsed();

        info!(
            "Extraction complete: {} of {} files in {:.2}s",
            batch.summary.extracted,
            batch.summary.total,
            batch.duration.as_secs_f64()
        );

        batch
    }

    /// Processes a single file into exactly one terminal status
    pub fn process_file(&self, path: &Path) -> FileReport {
        let source = match self.reader.read(path) {
            Ok(source) => source,
            Err(e) => {
                warn!(path = %path.display(), "Failed to read: {}", e);
                return FileReport::new(path, FileStatus::IoError { message: e.to_string() });
            }
        };

        debug!(path = %path.display(), size = source.len(), "processing");

        let result = match self.scanner.scan(source.as_slice()) {
            Ok(result) => result,
            Err(ScanError::NotAJpeg) => {
                info!(path = %path.display(), "Not a valid JPEG (no end-of-image marker)");
                return FileReport::new(path, FileStatus::NotAJpeg);
            }
            Err(e @ ScanError::MalformedPayloadSpan { .. }) => {
                error!(path = %path.display(), "Refusing to carve: {}", e);
                return FileReport::new(path, FileStatus::Malformed { message: e.to_string() });
            }
        };

        if let Some(span) = result.payload() {
            let outcome = ExtractionOutcome::carve(&source, *span);
            return self.write_outcome(path, &result, &outcome);
        }

        let status = match result.status() {
            ScanStatus::SkippedNoMotionTag => {
                describe_missing_tag(&source);
                FileStatus::SkippedNoMotionTag
            }
            _ => {
                describe_tail(&source, &result);
                FileStatus::SkippedNoPayload
            }
        };

        FileReport::new(path, status).with_scan(&result)
    }

    fn write_outcome(
        &self,
        path: &Path,
        result: &ScanResult,
        outcome: &ExtractionOutcome,
    ) -> FileReport {
        match self.writer.write(outcome) {
            Ok(output) => {
                info!(
                    path = %path.display(),
                    output = %output.display(),
                    bytes = outcome.len(),
                    "Extracted video"
                );
                let digest = hex::encode(Sha256::digest(outcome.payload()));
                let status = FileStatus::Extracted {
                    output,
                    bytes: outcome.len() as u64,
                };
                FileReport::new(path, status)
                    .with_scan(result)
                    .with_digest(digest)
            }
            Err(e) => {
                warn!(path = %path.display(), "Failed to write payload: {}", e);
                FileReport::new(path, FileStatus::IoError { message: e.to_string() })
                    .with_scan(result)
            }
        }
    }
}

/// Logs the XMP packets of a file rejected by the motion tag gate
fn describe_missing_tag(source: &SourceFile) {
    let packets = xmp_packets(source.as_slice());
    debug!(
        path = %source.path().display(),
        "No motion photo tag found ({} XMP packets)",
        packets.len()
    );

    for (index, packet) in packets.iter().enumerate() {
        let preview = &packet[..packet.len().min(XMP_PREVIEW_LEN)];
        debug!(
            "  XMP {}: {}...",
            index + 1,
            String::from_utf8_lossy(preview)
        );
    }
}

/// Logs what follows the image end of a file with no payload
fn describe_tail(source: &SourceFile, result: &ScanResult) {
    let Some(eoi) = result.eoi_offset() else {
        return;
    };

    let probe = PayloadCarver::probe_tail(source.as_slice(), eoi);
    debug!(
        path = %source.path().display(),
        "No container after image end ({} trailing bytes)",
        probe.trailing_bytes
    );

    if probe.trailing_bytes > TAIL_PREVIEW_MIN {
        debug!("  First tail bytes: {}", hex_preview(&probe.preview, probe.preview.len()));
        for (name, offset) in &probe.box_hints {
            debug!("  Found '{}' at offset +{}", name, offset);
        }
    }
}
