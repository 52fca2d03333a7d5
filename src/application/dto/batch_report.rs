//! Batch report DTOs

use crate::domain::entities::{PayloadSpan, ScanConfig, ScanResult};
use crate::utils::format_bytes;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Terminal status of one file in a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FileStatus {
    /// Payload carved and written
    Extracted { output: PathBuf, bytes: u64 },
    /// Motion tag required but absent
    SkippedNoMotionTag,
    /// No container after the image end
    SkippedNoPayload,
    /// No end-of-image marker
    NotAJpeg,
    /// Carved span violated its invariant
    Malformed { message: String },
    /// Reading the source or writing the payload failed
    IoError { message: String },
}

impl FileStatus {
    /// Returns a short label for tables and logs
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Extracted { .. } => "extracted",
            FileStatus::SkippedNoMotionTag => "skipped (no motion tag)",
            FileStatus::SkippedNoPayload => "skipped (no payload)",
            FileStatus::NotAJpeg => "not a JPEG",
            FileStatus::Malformed { .. } => "malformed",
            FileStatus::IoError { .. } => "I/O error",
        }
    }
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Extracted { output, bytes } => write!(
                f,
                "extracted {} to {}",
                format_bytes(*bytes),
                output.display()
            ),
            FileStatus::Malformed { message } | FileStatus::IoError { message } => {
                write!(f, "{}: {}", self.label(), message)
            }
            _ => f.write_str(self.label()),
        }
    }
}

/// Everything recorded about one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub eoi_offset: Option<usize>,
    pub motion_tag: Option<&'static str>,
    pub span: Option<PayloadSpan>,
    /// SHA-256 of the written payload, hex encoded
    pub sha256: Option<String>,
}

impl FileReport {
    /// Creates a report with only a status
    pub fn new(path: impl Into<PathBuf>, status: FileStatus) -> Self {
        Self {
            path: path.into(),
            status,
            eoi_offset: None,
            motion_tag: None,
            span: None,
            sha256: None,
        }
    }

    /// Copies the scan details into the report
    pub fn with_scan(mut self, result: &ScanResult) -> Self {
        self.eoi_offset = result.eoi_offset();
        self.motion_tag = result.matched_tag();
        self.span = result.payload().copied();
        self
    }

    /// Attaches the payload digest
    pub fn with_digest(mut self, sha256: String) -> Self {
        self.sha256 = Some(sha256);
        self
    }
}

/// Per-status counts for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub extracted: usize,
    pub skipped_no_tag: usize,
    pub skipped_no_payload: usize,
    pub not_a_jpeg: usize,
    pub malformed: usize,
    pub io_error: usize,
    pub bytes_extracted: u64,
}

impl BatchSummary {
    /// Counts one terminal status
    pub fn record(&mut self, status: &FileStatus) {
        self.total += 1;
        match status {
            FileStatus::Extracted { bytes, .. } => {
                self.extracted += 1;
                self.bytes_extracted += bytes;
            }
            FileStatus::SkippedNoMotionTag => self.skipped_no_tag += 1,
            FileStatus::SkippedNoPayload => self.skipped_no_payload += 1,
            FileStatus::NotAJpeg => self.not_a_jpeg += 1,
            FileStatus::Malformed { .. } => self.malformed += 1,
            FileStatus::IoError { .. } => self.io_error += 1,
        }
    }

    /// Returns the number of files that ended in a failure
    pub fn failures(&self) -> usize {
        self.not_a_jpeg + self.malformed + self.io_error
    }
}

/// Outcome of the optional frame extraction pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameSummary {
    /// Videos handed to the extractor
    pub videos: usize,
    /// Frames produced across all videos
    pub frames: usize,
    /// Videos the extractor failed on
    pub failed: usize,
    /// The tool could not be started
    pub unavailable: bool,
}

impl FrameSummary {
    /// Records a successful run
    pub fn record_success(&mut self, frames: usize) {
        self.videos += 1;
        self.frames += frames;
    }

    /// Records a failed run
    pub fn record_failure(&mut self) {
        self.videos += 1;
        self.failed += 1;
    }
}

/// Result of a batch extraction run
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Input directory or file
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub config: ScanConfig,
    pub files: Vec<FileReport>,
    pub summary: BatchSummary,
    pub frames: Option<FrameSummary>,
    pub duration: Duration,
}

impl BatchReport {
    /// Creates an empty report
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, config: ScanConfig) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            config,
            files: Vec::new(),
            summary: BatchSummary::default(),
            frames: None,
            duration: Duration::ZERO,
        }
    }

    /// Adds a file and counts its status
    pub fn add_file(&mut self, report: FileReport) {
        self.summary.record(&report.status);
        self.files.push(report);
    }

    /// Returns the report for `path`
    pub fn file(&self, path: &Path) -> Option<&FileReport> {
        self.files.iter().find(|f| f.path == path)
    }

    /// Returns the paths of all written payloads
    pub fn extracted_outputs(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter_map(|f| match &f.status {
                FileStatus::Extracted { output, .. } => Some(output.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns a summary string
    pub fn summary_text(&self) -> String {
        let s = &self.summary;
        let mut text = format!(
            "Extracted {} / {} files ({}) in {:.2}s\n",
            s.extracted,
            s.total,
            format_bytes(s.bytes_extracted),
            self.duration.as_secs_f64()
        );

        text.push_str(&format!("  - skipped (no motion tag): {}\n", s.skipped_no_tag));
        text.push_str(&format!("  - skipped (no payload):    {}\n", s.skipped_no_payload));
        text.push_str(&format!("  - not a JPEG:              {}\n", s.not_a_jpeg));
        text.push_str(&format!("  - malformed:               {}\n", s.malformed));
        text.push_str(&format!("  - I/O errors:              {}\n", s.io_error));

        if let Some(frames) = &self.frames {
            if frames.unavailable {
                text.push_str("Frame extraction: tool unavailable\n");
            } else {
                text.push_str(&format!(
                    "Frame extraction: {} frames from {} videos ({} failed)\n",
                    frames.frames, frames.videos, frames.failed
                ));
            }
        }

        text.push_str(&format!("Output folder: {}\n", self.output_dir.display()));
        text
    }
}
