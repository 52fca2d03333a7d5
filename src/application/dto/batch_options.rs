//! Batch options DTO

use crate::domain::entities::ScanConfig;
use anyhow::{Result, bail};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory created next to the inputs when no output is given
pub const DEFAULT_OUTPUT_DIR_NAME: &str = "_extracted_videos";
/// Upper bound on a single frame extraction run
pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_secs(120);

/// Whether frames are extracted after the videos are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameMode {
    /// Ask interactively
    #[default]
    Ask,
    /// Extract without asking
    Always,
    /// Never extract
    Never,
}

/// Options for the external frame extractor
#[derive(Debug, Clone, Serialize)]
pub struct FrameOptions {
    pub mode: FrameMode,
    /// ffmpeg executable, looked up on `PATH` when not absolute
    pub ffmpeg_path: PathBuf,
    pub timeout: Duration,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            mode: FrameMode::Ask,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            timeout: DEFAULT_FRAME_TIMEOUT,
        }
    }
}

/// Options for a batch extraction run
#[derive(Debug, Clone, Serialize)]
pub struct BatchOptions {
    /// Directory to scan, or a single file
    pub input: PathBuf,
    /// Where carved videos go (defaults next to the input)
    pub output_dir: Option<PathBuf>,
    /// Options handed to every scan
    pub scan: ScanConfig,
    /// Whether subdirectories are scanned
    pub recursive: bool,
    /// Whether existing output files may be replaced
    pub overwrite: bool,
    /// Worker threads (0 = one per core)
    pub jobs: usize,
    /// Optional JSON report destination
    pub report_path: Option<PathBuf>,
    pub frames: FrameOptions,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("."),
            output_dir: None,
            scan: ScanConfig::default(),
            recursive: false,
            overwrite: false,
            jobs: 0,
            report_path: None,
            frames: FrameOptions::default(),
        }
    }
}

impl BatchOptions {
    /// Creates options for the given input
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            ..Default::default()
        }
    }

    /// Sets the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the scan configuration
    pub fn with_scan_config(mut self, scan: ScanConfig) -> Self {
        self.scan = scan;
        self
    }

    /// Enables recursive discovery
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Sets the frame options
    pub fn with_frames(mut self, frames: FrameOptions) -> Self {
        self.frames = frames;
        self
    }

    /// Returns the output directory, falling back to
    /// `<input dir>/_extracted_videos`
    pub fn resolved_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }

        let base = if self.input.is_file() {
            self.input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
        } else {
            self.input.as_path()
        };

        base.join(DEFAULT_OUTPUT_DIR_NAME)
    }

    /// Returns the directory frames are written under
    pub fn frames_dir(&self) -> PathBuf {
        self.resolved_output_dir().join("frames")
    }

    /// Checks the options before a run
    pub fn validate(&self) -> Result<()> {
        self.scan.validate()?;

        if !self.input.exists() {
            bail!("Input does not exist: {}", self.input.display());
        }

        if self.frames.timeout.is_zero() {
            bail!("Frame extraction timeout must be greater than zero");
        }

        Ok(())
    }
}
