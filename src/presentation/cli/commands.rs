//! CLI arguments using clap

use crate::application::dto::{BatchOptions, FrameMode, FrameOptions};
use crate::domain::entities::{DEFAULT_MAX_TAIL_SEARCH, EoiSearch, ScanConfig};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// motioncarve - Motion Photo Video Extractor
///
/// Recovers the video clip that Google and Samsung cameras append after
/// the image data of a motion photo JPEG.
#[derive(Parser, Debug)]
#[command(name = "motioncarve")]
#[command(version, about = "Extract embedded videos from motion photo JPEGs", long_about = None)]
pub struct Cli {
    /// Directory of JPEG files, or a single file
    #[arg(default_value = ".")]
    pub input: PathBuf,

    /// Output directory for extracted videos [default: <INPUT>/_extracted_videos]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip files that carry no motion photo tag
    #[arg(long)]
    pub require_motion_tag: bool,

    /// Bytes searched after the end of the image for a video header
    #[arg(long, default_value_t = DEFAULT_MAX_TAIL_SEARCH)]
    pub max_tail_search: usize,

    /// End the image at the first end-of-image marker instead of the last
    #[arg(long)]
    pub first_eoi: bool,

    /// Scan subdirectories as well
    #[arg(short, long)]
    pub recursive: bool,

    /// Overwrite existing videos instead of picking a new name
    #[arg(long)]
    pub overwrite: bool,

    /// Worker threads (0 = one per core)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Extract one frame per second from every video without asking
    #[arg(long, conflicts_with = "no_frames")]
    pub frames: bool,

    /// Never extract frames
    #[arg(long)]
    pub no_frames: bool,

    /// ffmpeg executable used for frame extraction
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// Timeout in seconds for each frame extraction run
    #[arg(long, default_value_t = 120)]
    pub frame_timeout: u64,

    /// Write a JSON report of the run to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    pub debug: bool,
}

impl Cli {
    /// Returns the frame extraction mode selected by the flags
    pub fn frame_mode(&self) -> FrameMode {
        if self.frames {
            FrameMode::Always
        } else if self.no_frames {
            FrameMode::Never
        } else {
            FrameMode::Ask
        }
    }

    /// Returns the scan configuration selected by the flags
    pub fn scan_config(&self) -> ScanConfig {
        let eoi_search = if self.first_eoi {
            EoiSearch::First
        } else {
            EoiSearch::Last
        };

        ScanConfig::new()
            .with_required_motion_tag(self.require_motion_tag)
            .with_max_tail_search(self.max_tail_search)
            .with_eoi_search(eoi_search)
    }

    /// Converts the arguments into batch options
    pub fn batch_options(&self) -> BatchOptions {
        let mut options = BatchOptions::new(&self.input)
            .with_scan_config(self.scan_config())
            .with_frames(FrameOptions {
                mode: self.frame_mode(),
                ffmpeg_path: self.ffmpeg.clone(),
                timeout: Duration::from_secs(self.frame_timeout),
            });

        options.output_dir = self.output.clone();
        options.recursive = self.recursive;
        options.overwrite = self.overwrite;
        options.jobs = self.jobs;
        options.report_path = self.report.clone();
        options
    }

    /// Returns the tracing filter directive for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.debug {
            "debug"
        } else if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}
