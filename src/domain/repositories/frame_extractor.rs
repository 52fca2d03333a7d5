//! Frame extractor trait
//!
//! Narrow contract for the external tool that splits a recovered video
//! into still images: one JPEG per second of video, written into a target
//! directory.

use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Number of frames produced for one video
pub type FrameCount = usize;

/// Errors reported by a frame extractor
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Frame extraction tool unavailable: {0}")]
    Unavailable(String),

    #[error("Frame extraction failed (exit status {status:?}): {stderr}")]
    Failed { status: Option<i32>, stderr: String },

    #[error("Frame extraction timed out after {0:?}")]
    TimedOut(Duration),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Trait for turning a video file into per-second frames
pub trait FrameExtractor: Send + Sync {
    /// Returns a short name for log messages
    fn name(&self) -> &str;

    /// Extracts frames of `video_path` into `out_dir`
    fn extract_frames(&self, video_path: &Path, out_dir: &Path) -> Result<FrameCount, ToolError>;
}
