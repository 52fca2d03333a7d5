//! Extract frames use case
//!
//! Feeds recovered videos to a [`FrameExtractor`], one directory of
//! frames per video.

use crate::application::dto::FrameSummary;
use crate::domain::repositories::{FrameExtractor, ToolError};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Extract frames use case
pub struct ExtractFramesUseCase<F: FrameExtractor> {
    extractor: F,
}

impl<F: FrameExtractor> ExtractFramesUseCase<F> {
    /// Creates a new extract frames use case
    pub fn new(extractor: F) -> Self {
        Self { extractor }
    }

    /// Returns the directory frames of `video` are written to
    pub fn frames_dir_for(video: &Path, frames_root: &Path) -> PathBuf {
        let stem = video
            .file_stem()
            .map(|s| s.to_os_string())
            .unwrap_or_else(|| "video".into());
        frames_root.join(stem)
    }

    /// Extracts frames for each video in turn
    ///
    /// Runs are sequential since each one is already a heavy subprocess.
    /// Once the tool reports itself unavailable the remaining videos are
    /// not attempted.
    pub fn execute(&self, videos: &[PathBuf], frames_root: &Path) -> FrameSummary {
        let mut summary = FrameSummary::default();

        for video in videos {
            let out_dir = Self::frames_dir_for(video, frames_root);

            match self.extractor.extract_frames(video, &out_dir) {
                Ok(count) => {
                    info!(
                        video = %video.display(),
                        "{} extracted {} frames into {}",
                        self.extractor.name(),
                        count,
                        out_dir.display()
                    );
                    summary.record_success(count);
                }
                Err(ToolError::Unavailable(reason)) => {
                    warn!("{} unavailable, skipping frame extraction: {}", self.extractor.name(), reason);
                    summary.unavailable = true;
                    break;
                }
                Err(e) => {
                    warn!(video = %video.display(), "Frame extraction failed: {}", e);
                    summary.record_failure();
                }
            }
        }

        summary
    }
}
