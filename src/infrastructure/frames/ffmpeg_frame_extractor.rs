//! ffmpeg frame extractor
//!
//! Runs `ffmpeg` as a subprocess to write one JPEG per second of video.
//! Each run gets its own single-threaded tokio runtime so the child can be
//! raced against a timeout and killed when the timeout wins.

use crate::domain::repositories::{FrameCount, FrameExtractor, ToolError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Frame extractor backed by the ffmpeg command-line tool
#[derive(Debug, Clone)]
pub struct FfmpegFrameExtractor {
    program: PathBuf,
    timeout: Duration,
}

impl FfmpegFrameExtractor {
    /// Creates an extractor running `program` with a per-video timeout
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Returns the frame file prefix used for `video`
    fn frame_prefix(video_path: &Path) -> String {
        video_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("frame")
            .to_string()
    }

    async fn run(&self, video_path: &Path, out_dir: &Path) -> Result<(), ToolError> {
        let pattern = out_dir.join(format!("{}_%04d.jpg", Self::frame_prefix(video_path)));

        let mut command = Command::new(&self.program);
        command
            .args(["-hide_banner", "-loglevel", "error", "-y", "-i"])
            .arg(video_path)
            .args(["-vf", "fps=1"])
            .arg(&pattern)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(program = %self.program.display(), video = %video_path.display(), "spawning frame extractor");

        let child = command.spawn().map_err(|e| match e.kind() {
            io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                ToolError::Unavailable(format!("{}: {}", self.program.display(), e))
            }
            _ => ToolError::Io(e),
        })?;

        // Dropping the pending future on timeout drops the child, which
        // kills it.
        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ToolError::TimedOut(self.timeout))??;

        if !output.status.success() {
            return Err(ToolError::Failed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}

impl Default for FfmpegFrameExtractor {
    fn default() -> Self {
        Self::new("ffmpeg", Duration::from_secs(120))
    }
}

impl FrameExtractor for FfmpegFrameExtractor {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn extract_frames(&self, video_path: &Path, out_dir: &Path) -> Result<FrameCount, ToolError> {
        fs::create_dir_all(out_dir)?;

        let prefix = Self::frame_prefix(video_path);
        let stale = clear_frames(out_dir, &prefix)?;
        if stale > 0 {
            debug!(dir = %out_dir.display(), stale, "removed frames from an earlier run");
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(self.run(video_path, out_dir))?;

        count_frames(out_dir, &prefix).map_err(ToolError::Io)
    }
}

/// Lists `<prefix>_*.jpg` files in `dir`
fn frame_files(dir: &Path, prefix: &str) -> io::Result<Vec<PathBuf>> {
    let prefix = format!("{}_", prefix);
    let files = fs::read_dir(dir)?
        .flatten()
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&prefix) && name.ends_with(".jpg"))
        })
        .map(|entry| entry.path())
        .collect();
    Ok(files)
}

fn count_frames(dir: &Path, prefix: &str) -> io::Result<FrameCount> {
    Ok(frame_files(dir, prefix)?.len())
}

/// Removes frames a previous run left for the same video
fn clear_frames(dir: &Path, prefix: &str) -> io::Result<usize> {
    let stale = frame_files(dir, prefix)?;
    for path in &stale {
        fs::remove_file(path)?;
    }
    Ok(stale.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_program_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let extractor = FfmpegFrameExtractor::new(
            "/nonexistent/bin/ffmpeg-motioncarve",
            Duration::from_secs(5),
        );

        let result = extractor.extract_frames(&dir.path().join("clip.mp4"), &dir.path().join("frames"));
        assert!(matches!(result, Err(ToolError::Unavailable(_))));
    }

    #[test]
    fn test_count_frames_matches_prefix() {
        let dir = TempDir::new().unwrap();
        for name in ["clip_0001.jpg", "clip_0002.jpg", "other_0001.jpg", "clip_0003.png"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        assert_eq!(count_frames(dir.path(), "clip").unwrap(), 2);
    }

    #[test]
    fn test_clear_frames_keeps_other_videos() {
        let dir = TempDir::new().unwrap();
        for name in ["clip_0001.jpg", "clip_0002.jpg", "other_0001.jpg"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }

        assert_eq!(clear_frames(dir.path(), "clip").unwrap(), 2);
        assert_eq!(count_frames(dir.path(), "clip").unwrap(), 0);
        assert_eq!(count_frames(dir.path(), "other").unwrap(), 1);
    }

    #[cfg(unix)]
    fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_slow_program_times_out() {
        let dir = TempDir::new().unwrap();
        let script = write_script(dir.path(), "slow.sh", "sleep 30");
        let extractor = FfmpegFrameExtractor::new(script, Duration::from_millis(500));

        let started = std::time::Instant::now();
        let result = extractor.extract_frames(&dir.path().join("clip.mp4"), &dir.path().join("frames"));

        assert!(matches!(result, Err(ToolError::TimedOut(t)) if t == Duration::from_millis(500)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_stale_frames_are_not_counted() {
        let dir = TempDir::new().unwrap();
        let frames = dir.path().join("frames");
        fs::create_dir_all(&frames).unwrap();
        for n in 1..=5 {
            fs::write(frames.join(format!("clip_{:04}.jpg", n)), b"old").unwrap();
        }

        // Writes a single frame next to the output pattern (last argument)
        let script = write_script(
            dir.path(),
            "one_frame.sh",
            r#"for arg; do last="$arg"; done; touch "$(dirname "$last")/clip_0001.jpg""#,
        );
        let extractor = FfmpegFrameExtractor::new(script, Duration::from_secs(5));

        let count = extractor.extract_frames(&dir.path().join("clip.mp4"), &frames).unwrap();
        assert_eq!(count, 1);
        assert!(!frames.join("clip_0005.jpg").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_failure() {
        let dir = TempDir::new().unwrap();
        let extractor = FfmpegFrameExtractor::new("false", Duration::from_secs(5));

        let result = extractor.extract_frames(&dir.path().join("clip.mp4"), &dir.path().join("frames"));
        assert!(matches!(result, Err(ToolError::Failed { .. })));
    }
}
