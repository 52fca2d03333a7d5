//! Local payload writer implementation
//!
//! Writes carved videos to the local filesystem as `<stem>.mp4`.

use crate::domain::entities::ExtractionOutcome;
use crate::domain::repositories::{PayloadWriteError, PayloadWriter};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

/// Every payload is written as MP4; the detected kind only goes to the report
const PAYLOAD_EXTENSION: &str = "mp4";

/// Local file system writer
///
/// Output names are derived from the source stem. Names handed out during
/// this run are reserved, so `a.jpg` and `a.JPEG` in the same batch end up
/// as `a.mp4` and `a_1.mp4` instead of overwriting each other.
pub struct LocalPayloadWriter {
    output_dir: PathBuf,
    overwrite: bool,
    reserved: Mutex<HashSet<PathBuf>>,
    files_written: AtomicUsize,
    bytes_written: AtomicU64,
}

impl LocalPayloadWriter {
    /// Creates a writer, creating `output_dir` if needed
    pub fn new(output_dir: &Path, overwrite: bool) -> Result<Self, PayloadWriteError> {
        if !output_dir.exists() {
            fs::create_dir_all(output_dir).map_err(|e| {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    PayloadWriteError::PermissionDenied(output_dir.display().to_string())
                } else {
                    PayloadWriteError::IoError(e)
                }
            })?;
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            overwrite,
            reserved: Mutex::new(HashSet::new()),
            files_written: AtomicUsize::new(0),
            bytes_written: AtomicU64::new(0),
        })
    }

    /// Picks and reserves the output path for a payload
    fn reserve_output_path(&self, outcome: &ExtractionOutcome) -> Result<PathBuf, PayloadWriteError> {
        let source = outcome.source_path();
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| PayloadWriteError::InvalidSourceName(source.display().to_string()))?;

        let mut reserved = self.reserved.lock();
        let mut suffix = 0usize;
        loop {
            let filename = if suffix == 0 {
                format!("{}.{}", stem, PAYLOAD_EXTENSION)
            } else {
                format!("{}_{}.{}", stem, suffix, PAYLOAD_EXTENSION)
            };
            let candidate = self.output_dir.join(filename);
            suffix += 1;

            let taken = reserved.contains(&candidate) || (candidate.exists() && !self.overwrite);
            if !taken {
                reserved.insert(candidate.clone());
                return Ok(candidate);
            }
        }
    }
}

impl PayloadWriter for LocalPayloadWriter {
    fn write(&self, outcome: &ExtractionOutcome) -> Result<PathBuf, PayloadWriteError> {
        let output_path = self.reserve_output_path(outcome)?;
        let partial_path = partial_path_for(&output_path);

        if let Err(e) = write_synced(&partial_path, outcome.payload())
            .and_then(|()| fs::rename(&partial_path, &output_path))
        {
            let _ = fs::remove_file(&partial_path);
            return Err(e.into());
        }

        self.files_written.fetch_add(1, Ordering::Relaxed);
        self.bytes_written
            .fetch_add(outcome.len() as u64, Ordering::Relaxed);

        Ok(output_path)
    }

    fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn files_written(&self) -> usize {
        self.files_written.load(Ordering::Relaxed)
    }

    fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }
}

/// Hidden sibling the payload is written to before the final rename
fn partial_path_for(output_path: &Path) -> PathBuf {
    let name = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_path.with_file_name(format!(".{}.part", name))
}

fn write_synced(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}
