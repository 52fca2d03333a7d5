//! JPEG discovery
//!
//! Lists candidate files under an input directory.

use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Extensions treated as JPEG, compared case-insensitively
pub const JPEG_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Returns whether `path` has a JPEG extension
pub fn is_jpeg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            JPEG_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Lists `*.jpg` / `*.jpeg` files in a directory
#[derive(Debug, Clone, Default)]
pub struct JpegDirectoryLister {
    recursive: bool,
    exclude: Option<PathBuf>,
}

impl JpegDirectoryLister {
    /// Creates a non-recursive lister
    pub fn new() -> Self {
        Self::default()
    }

    /// Descends into subdirectories
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Never descends into `dir` (the output directory)
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.exclude = Some(dir.into());
        self
    }

    /// Returns the candidate files, sorted by path
    ///
    /// A file given as `input` is returned as-is, whatever its extension.
    pub fn list(&self, input: &Path) -> io::Result<Vec<PathBuf>> {
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let walker = WalkDir::new(input)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !(e.file_type().is_dir() && self.is_excluded(e.path())));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() && is_jpeg_path(entry.path()) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }

    fn is_excluded(&self, dir: &Path) -> bool {
        self.exclude.as_deref().is_some_and(|excluded| {
            dir == excluded
                || matches!(
                    (dir.canonicalize(), excluded.canonicalize()),
                    (Ok(a), Ok(b)) if a == b
                )
        })
    }
}
