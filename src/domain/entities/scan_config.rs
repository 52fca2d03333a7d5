//! Scan configuration
//!
//! Plain values handed to every scan. Nothing here is read from the
//! environment or from disk.

use serde::Serialize;
use thiserror::Error;

/// Default size of the tail window searched for a container signature
pub const DEFAULT_MAX_TAIL_SEARCH: usize = 512_000;

/// Errors raised by [`ScanConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max tail search window must be greater than zero")]
    EmptyTailWindow,
}

/// Which end-of-image marker ends the primary image stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EoiSearch {
    /// First `FF D9` in the file
    First,
    /// Last `FF D9` in the file
    #[default]
    Last,
}

/// Options consumed by a single scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanConfig {
    /// Skip files that carry no motion-photo tag before the image end
    pub require_motion_tag: bool,
    /// Upper bound on the bytes searched after the image end
    pub max_tail_search_bytes: usize,
    /// End-of-image marker selection
    pub eoi_search: EoiSearch,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            require_motion_tag: false,
            max_tail_search_bytes: DEFAULT_MAX_TAIL_SEARCH,
            eoi_search: EoiSearch::Last,
        }
    }
}

impl ScanConfig {
    /// Creates the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether a motion tag is required
    pub fn with_required_motion_tag(mut self, required: bool) -> Self {
        self.require_motion_tag = required;
        self
    }

    /// Sets the tail window size
    pub fn with_max_tail_search(mut self, bytes: usize) -> Self {
        self.max_tail_search_bytes = bytes;
        self
    }

    /// Sets the end-of-image marker selection
    pub fn with_eoi_search(mut self, search: EoiSearch) -> Self {
        self.eoi_search = search;
        self
    }

    /// Checks that the configuration can drive a scan
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_tail_search_bytes == 0 {
            return Err(ConfigError::EmptyTailWindow);
        }
        Ok(())
    }
}
