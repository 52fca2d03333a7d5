//! Application layer
//!
//! Use cases that drive the scanner over a batch of files and hand the
//! results to the writers and the frame extractor.

pub mod dto;
mod extract_frames;
mod extract_videos;

pub use extract_frames::ExtractFramesUseCase;
pub use extract_videos::{ExtractVideosUseCase, ProgressCallback};
