//! motioncarve - Motion Photo Video Extractor
//!
//! Finds the end of the JPEG image in a motion photo, optionally checks
//! its XMP for motion-photo tags, and carves out the MP4 appended after
//! the image.
//!
//! The crate is layered the same way from the inside out:
//! [`domain`] holds the byte-level scanning, [`application`] runs it over
//! batches, [`infrastructure`] talks to the filesystem and to ffmpeg, and
//! [`presentation`] is the command line.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod utils;

pub use domain::entities::{
    ContainerKind, EoiSearch, ExtractionOutcome, PayloadSpan, ScanConfig, ScanResult, ScanStatus,
    SourceFile,
};
pub use domain::services::{MotionPhotoScanner, ScanError};
