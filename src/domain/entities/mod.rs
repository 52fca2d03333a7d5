//! Domain entities
//!
//! Core objects of the motion-photo domain: the source bytes, the scan
//! configuration, and the spans and outcomes produced by a scan.

mod container;
mod extraction_outcome;
mod payload_span;
mod scan_config;
mod scan_result;
mod source_file;

pub use container::{ContainerKind, ContainerSignature, MP4_FTYP_SIGNATURE};
pub use extraction_outcome::ExtractionOutcome;
pub use payload_span::PayloadSpan;
pub use scan_config::{ConfigError, DEFAULT_MAX_TAIL_SEARCH, EoiSearch, ScanConfig};
pub use scan_result::{ScanResult, ScanStatus};
pub use source_file::SourceFile;
