//! Video container entities
//!
//! A container signature is the fixed byte pattern that identifies an
//! embedded video. For ISO-BMFF files the pattern (`ftyp`) is not the first
//! byte of the container: it is preceded by the 4-byte length of the box it
//! names.

use serde::Serialize;
use std::fmt;

/// Kinds of container the carver can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerKind {
    /// ISO base media file (MP4 / MOV family)
    Mp4,
    /// A signature was seen but the surrounding header is implausible
    Unknown,
}

impl ContainerKind {
    /// Returns a human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            ContainerKind::Mp4 => "MP4 video",
            ContainerKind::Unknown => "Unknown container",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// MP4 `ftyp` box: `[u32 big-endian length]["ftyp"]...`
pub const MP4_FTYP_SIGNATURE: ContainerSignature =
    ContainerSignature::new(ContainerKind::Mp4, b"ftyp", 4);

/// Magic bytes identifying the start of an embedded container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerSignature {
    kind: ContainerKind,
    magic: &'static [u8],
    /// Bytes of the container header that precede `magic`
    header_prefix_len: usize,
}

impl ContainerSignature {
    /// Creates a new container signature
    pub const fn new(kind: ContainerKind, magic: &'static [u8], header_prefix_len: usize) -> Self {
        Self {
            kind,
            magic,
            header_prefix_len,
        }
    }

    /// Returns the container kind this signature identifies
    pub fn kind(&self) -> ContainerKind {
        self.kind
    }

    /// Returns the magic bytes
    pub fn magic(&self) -> &'static [u8] {
        self.magic
    }

    /// Returns the length of the header that precedes the magic bytes
    pub fn header_prefix_len(&self) -> usize {
        self.header_prefix_len
    }
}
