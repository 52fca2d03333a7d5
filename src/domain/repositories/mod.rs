//! Repository traits (interfaces)
//!
//! Contracts for the collaborators around the scanner: reading source
//! files, writing carved payloads and turning videos into frames.

mod frame_extractor;
mod payload_writer;
mod source_reader;

pub use frame_extractor::{FrameCount, FrameExtractor, ToolError};
pub use payload_writer::{PayloadWriteError, PayloadWriter};
pub use source_reader::{SourceReadError, SourceReader};
