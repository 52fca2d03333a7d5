//! Data Transfer Objects

mod batch_options;
mod batch_report;

pub use batch_options::{
    BatchOptions, DEFAULT_FRAME_TIMEOUT, DEFAULT_OUTPUT_DIR_NAME, FrameMode, FrameOptions,
};
pub use batch_report::{BatchReport, BatchSummary, FileReport, FileStatus, FrameSummary};
