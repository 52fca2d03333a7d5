//! Persistence adapters

mod json_report_writer;
mod local_payload_writer;

pub use json_report_writer::{JsonReportWriter, ReportError};
pub use local_payload_writer::LocalPayloadWriter;
