//! JSON report writer

use crate::application::dto::BatchReport;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when writing a report
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Writes a [`BatchReport`] as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReportWriter;

impl JsonReportWriter {
    /// Writes `report` to `path`, replacing any existing file
    pub fn write(&self, path: &Path, report: &BatchReport) -> Result<(), ReportError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Renders `report` as a JSON string
    pub fn render(&self, report: &BatchReport) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
