//! CSV result sink
//!
//! Writes all records of a run at once. Columns are fixed:
//! `provider, prompt, marker_mentioned, response, run_number, timestamp,
//! status, error`. Fields a record does not have are left empty.

use crate::error::{ProbeError, ProbeResult};
use crate::logging::log_info;
use crate::record::{ResultRecord, Status};
use chrono::SecondsFormat;
use serde::Serialize;
use std::path::Path;

/// Column order of the output file
pub const COLUMNS: [&str; 8] = [
    "provider",
    "prompt",
    "marker_mentioned",
    "response",
    "run_number",
    "timestamp",
    "status",
    "error",
];

/// Flat view of a record, one field per column
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    provider: &'a str,
    prompt: &'a str,
    marker_mentioned: Option<bool>,
    response: Option<&'a str>,
    run_number: u32,
    timestamp: String,
    status: Status,
    error: Option<&'a str>,
}

impl<'a> From<&'a ResultRecord> for CsvRow<'a> {
    fn from(record: &'a ResultRecord) -> Self {
        Self {
            provider: &record.provider,
            prompt: &record.prompt,
            marker_mentioned: record.marker_mentioned(),
            response: record.answer(),
            run_number: record.run_number,
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Micros, true),
            status: record.status(),
            error: record.error_message(),
        }
    }
}

/// Writes result records to a CSV file
pub struct CsvSink;

impl CsvSink {
    /// Write a header plus one row per record to `path`
    ///
    /// Does nothing when `records` is empty. Missing parent directories are
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::OutputFailed`] if the directory or file cannot be
    /// created or written.
    pub fn write(records: &[ResultRecord], path: &Path) -> ProbeResult<()> {
        if records.is_empty() {
            return Ok(());
        }

        let path_label = path.display().to_string();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProbeError::output_failed(
                    &path_label,
                    format!("cannot create directory: {e}"),
                    Some(Box::new(e)),
                )
            })?;
        }

        let mut writer = csv::Writer::from_path(path).map_err(|e| {
            ProbeError::output_failed(&path_label, e.to_string(), Some(Box::new(e)))
        })?;

        for record in records {
            writer.serialize(CsvRow::from(record)).map_err(|e| {
                ProbeError::output_failed(&path_label, e.to_string(), Some(Box::new(e)))
            })?;
        }

        writer.flush().map_err(|e| {
            ProbeError::output_failed(&path_label, e.to_string(), Some(Box::new(e)))
        })?;

        log_info!(
            path = %path_label,
            row_count = records.len(),
            "Results written"
        );

        Ok(())
    }
}
