//! CSV-backed feedback log.
//!
//! Rows are appended to the end of the file with the columns
//! `Name,Email,Comments`. The header is written once, when the file is new
//! or empty. Existing rows are never rewritten.

use csv::{ReaderBuilder, WriterBuilder};
use footflow_core::error::{FootflowError, Result};
use footflow_core::models::FeedbackEntry;
use footflow_core::ports::FeedbackLog;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Append-only feedback log stored as a CSV file
#[derive(Debug)]
pub struct CsvFeedbackLog {
    path: PathBuf,
    // Serialises appends from this process.
    write_lock: Mutex<()>,
}

impl CsvFeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedbackLog for CsvFeedbackLog {
    fn append(&self, entry: &FeedbackEntry) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| FootflowError::FeedbackLog("feedback log lock poisoned".to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        // The whole record is buffered and appended with one write.
        let mut writer = WriterBuilder::new().has_headers(needs_header).from_writer(Vec::new());
        writer.serialize(entry).map_err(csv_error)?;
        let bytes = writer.into_inner().map_err(|e| FootflowError::FeedbackLog(e.to_string()))?;

        file.write_all(&bytes)?;
        file.sync_data()?;

        tracing::debug!(
            path = %self.path.display(),
            header = needs_header,
            "Appended feedback row"
        );
        Ok(())
    }

    fn entries(&self) -> Result<Vec<FeedbackEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new().from_path(&self.path).map_err(csv_error)?;
        reader
            .deserialize()
            .map(|row| row.map_err(csv_error))
            .collect()
    }
}

fn csv_error(err: csv::Error) -> FootflowError {
    FootflowError::FeedbackLog(err.to_string())
}
