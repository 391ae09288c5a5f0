//! Loading access logs from files and uploaded payloads
//!
//! Two flavours: [`parse_file`] never fails and returns an empty sequence
//! on any problem, while [`load_file`] and [`load_bytes`] report each
//! failure as a distinct [`InputError`] so the transport layer can answer
//! with the right message.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::access_log::{parse_source, split_lines};
use crate::models::LogRecord;

/// Default upload and file size limit (16 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

/// Errors that can occur while loading a log for analysis
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Log file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read log file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log content is not valid UTF-8")]
    InvalidUtf8,

    #[error("Log content is {size} bytes, limit is {limit}")]
    TooLarge { size: u64, limit: u64 },

    #[error("No valid log entries found")]
    NoRecords,
}

/// Parse a log file, returning an empty sequence if it is missing or unreadable
pub fn parse_file(path: &Path) -> Vec<LogRecord> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_source(split_lines(&contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("Log file {:?} not found", path);
            Vec::new()
        }
        Err(e) => {
            log::warn!("Error reading log file {:?}: {}", path, e);
            Vec::new()
        }
    }
}

/// Parse an uploaded payload
///
/// Rejects oversized and non-UTF-8 content before parsing, and reports
/// [`InputError::NoRecords`] when no line matched the access-log layout.
pub fn load_bytes(bytes: &[u8], max_bytes: u64) -> Result<Vec<LogRecord>, InputError> {
    let size = bytes.len() as u64;
    if size > max_bytes {
        return Err(InputError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    let text = std::str::from_utf8(bytes).map_err(|_| InputError::InvalidUtf8)?;
    let records = parse_source(split_lines(text));

    if records.is_empty() {
        return Err(InputError::NoRecords);
    }
    Ok(records)
}

/// Load and parse a log file, distinguishing every failure state
pub fn load_file(path: &Path, max_bytes: u64) -> Result<Vec<LogRecord>, InputError> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(path, e))?;
    check_size(metadata.len(), max_bytes)?;

    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;
    load_bytes(&bytes, max_bytes)
}

fn io_error(path: &Path, source: std::io::Error) -> InputError {
    if source.kind() == ErrorKind::NotFound {
        InputError::NotFound(path.to_path_buf())
    } else {
        InputError::Unreadable {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn check_size(size: u64, limit: u64) -> Result<(), InputError> {
    if size > limit {
        Err(InputError::TooLarge { size, limit })
    } else {
        Ok(())
    }
}

// ============================================
// Async loader
// ============================================

/// Async version of [`load_file`] for use inside tokio services
pub async fn load_file_async(path: &Path, max_bytes: u64) -> Result<Vec<LogRecord>, InputError> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| io_error(path, e))?;
    check_size(metadata.len(), max_bytes)?;

    let bytes = tokio::fs::read(path).await.map_err(|e| io_error(path, e))?;
    load_bytes(&bytes, max_bytes)
}
