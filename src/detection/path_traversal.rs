//! Path traversal detection
//!
//! Literal matching only: percent-encoded variants such as `%2e%2e%2f`
//! are not decoded and therefore not flagged.

use crate::models::{Finding, LogRecord};

const TRAVERSAL_MARKERS: &[&str] = &["../", "..\\"];

/// One finding per record whose path contains `../` or `..\`
pub fn detect_path_traversal(records: &[LogRecord]) -> Vec<Finding> {
    records
        .iter()
        .filter(|r| TRAVERSAL_MARKERS.iter().any(|m| r.path.contains(m)))
        .map(Finding::from)
        .collect()
}
