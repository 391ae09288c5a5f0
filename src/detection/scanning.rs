//! Reconnaissance scanning detection
//!
//! A source that keeps hitting paths that do not exist (404) is probing.

use super::count_status_by_ip;
use crate::models::{CounterMap, LogRecord};

/// IPs with at least `threshold` 404 responses, with their counts
pub fn detect_scanning(records: &[LogRecord], threshold: usize) -> CounterMap {
    count_status_by_ip(records, threshold, |status| status == 404)
}
