//! Brute force detection
//!
//! Access logs carry no login semantics, so authentication failures
//! (401 Unauthorized, 403 Forbidden) stand in for failed attempts.

use super::count_status_by_ip;
use crate::models::{CounterMap, LogRecord};

/// IPs with at least `threshold` 401/403 responses, with their counts
pub fn detect_brute_force(records: &[LogRecord], threshold: usize) -> CounterMap {
    count_status_by_ip(records, threshold, |status| status == 401 || status == 403)
}
