pub mod brute_force;
pub mod engine;
pub mod path_traversal;
pub mod scanning;
pub mod sql_injection;

pub use brute_force::detect_brute_force;
pub use engine::{analyze, Analyzer};
pub use path_traversal::detect_path_traversal;
pub use scanning::detect_scanning;
pub use sql_injection::detect_sql_injection;

use crate::models::{CounterMap, LogRecord};

/// Default minimum count for the threshold detectors
pub const DEFAULT_THRESHOLD: usize = 5;

/// Count records per IP whose status satisfies `matches`, keeping IPs at or over `threshold`
fn count_status_by_ip<F>(records: &[LogRecord], threshold: usize, matches: F) -> CounterMap
where
    F: Fn(u16) -> bool,
{
    let mut counts = CounterMap::new();
    for record in records.iter().filter(|r| matches(r.status)) {
        *counts.entry(record.ip.clone()).or_insert(0) += 1;
    }

    counts.retain(|_, count| *count >= threshold);
    counts
}
