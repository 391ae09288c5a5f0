use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::LogRecord;

/// Per-IP occurrence tally produced by the threshold detectors
pub type CounterMap = BTreeMap<String, usize>;

/// One offending request flagged by a content-based detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub ip: String,
    pub path: String,
    pub timestamp: String,
}

impl From<&LogRecord> for Finding {
    fn from(record: &LogRecord) -> Self {
        Finding {
            ip: record.ip.clone(),
            path: record.path.clone(),
            timestamp: record.timestamp.clone(),
        }
    }
}

/// Aggregate result of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_requests: usize,
    pub total_attacks: usize,
    pub brute_force: CounterMap,
    pub sql_injection: Vec<Finding>,
    pub path_traversal: Vec<Finding>,
    pub scanning: CounterMap,
}

impl AnalysisReport {
    /// True when no detector reported anything
    pub fn is_clean(&self) -> bool {
        self.total_attacks == 0
    }
}

/// Response envelope handed to callers (CLI, HTTP layer)
///
/// Adds the caller-side `unique_ips` figure on top of the engine's report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub total_requests: usize,
    pub total_attacks: usize,
    pub unique_ips: usize,
    pub brute_force: CounterMap,
    pub sql_injection: Vec<Finding>,
    pub path_traversal: Vec<Finding>,
    pub scanning: CounterMap,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisResponse {
    /// Shape a report for output, counting distinct client IPs in `records`
    pub fn new(records: &[LogRecord], report: AnalysisReport) -> Self {
        let unique_ips = records
            .iter()
            .map(|r| r.ip.as_str())
            .collect::<HashSet<_>>()
            .len();

        AnalysisResponse {
            total_requests: report.total_requests,
            total_attacks: report.total_attacks,
            unique_ips,
            brute_force: report.brute_force,
            sql_injection: report.sql_injection,
            path_traversal: report.path_traversal,
            scanning: report.scanning,
            generated_at: Utc::now(),
        }
    }
}
