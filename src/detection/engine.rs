//! Runs every detector over one parsed log and aggregates the results

use crate::config::DetectionConfig;
use crate::models::{AnalysisReport, LogRecord};

use super::{
    detect_brute_force, detect_path_traversal, detect_scanning, detect_sql_injection,
    DEFAULT_THRESHOLD,
};

/// Detection engine carrying the thresholds for the counting detectors
///
/// Holds no state between runs; one value can analyse any number of logs,
/// from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analyzer {
    brute_force_threshold: usize,
    scanning_threshold: usize,
}

impl Analyzer {
    /// Create an analyzer with default thresholds
    pub fn new() -> Self {
        Analyzer {
            brute_force_threshold: DEFAULT_THRESHOLD,
            scanning_threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Create with custom thresholds
    pub fn with_thresholds(brute_force_threshold: usize, scanning_threshold: usize) -> Self {
        Analyzer {
            brute_force_threshold,
            scanning_threshold,
        }
    }

    pub fn from_config(config: &DetectionConfig) -> Self {
        Self::with_thresholds(config.brute_force_threshold, config.scanning_threshold)
    }

    /// Run all four detectors and build the report
    ///
    /// `total_attacks` is the plain sum of the detector output sizes; a
    /// request caught by several detectors counts once for each.
    pub fn analyze(&self, records: &[LogRecord]) -> AnalysisReport {
        let brute_force = detect_brute_force(records, self.brute_force_threshold);
        let sql_injection = detect_sql_injection(records);
        let path_traversal = detect_path_traversal(records);
        let scanning = detect_scanning(records, self.scanning_threshold);

        log::debug!(
            "Detector results: brute_force={} sql_injection={} path_traversal={} scanning={}",
            brute_force.len(),
            sql_injection.len(),
            path_traversal.len(),
            scanning.len()
        );

        let total_attacks =
            brute_force.len() + sql_injection.len() + path_traversal.len() + scanning.len();

        log::info!(
            "Analyzed {} request(s), {} attack indicator(s) found",
            records.len(),
            total_attacks
        );

        AnalysisReport {
            total_requests: records.len(),
            total_attacks,
            brute_force,
            sql_injection,
            path_traversal,
            scanning,
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyse `records` with the default thresholds
pub fn analyze(records: &[LogRecord]) -> AnalysisReport {
    Analyzer::new().analyze(records)
}
