//! SQL injection probe detection
//!
//! Signatures are tried in order against the raw request path, case
//! insensitively. The first hit records the request; later signatures are
//! not consulted, so a request yields at most one finding.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Finding, LogRecord};

const SIGNATURES: &[&str] = &[
    r"(?i)'.*OR.*'",
    r"(?i)'--",
    r"(?i)UNION.*SELECT",
    r"(?i)DROP.*TABLE",
    r"(?i)';--",
    r"(?i)1=1",
];

static PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SIGNATURES
        .iter()
        .map(|sig| Regex::new(sig).expect("sql injection signature is valid"))
        .collect()
});

fn is_injection(path: &str) -> bool {
    PATTERNS.iter().any(|pattern| pattern.is_match(path))
}

/// One finding per record whose path matches any signature, in input order
pub fn detect_sql_injection(records: &[LogRecord]) -> Vec<Finding> {
    records
        .iter()
        .filter(|r| is_injection(&r.path))
        .map(Finding::from)
        .collect()
}
