use serde::{Deserialize, Serialize};

/// One parsed access-log request line
///
/// Only built when every field was extracted; see [`crate::input::parse_line`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Dotted-quad client address, lexically matched only
    pub ip: String,
    /// Bracketed timestamp text, kept as-is
    pub timestamp: String,
    pub method: String,
    /// Request target including any query string
    pub path: String,
    pub status: u16,
    pub size: u64,
}
