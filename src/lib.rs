pub mod config;
pub mod detection;
pub mod input;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use models::{AnalysisReport, AnalysisResponse, CounterMap, Finding, LogRecord};
pub use detection::{analyze, Analyzer};
pub use input::{parse_line, parse_source, InputError};
pub use output::{OutputFormat, OutputHandler};
