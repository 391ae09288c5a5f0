pub mod record;
pub mod report;

pub use record::LogRecord;
pub use report::{AnalysisReport, AnalysisResponse, CounterMap, Finding};
