use crate::models::AnalysisResponse;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Output handler for analysis responses
pub struct OutputHandler {
    format: OutputFormat,
    writer: Box<dyn Write + Send>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Console,
}

impl OutputFormat {
    pub fn from_name(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "jsonl" => OutputFormat::Jsonl,
            "console" => OutputFormat::Console,
            "json" => OutputFormat::Json,
            other => {
                log::warn!("Unknown output format '{}', using json", other);
                OutputFormat::Json
            }
        }
    }
}

impl OutputHandler {
    /// Create a handler writing to `file_path`, or stdout when absent
    ///
    /// JSON lines are appended so repeated runs build a feed; the other
    /// formats replace the file with the latest report.
    pub fn new(format: OutputFormat, file_path: Option<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let writer: Box<dyn Write + Send> = match file_path {
            Some(path) => {
                let mut options = OpenOptions::new();
                options.create(true);
                if format == OutputFormat::Jsonl {
                    options.append(true);
                } else {
                    options.write(true).truncate(true);
                }
                let file = options.open(path)?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(std::io::stdout()),
        };

        Ok(OutputHandler { format, writer })
    }

    /// Create a handler over any writer
    pub fn with_writer(format: OutputFormat, writer: Box<dyn Write + Send>) -> Self {
        OutputHandler { format, writer }
    }

    /// Write an analysis response
    pub fn write_response(&mut self, response: &AnalysisResponse) -> Result<(), Box<dyn std::error::Error>> {
        let output = match self.format {
            OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(response)?),
            OutputFormat::Jsonl => format!("{}\n", serde_json::to_string(response)?),
            OutputFormat::Console => render_console(response),
        };

        self.writer.write_all(output.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }

    /// Flush any buffered output
    pub fn flush(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.writer.flush()?;
        Ok(())
    }
}

fn render_console(response: &AnalysisResponse) -> String {
    let mut out = format!(
        "Analysis at {}\n  Requests: {}, Unique IPs: {}, Attacks: {}\n",
        response.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        response.total_requests,
        response.unique_ips,
        response.total_attacks
    );

    for (ip, count) in &response.brute_force {
        out.push_str(&format!("[Brute Force] IP: {}, Failed auth: {}\n", ip, count));
    }
    for finding in &response.sql_injection {
        out.push_str(&format!(
            "[SQL Injection] IP: {}, Path: {}, Time: {}\n",
            finding.ip, finding.path, finding.timestamp
        ));
    }
    for finding in &response.path_traversal {
        out.push_str(&format!(
            "[Path Traversal] IP: {}, Path: {}, Time: {}\n",
            finding.ip, finding.path, finding.timestamp
        ));
    }
    for (ip, count) in &response.scanning {
        out.push_str(&format!("[Scanning] IP: {}, Not found: {}\n", ip, count));
    }

    out
}
