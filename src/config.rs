use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::detection::DEFAULT_THRESHOLD;
use crate::input::DEFAULT_MAX_INPUT_BYTES;

/// Configuration for the log analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input source configuration
    pub input: InputConfig,
    /// Detection thresholds
    pub detection: DetectionConfig,
    /// Output configuration
    pub output: OutputConfig,
}

/// Input source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Log file analysed when none is given on the command line
    pub file_path: Option<PathBuf>,
    /// Largest file or upload accepted, in bytes
    pub max_input_bytes: u64,
}

/// Detection thresholds configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Minimum 401/403 responses per IP to report brute forcing
    pub brute_force_threshold: usize,
    /// Minimum 404 responses per IP to report scanning
    pub scanning_threshold: usize,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json", "jsonl", or "console"
    pub format: String,
    /// Output file path (stdout if absent)
    pub file_path: Option<PathBuf>,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            file_path: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        DetectionConfig {
            brute_force_threshold: DEFAULT_THRESHOLD,
            scanning_threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: "json".to_string(),
            file_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}
