use std::path::{Path, PathBuf};
use std::process;

use structopt::StructOpt;

use logward::config::Config;
use logward::input::{self, InputError};
use logward::{AnalysisResponse, Analyzer, OutputFormat, OutputHandler};

/// Web access-log attack analyzer
#[derive(StructOpt, Debug)]
#[structopt(name = "logward", about = "Flag brute force, SQL injection, path traversal and scanning in access logs")]
pub enum Cli {
    /// Analyze a log file and print the report
    Analyze {
        /// Path to access log file (falls back to input.file_path in the config)
        #[structopt(short, long)]
        file: Option<PathBuf>,
        /// Path to configuration file
        #[structopt(short, long)]
        config: Option<PathBuf>,
        /// Output format: json, jsonl or console
        #[structopt(long)]
        format: Option<String>,
        /// Write the report to this file instead of stdout
        #[structopt(short, long)]
        output: Option<PathBuf>,
        /// Minimum 401/403 responses per IP
        #[structopt(long)]
        brute_force_threshold: Option<usize>,
        /// Minimum 404 responses per IP
        #[structopt(long)]
        scanning_threshold: Option<usize>,
    },
    /// Generate a default configuration file
    Config {
        /// Output path for the configuration file
        #[structopt(short, long, default_value = "logward.toml")]
        output: PathBuf,
    },
    /// Parse and display records from a log file
    Parse {
        /// Path to log file
        #[structopt(short, long)]
        file: PathBuf,
        /// Number of records to show
        #[structopt(short, long, default_value = "10")]
        lines: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::from_args() {
        Cli::Analyze {
            file,
            config,
            format,
            output,
            brute_force_threshold,
            scanning_threshold,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(&path)?,
                None => Config::default(),
            };
            if let Some(t) = brute_force_threshold {
                config.detection.brute_force_threshold = t;
            }
            if let Some(t) = scanning_threshold {
                config.detection.scanning_threshold = t;
            }
            if let Some(f) = format {
                config.output.format = f;
            }
            if output.is_some() {
                config.output.file_path = output;
            }

            let Some(path) = file.or_else(|| config.input.file_path.clone()) else {
                eprintln!("No log file given; pass --file or set input.file_path");
                process::exit(1);
            };

            run_analysis(&path, &config)?;
        }
        Cli::Config { output } => {
            let config = Config::default();
            config.to_file(&output)?;
            println!("Default configuration written to: {:?}", output);
        }
        Cli::Parse { file, lines } => {
            let records = input::parse_file(&file);
            let display_count = std::cmp::min(lines, records.len());

            println!("Parsed {} record(s) (showing {}):\n", records.len(), display_count);
            for record in records.iter().take(display_count) {
                println!(
                    "  IP: {}, Time: {}, {} {}, Status: {}, Size: {}",
                    record.ip, record.timestamp, record.method, record.path, record.status, record.size
                );
            }
        }
    }

    Ok(())
}

fn run_analysis(path: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    log::info!("Analyzing log file: {:?}", path);

    let records = match input::load_file(path, config.input.max_input_bytes) {
        Ok(records) => records,
        Err(e) => {
            log::error!("{}", e);
            process::exit(exit_code(&e));
        }
    };

    let report = Analyzer::from_config(&config.detection).analyze(&records);
    let response = AnalysisResponse::new(&records, report);

    let mut handler = OutputHandler::new(
        OutputFormat::from_name(&config.output.format),
        config.output.file_path.clone(),
    )?;
    handler.write_response(&response)?;
    handler.flush()?;

    if response.total_attacks > 0 {
        log::warn!("{} attack indicator(s) detected", response.total_attacks);
    }
    Ok(())
}

fn exit_code(err: &InputError) -> i32 {
    match err {
        InputError::NotFound(_) => 2,
        InputError::Unreadable { .. } | InputError::InvalidUtf8 | InputError::TooLarge { .. } => 3,
        InputError::NoRecords => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_distinguish_input_failures() {
        assert_eq!(exit_code(&InputError::NotFound(PathBuf::from("access.log"))), 2);
        assert_eq!(
            exit_code(&InputError::Unreadable {
                path: PathBuf::from("access.log"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            }),
            3
        );
        assert_eq!(exit_code(&InputError::InvalidUtf8), 3);
        assert_eq!(exit_code(&InputError::TooLarge { size: 20, limit: 10 }), 3);
        assert_eq!(exit_code(&InputError::NoRecords), 4);
    }

    #[test]
    fn test_missing_file_maps_to_not_found_code() {
        let dir = tempfile::tempdir().unwrap();
        let err = input::load_file(&dir.path().join("absent.log"), 1024).unwrap_err();
        assert_eq!(exit_code(&err), 2);
    }
}
