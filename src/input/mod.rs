pub mod access_log;
pub mod file_loader;

pub use access_log::{parse_line, parse_source, split_lines};
pub use file_loader::{load_bytes, load_file, parse_file, InputError, DEFAULT_MAX_INPUT_BYTES};

// Async version
pub use file_loader::load_file_async;
