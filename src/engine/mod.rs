//! Engine module: per-file operations (classify, probe, hash, assemble) and CLI glue.

pub mod arg_parser;
pub mod cli;
pub mod hashing;
pub mod parallel;
pub mod probe;
pub mod progress;
pub mod record;
pub mod sink;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::{build_config, handle_run};
pub use hashing::{digest_bytes, digest_file};
pub use parallel::resolve_worker_count;
pub use probe::{FileProbe, file_extension, file_name};
pub use record::{ZERO_BYTES_MESSAGE, assemble, size_skip_message};
pub use sink::{CsvReportSink, ReportSink, report_header, report_row};
pub use tools::{classify_root, path_to_report_string, relativize, should_include_in_walk};
