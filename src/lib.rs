//! buildtidy - build log cleanup and source line counting
//!
//! Two independent operations:
//! - [`clear_logs`] deletes timestamped build logs (`log-YYYY-MM-DD HH:MM:SS.N.txt`)
//!   found directly inside one directory.
//! - [`count_lines`] walks a source tree, skipping hidden and well-known build
//!   directories, and counts lines per file and in total.
//!
//! Defaults for both live in the embedded `defaults.toml` (see [`Settings`]).

pub mod cleaner;
pub mod counter;
pub mod error;
pub mod patterns;
pub mod report;
pub mod settings;
pub mod time;

// Re-export commonly used items
pub use cleaner::{clear_logs, ClearOptions, ClearReport, LogEntry, RemovalOutcome};
pub use counter::{
    count_line_segments, count_lines, CountOptions, FileLineCount, KeyMode, LineTally,
    ReadErrorPolicy, SkippedFile,
};
pub use error::ToolError;
pub use patterns::{is_excluded_dir, is_log_file, parse_log_timestamp, LOG_FILE_PATTERN};
pub use settings::Settings;
pub use time::{TimeFilter, TimeFilterStats};
