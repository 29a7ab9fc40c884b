//! Name matching: the build log grammar and the counting allow/deny rules.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// Grammar for timestamped build logs, e.g. `log-2024-01-01 10:00:00.123.txt`.
///
/// Other tooling emits logs under this exact name, so changing it breaks
/// cleanup of every log already on disk.
pub const LOG_FILE_PATTERN: &str =
    r"^log-[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]+\.txt$";

static LOG_FILE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(LOG_FILE_PATTERN).expect("log file pattern is valid"));

// Timestamp part of a log name, between "log-" and ".txt"
const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Check whether a bare filename is a build log
pub fn is_log_file(name: &str) -> bool {
    LOG_FILE_RE.is_match(name)
}

/// Parse the timestamp embedded in a log filename.
///
/// Returns `None` for names that are not logs, and for logs whose digits do
/// not form a real date and time (e.g. month 13). Such logs still match the
/// grammar.
pub fn parse_log_timestamp(name: &str) -> Option<NaiveDateTime> {
    if !is_log_file(name) {
        return None;
    }
    let stamp = name.strip_prefix("log-")?.strip_suffix(".txt")?;
    NaiveDateTime::parse_from_str(stamp, LOG_TIMESTAMP_FORMAT).ok()
}

/// Hidden entries start with a dot
pub fn is_hidden_name(name: &str) -> bool {
    name.starts_with('.')
}

/// Check whether a directory must be skipped during line counting.
///
/// Hidden directories are always skipped; otherwise the name has to match one
/// of `excludes` exactly.
pub fn is_excluded_dir(name: &str, excludes: &[String]) -> bool {
    is_hidden_name(name) || excludes.iter().any(|exclude| exclude == name)
}

/// Check whether a file's extension is one of `extensions` (given without dot).
///
/// Uses `Path::extension`, so `.txt` on its own has no extension and
/// `archive.tar.txt` has `txt`. Comparison is case-sensitive.
pub fn has_counted_extension(path: &Path, extensions: &[String]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => extensions.iter().any(|allowed| allowed == ext),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_log_file_matches_grammar() {
        assert!(is_log_file("log-2024-01-01 10:00:00.123.txt"));
        assert!(is_log_file("log-1999-12-31 23:59:59.0.txt"));
        assert!(is_log_file("log-2024-01-01 10:00:00.123456789.txt"));
        // Digit groups are not range-checked
        assert!(is_log_file("log-2024-13-45 99:99:99.1.txt"));
    }

    #[test]
    fn test_log_file_rejects_near_misses() {
        let near_misses = [
            "log-2024-01-01 10:00:00.txt",      // no sub-second digits
            "log-2024-01-01 10:00:00..txt",     // empty sub-second part
            "log-24-01-01 10:00:00.123.txt",    // two-digit year
            "log-2024-1-01 10:00:00.123.txt",   // one-digit month
            "log-2024-01-01T10:00:00.123.txt",  // T instead of space
            "log-2024-01-01  10:00:00.123.txt", // two spaces
            "log-2024-01-01 10-00-00.123.txt",  // wrong time separator
            "Log-2024-01-01 10:00:00.123.txt",  // prefix case
            "xlog-2024-01-01 10:00:00.123.txt", // leading junk
            "log-2024-01-01 10:00:00.123.txt.bak",
            "log-2024-01-01 10:00:00.123.log",
            "log-2024-01-01 10:00:00.12a.txt",
            "notes.txt",
            "",
        ];
        for name in near_misses {
            assert!(!is_log_file(name), "{name:?} should not match");
        }
    }

    #[test]
    fn test_parse_log_timestamp() {
        let ts = parse_log_timestamp("log-2024-03-05 07:08:09.250.txt").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2024, 3, 5));
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (7, 8, 9));
        assert_eq!(ts.nanosecond(), 250_000_000);
    }

    #[test]
    fn test_parse_log_timestamp_invalid_date() {
        assert!(is_log_file("log-2024-13-01 10:00:00.1.txt"));
        assert!(parse_log_timestamp("log-2024-13-01 10:00:00.1.txt").is_none());
        assert!(parse_log_timestamp("notes.txt").is_none());
    }

    #[test]
    fn test_excluded_dirs() {
        let excludes = strings(&["build", "cmake-build-debug", "cmake-build-release", "mimalloc"]);
        assert!(is_excluded_dir("build", &excludes));
        assert!(is_excluded_dir("mimalloc", &excludes));
        assert!(is_excluded_dir(".git", &excludes));
        assert!(is_excluded_dir(".cache", &[]));
        assert!(!is_excluded_dir("src", &excludes));
        assert!(!is_excluded_dir("Build", &excludes));
        assert!(!is_excluded_dir("build2", &excludes));
    }

    #[test]
    fn test_counted_extensions() {
        let exts = strings(&["cpp", "h", "hpp", "txt"]);
        assert!(has_counted_extension(Path::new("src/a.cpp"), &exts));
        assert!(has_counted_extension(Path::new("a.h"), &exts));
        assert!(has_counted_extension(Path::new("CMakeLists.txt"), &exts));
        assert!(has_counted_extension(Path::new("archive.tar.txt"), &exts));
        assert!(!has_counted_extension(Path::new("main.rs"), &exts));
        assert!(!has_counted_extension(Path::new("a.CPP"), &exts));
        assert!(!has_counted_extension(Path::new(".txt"), &exts));
        assert!(!has_counted_extension(Path::new("Makefile"), &exts));
    }
}
