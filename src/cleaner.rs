//! Removal of timestamped build logs from a single directory.

use crate::error::{Result, ToolError};
use crate::patterns::{is_log_file, parse_log_timestamp};
use crate::report;
use crate::time::{TimeFilter, TimeFilterStats};

use chrono::NaiveDateTime;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Options controlling cleanup behavior (runtime flags)
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearOptions {
    pub dry_run: bool,
    pub verbose: bool,
}

/// What happened to one matching log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed,
    /// Dry run: the log would have been removed
    WouldRemove,
    /// Kept because it is newer than the age cutoff
    KeptByAge,
    /// Deletion failed; holds the underlying cause
    Failed(String),
}

/// A log file found directly inside the target directory
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub name: String,
    pub timestamp: Option<NaiveDateTime>,
    pub outcome: RemovalOutcome,
}

/// Result of one cleanup pass
#[derive(Debug)]
pub struct ClearReport {
    pub directory: PathBuf,
    pub entries: Vec<LogEntry>,
    pub stats: TimeFilterStats,
    pub dry_run: bool,
}

impl ClearReport {
    fn count(&self, outcome: &RemovalOutcome) -> usize {
        self.entries.iter().filter(|e| &e.outcome == outcome).count()
    }

    /// Logs actually deleted
    pub fn removed_count(&self) -> usize {
        self.count(&RemovalOutcome::Removed)
    }

    /// Logs that a dry run would delete
    pub fn would_remove_count(&self) -> usize {
        self.count(&RemovalOutcome::WouldRemove)
    }

    pub fn failed_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, RemovalOutcome::Failed(_)))
            .count()
    }

    /// Number reported in the summary line
    pub fn total(&self) -> usize {
        if self.dry_run {
            self.would_remove_count()
        } else {
            self.removed_count()
        }
    }
}

/// List the names of all direct entries of `dir`, sorted
fn list_entry_names(dir: &Path) -> Result<Vec<OsString>> {
    let read_dir = fs::read_dir(dir).map_err(|e| ToolError::io(dir, e))?;

    let mut names = Vec::new();
    for entry_result in read_dir {
        let entry = entry_result.map_err(|e| ToolError::io(dir, e))?;
        names.push(entry.file_name());
    }
    names.sort();

    Ok(names)
}

/// Delete every build log directly inside `dir`.
///
/// A missing directory is an error and nothing is touched. Once listing
/// succeeds, a failed deletion is recorded against that log and the pass
/// continues with the next entry.
pub fn clear_logs(
    dir: &Path,
    options: ClearOptions,
    time_filter: &TimeFilter,
) -> Result<ClearReport> {
    if !dir.exists() {
        return Err(ToolError::MissingDirectory(dir.to_path_buf()));
    }

    report::print_clear_header(dir);

    let mut clear_report = ClearReport {
        directory: dir.to_path_buf(),
        entries: Vec::new(),
        stats: TimeFilterStats::default(),
        dry_run: options.dry_run,
    };

    for name in list_entry_names(dir)? {
        // Non-UTF-8 names can never match the log grammar
        let Some(name) = name.to_str() else {
            if options.verbose {
                report::debug(&format!(
                    "Skipping non-UTF-8 entry: {}",
                    name.to_string_lossy()
                ));
            }
            continue;
        };

        if options.verbose {
            report::debug(&format!("Checking entry: {name}"));
        }

        if !is_log_file(name) {
            continue;
        }

        clear_report.stats.total_found += 1;
        let timestamp = parse_log_timestamp(name);
        if options.verbose {
            let stamp = timestamp.map_or_else(|| "not a valid time".to_string(), |t| t.to_string());
            report::debug(&format!("Matched log {name}, stamped {stamp}"));
        }

        if !time_filter.passes(timestamp) {
            clear_report.stats.excluded_by_time += 1;
            if options.verbose {
                report::debug(&format!("Log filtered by age: {name}"));
            }
            clear_report.entries.push(LogEntry {
                name: name.to_string(),
                timestamp,
                outcome: RemovalOutcome::KeptByAge,
            });
            continue;
        }
        clear_report.stats.passed_time_filter += 1;

        let outcome = if options.dry_run {
            report::print_would_remove(name);
            RemovalOutcome::WouldRemove
        } else {
            match fs::remove_file(dir.join(name)) {
                Ok(_) => {
                    report::print_removed(name);
                    RemovalOutcome::Removed
                }
                Err(err) => {
                    report::print_remove_failed(name, &err);
                    RemovalOutcome::Failed(err.to_string())
                }
            }
        };

        clear_report.entries.push(LogEntry {
            name: name.to_string(),
            timestamp,
            outcome,
        });
    }

    report::print_clear_summary(&clear_report, time_filter.is_active());

    Ok(clear_report)
}
