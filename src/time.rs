//! Age filtering for build logs, based on the timestamp in the log name.

use crate::error::{Result, ToolError};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};

/// Age filter configuration for log removal
#[derive(Debug, Default)]
pub struct TimeFilter {
    /// Logs must be stamped before this time to be removed
    older_than: Option<NaiveDateTime>,
    /// Logs must be stamped before midnight of this date to be removed
    before: Option<NaiveDateTime>,
}

impl TimeFilter {
    /// Create a time filter from CLI arguments
    pub fn from_args(older_than_str: Option<&str>, before_str: Option<&str>) -> Result<Self> {
        let older_than = match older_than_str {
            Some(duration_str) => {
                let duration = parse_duration(duration_str)?;
                Some(Local::now().naive_local() - duration)
            }
            None => None,
        };

        let before = match before_str {
            Some(date_str) => Some(parse_date(date_str)?),
            None => None,
        };

        Ok(TimeFilter { older_than, before })
    }

    /// Check if a log passes the filter.
    ///
    /// Logs without a usable timestamp always pass.
    pub fn passes(&self, stamp: Option<NaiveDateTime>) -> bool {
        let Some(stamp) = stamp else {
            return true;
        };

        if let Some(cutoff) = self.older_than {
            if stamp >= cutoff {
                return false;
            }
        }

        if let Some(cutoff) = self.before {
            if stamp >= cutoff {
                return false;
            }
        }

        true
    }

    /// Check if any time filters are active
    pub fn is_active(&self) -> bool {
        self.older_than.is_some() || self.before.is_some()
    }
}

/// Statistics about age filtering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TimeFilterStats {
    pub total_found: usize,
    pub passed_time_filter: usize,
    pub excluded_by_time: usize,
}

/// Parse a date string in YYYY-MM-DD format to local midnight
pub fn parse_date(date_str: &str) -> Result<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        ToolError::Settings(format!(
            "Invalid date format. Expected YYYY-MM-DD, got: {date_str}"
        ))
    })?;

    let year = date.year();
    if !(1970..=2100).contains(&year) {
        return Err(ToolError::Settings(format!(
            "Year must be between 1970 and 2100, got: {year}"
        )));
    }

    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| ToolError::Settings(format!("Invalid midnight for {date_str}")))
}

/// Parse a duration string with optional unit suffix.
///
/// Supports h (hours), d (days), w (weeks), m (months, 30 days).
/// Plain numbers are days. Examples: "15", "15d", "2w", "3m", "48h"
pub fn parse_duration(duration_str: &str) -> Result<Duration> {
    let duration_str = duration_str.trim();

    let (num_str, unit) = match duration_str.find(|c: char| c.is_alphabetic()) {
        Some(pos) => {
            let (num, unit) = duration_str.split_at(pos);
            (num, Some(unit))
        }
        None => (duration_str, None),
    };

    let value: i64 = num_str.trim().parse().map_err(|_| {
        ToolError::Settings(format!(
            "Invalid duration format. Expected a number, got: {num_str}"
        ))
    })?;

    let hours = match unit {
        None | Some("d") | Some("D") => value.checked_mul(24),
        Some("h") | Some("H") => Some(value),
        Some("w") | Some("W") => value.checked_mul(7 * 24),
        Some("m") | Some("M") => value.checked_mul(30 * 24),
        Some(unknown) => {
            return Err(ToolError::Settings(format!(
                "Invalid duration unit '{unknown}'. Supported units: h (hours), d (days), w (weeks), m (months)"
            )));
        }
    };

    hours
        .filter(|h| *h >= 0)
        .and_then(Duration::try_hours)
        .ok_or_else(|| ToolError::Settings(format!("Duration out of range: {duration_str}")))
}
