// logshed - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
// These types are the shared vocabulary across parsing, querying,
// and export.

use crate::util::constants;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// =============================================================================
// Syslog record
// =============================================================================

/// A single parsed syslog entry.
///
/// Created transiently per input line/row/entry during one pass over a
/// source, never mutated, and discarded after serialisation or predicate
/// evaluation. Parsing either yields a complete record or no record at all;
/// a partially filled record never exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyslogRecord {
    /// Timestamp exactly as written in the source: "<Mon> <DD> <HH:MM:SS>".
    /// BSD syslog carries no year; see [`resolve_date`] for comparisons.
    pub timestamp: String,

    /// First whitespace-delimited token after the timestamp.
    pub hostname: String,

    /// Process name, case preserved. May contain a parenthesized component
    /// such as "sshd(pam_unix)". Never includes the bracketed pid.
    pub process: String,

    /// Numeric id captured from a "[<digits>]" suffix on the process token.
    /// `None` exactly when no such suffix was present.
    pub pid: Option<i64>,

    /// Free text after the header, with no further interpretation.
    pub message: String,
}

// =============================================================================
// Year resolution
// =============================================================================
//
// Syslog timestamps have no year, so every calendar comparison appends an
// explicitly injected resolution year before parsing with chrono. Call
// sites pass the current calendar year in production and pinned values in
// tests; nothing in here reads a clock.

/// Resolve a year-less syslog timestamp to a full calendar datetime.
///
/// Returns `None` when the text does not form a valid calendar time under
/// the given year (bad month token, Jun 31, hour 25, and so on). Callers
/// treat `None` as "exclude this record", never as an error.
pub fn resolve_datetime(timestamp: &str, year: i32) -> Option<NaiveDateTime> {
    let with_year = format!("{timestamp} {year}");
    NaiveDateTime::parse_from_str(&with_year, constants::TIMESTAMP_WITH_YEAR_FORMAT).ok()
}

/// Resolve a year-less syslog timestamp to just its calendar date.
pub fn resolve_date(timestamp: &str, year: i32) -> Option<NaiveDate> {
    resolve_datetime(timestamp, year).map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_datetime_appends_injected_year() {
        let dt = resolve_datetime("Jun 14 15:16:01", 2024).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-06-14 15:16:01");
    }

    #[test]
    fn test_resolve_datetime_accepts_space_padded_day() {
        let dt = resolve_datetime("Jun  1 09:00:00", 2024).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "2024-06-01");
    }

    #[test]
    fn test_resolve_datetime_rejects_out_of_range_time() {
        assert!(resolve_datetime("Jun 14 25:01:00", 2024).is_none());
        assert!(resolve_datetime("Jun 14 12:61:00", 2024).is_none());
    }

    #[test]
    fn test_resolve_datetime_rejects_impossible_date() {
        assert!(resolve_datetime("Jun 31 12:00:00", 2024).is_none());
        // Feb 29 only exists in a leap year; the injected year decides.
        assert!(resolve_datetime("Feb 29 12:00:00", 2024).is_some());
        assert!(resolve_datetime("Feb 29 12:00:00", 2023).is_none());
    }

    #[test]
    fn test_resolve_date_drops_time_of_day() {
        let date = resolve_date("Dec 31 23:59:59", 2025).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_record_json_shape() {
        let record = SyslogRecord {
            timestamp: "Jun 14 15:16:01".to_string(),
            hostname: "combo".to_string(),
            process: "sshd(pam_unix)".to_string(),
            pid: Some(19939),
            message: "authentication failure".to_string(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"pid\":19939"));

        let no_pid = SyslogRecord { pid: None, ..record };
        let json = serde_json::to_string(&no_pid).unwrap();
        assert!(json.contains("\"pid\":null"));
    }
}
