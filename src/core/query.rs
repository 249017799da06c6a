// logshed - core/query.rs
//
// Filter engine over uniform query records. Predicate logic is shared
// across all source formats; only the pre-rendered text differs per
// format. Each operation returns matched records joined by newline, or
// an empty string for zero matches.

use crate::core::model::resolve_date;
use crate::core::source::QueryRecord;
use chrono::NaiveDate;

/// A loaded set of records ready for filtering.
///
/// Holds records from exactly one source pass; queries are independent
/// and side-effect free.
#[derive(Debug)]
pub struct LogQuery {
    records: Vec<QueryRecord>,
}

impl LogQuery {
    pub fn new(records: Vec<QueryRecord>) -> Self {
        Self { records }
    }

    /// Keep records whose calendar date (under the injected resolution
    /// year) falls within `start..=end`, inclusive on both ends.
    ///
    /// An inverted range (`start > end`) yields an empty result rather
    /// than an error. Records without a timestamp, or whose timestamp
    /// does not resolve to a valid date, are excluded.
    pub fn between_dates(&self, start: NaiveDate, end: NaiveDate, year: i32) -> String {
        if start > end {
            tracing::debug!(%start, %end, "Inverted date range, returning empty result");
            return String::new();
        }
        self.collect_matches(|record| {
            record
                .timestamp
                .as_deref()
                .and_then(|ts| resolve_date(ts, year))
                .is_some_and(|date| start <= date && date <= end)
        })
    }

    /// Keep records whose parsed `process` field names the given process.
    ///
    /// Matching is case-insensitive string equality against the structured
    /// field only, never a substring search over the rendered text. A bare
    /// daemon name also matches its parenthesized variants, so "sshd"
    /// matches "sshd(pam_unix)" but not "opensshd".
    pub fn by_process(&self, process_name: &str) -> String {
        let wanted = process_name.to_lowercase();
        self.collect_matches(|record| {
            record
                .process
                .as_deref()
                .is_some_and(|process| process_matches(process, &wanted))
        })
    }

    /// Keep records whose rendered text contains any of the keywords as a
    /// case-sensitive substring (logical OR). An empty keyword set yields
    /// zero matches.
    pub fn by_keywords(&self, keywords: &[String]) -> String {
        if keywords.is_empty() {
            return String::new();
        }
        self.collect_matches(|record| keywords.iter().any(|word| record.rendered.contains(word.as_str())))
    }

    fn collect_matches<P: Fn(&QueryRecord) -> bool>(&self, predicate: P) -> String {
        let matched: Vec<&str> = self
            .records
            .iter()
            .filter(|record| predicate(record))
            .map(|record| record.rendered.as_str())
            .collect();
        tracing::debug!(total = self.records.len(), matched = matched.len(), "Query evaluated");
        matched.join("\n")
    }
}

/// Case-insensitive process match: the record's process equals the wanted
/// name, or equals it once a trailing "(component)" suffix is ignored.
/// `wanted` must already be lowercased.
fn process_matches(record_process: &str, wanted: &str) -> bool {
    let process = record_process.to_lowercase();
    if process == wanted {
        return true;
    }
    match process.find('(') {
        Some(idx) if process.ends_with(')') => process[..idx] == *wanted,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::{load_records, SourceFormat};
    use std::path::Path;

    const MIXED_LOG: &str = "\
Jun 13 15:16:01 combo sshd(pam_unix)[19939]: authentication failure; logname= uid=0\n\
Jun 14 15:17:02 combo sshd(pam_unix)[19940]: Accepted password for user1 from 192.168.0.1 port 22 ssh2\n\
Jun 14 15:18:03 combo systemd[1]: Started Session 1 of user user1.\n\
Jun 15 15:19:04 combo sshd(pam_unix)[19941]: Failed password for user1 from 192.168.0.2 port 22 ssh2\n\
Jun 16 10:00:00 combo systemd[1]: Started Session 2 of user user2.\n";

    fn log_query(content: &str) -> LogQuery {
        let records = load_records(content, SourceFormat::Log, Path::new("t.log")).unwrap();
        LogQuery::new(records)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_between_dates_inclusive_bounds() {
        let result = log_query(MIXED_LOG).between_dates(date(2024, 6, 14), date(2024, 6, 15), 2024);
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Jun 14 15:17:02"));
        assert!(lines[2].starts_with("Jun 15 15:19:04"));
    }

    #[test]
    fn test_between_dates_no_matches() {
        let result = log_query(MIXED_LOG).between_dates(date(2024, 7, 1), date(2024, 7, 2), 2024);
        assert_eq!(result, "");
    }

    #[test]
    fn test_between_dates_inverted_range_is_empty() {
        let result = log_query(MIXED_LOG).between_dates(date(2024, 6, 15), date(2024, 6, 14), 2024);
        assert_eq!(result, "");
    }

    #[test]
    fn test_between_dates_single_day() {
        let result = log_query(MIXED_LOG).between_dates(date(2024, 6, 14), date(2024, 6, 14), 2024);
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_between_dates_uses_injected_year() {
        // Feb 29 resolves in 2024 but not 2023, so the year decides inclusion.
        let content = "Feb 29 12:00:00 combo sshd[1]: leap day\n";
        let q = log_query(content);
        assert_eq!(
            q.between_dates(date(2024, 2, 1), date(2024, 3, 1), 2024).lines().count(),
            1
        );
        assert_eq!(q.between_dates(date(2023, 2, 1), date(2023, 3, 1), 2023), "");
    }

    #[test]
    fn test_between_dates_excludes_invalid_timestamps() {
        let content = "\
Jun 14 25:01:00 combo sshd[1]: invalid hour\n\
Jun 14 15:16:01 combo sshd[2]: valid\n";
        let result = log_query(content).between_dates(date(2024, 6, 14), date(2024, 6, 14), 2024);
        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("valid"));
    }

    #[test]
    fn test_by_process_matches_parenthesized_variants() {
        let result = log_query(MIXED_LOG).by_process("sshd");
        let lines: Vec<&str> = result.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.contains("sshd(pam_unix)")));
        // Original file order is preserved.
        assert!(lines[0].contains("19939"));
        assert!(lines[1].contains("19940"));
        assert!(lines[2].contains("19941"));
    }

    #[test]
    fn test_by_process_exact_parenthesized_name() {
        let content = "\
Jun 13 15:16:01 combo sshd(abc_def)[19939]: one\n\
Jun 14 15:17:02 combo sshd(a+b=c)[19940]: two\n";
        let result = log_query(content).by_process("sshd(a+b=c)");
        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("two"));
    }

    #[test]
    fn test_by_process_is_case_insensitive() {
        let content = "Jun 13 15:16:01 combo SSHD(pam_unix)[19939]: upper\n";
        let result = log_query(content).by_process("sshd");
        assert_eq!(result.lines().count(), 1);
    }

    #[test]
    fn test_by_process_ignores_message_mentions() {
        let content = "\
Jul 24 04:20:26 combo sshd[12345]: Authentication failure\n\
Jul 24 04:21:30 combo kernel: session opened for user test by sshd\n";
        let result = log_query(content).by_process("sshd");
        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("Authentication failure"));
    }

    #[test]
    fn test_by_process_rejects_prefix_names() {
        let content = "Jun 13 15:16:01 combo opensshd[1]: msg\n";
        assert_eq!(log_query(content).by_process("sshd"), "");
    }

    #[test]
    fn test_by_process_no_match() {
        assert_eq!(log_query(MIXED_LOG).by_process("nonexistent_process"), "");
    }

    #[test]
    fn test_by_keywords_or_semantics() {
        let result = log_query(MIXED_LOG)
            .by_keywords(&["failure".to_string(), "Accepted".to_string()]);
        assert_eq!(result.lines().count(), 2);
        assert!(result.contains("authentication failure"));
        assert!(result.contains("Accepted password"));
    }

    #[test]
    fn test_by_keywords_case_sensitive() {
        let result = log_query(MIXED_LOG).by_keywords(&["FAILURE".to_string()]);
        assert_eq!(result, "");
    }

    #[test]
    fn test_by_keywords_empty_set_is_empty() {
        assert_eq!(log_query(MIXED_LOG).by_keywords(&[]), "");
    }

    #[test]
    fn test_queries_share_predicates_across_formats() {
        // The same process filter over JSON and CSV sources, differing only
        // in the rendered representation of each match.
        let json = r#"[
            {"timestamp": "Jun 13 15:16:01", "hostname": "combo", "process": "sshd(pam_unix)", "pid": 19939, "message": "authentication failure"},
            {"timestamp": "Jun 14 15:18:03", "hostname": "combo", "process": "systemd", "pid": 1, "message": "Started Session 1"}
        ]"#;
        let records = load_records(json, SourceFormat::Json, Path::new("t.json")).unwrap();
        let result = LogQuery::new(records).by_process("sshd");
        assert_eq!(result.lines().count(), 1);
        assert!(result.starts_with('{') && result.contains("sshd(pam_unix)"));

        let csv = "\
timestamp,hostname,process,pid,message\n\
Jun 13 15:16:01,combo,sshd(pam_unix),19939,authentication failure\n\
Jun 14 15:18:03,combo,systemd,1,Started Session 1\n";
        let records = load_records(csv, SourceFormat::Csv, Path::new("t.csv")).unwrap();
        let result = LogQuery::new(records).by_process("sshd");
        assert_eq!(result.lines().count(), 1);
        assert!(result.starts_with("{'timestamp': 'Jun 13 15:16:01'"));
    }

    #[test]
    fn test_between_dates_skips_csv_rows_without_timestamp() {
        let csv = "\
timestamp,hostname,process,pid,message\n\
,combo,systemd,1,no timestamp\n\
Jun 14 15:18:03,combo,systemd,1,has timestamp\n";
        let records = load_records(csv, SourceFormat::Csv, Path::new("t.csv")).unwrap();
        let result =
            LogQuery::new(records).between_dates(date(2024, 6, 14), date(2024, 6, 14), 2024);
        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("has timestamp"));
    }
}
