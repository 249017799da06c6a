// logshed - core/split.rs
//
// Day splitter: groups raw syslog lines by the calendar day of their
// timestamp. Pure logic over content; the app layer writes one file per
// group.

use crate::core::model::resolve_date;
use crate::core::parser::parse_line;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Group raw log lines by calendar day.
///
/// The resolution year is pinned once for the whole invocation, so a file
/// spanning a December-to-January boundary resolves both ends into the same
/// year. Unparsable lines and timestamps that do not form a valid date are
/// skipped entirely; there is no "unknown" bucket. Within each group lines
/// keep their original file order. Empty or fully-unparsable input
/// produces zero groups.
pub fn split_by_day(content: &str, year: i32) -> BTreeMap<NaiveDate, Vec<String>> {
    let mut groups: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
    for line in content.lines() {
        let Some(record) = parse_line(line) else {
            continue;
        };
        let Some(date) = resolve_date(&record.timestamp, year) else {
            continue;
        };
        groups.entry(date).or_default().push(line.trim().to_string());
    }
    tracing::debug!(groups = groups.len(), "Split complete");
    groups
}

/// File name for one day group: `<stem>-<YYYY>-<MM>-<DD>.log`.
pub fn day_file_name(stem: &str, date: NaiveDate) -> String {
    format!("{stem}-{}.log", date.format("%Y-%m-%d"))
}
