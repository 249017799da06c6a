// logshed - core/report.rs
//
// Hourly event aggregation and the terminal bar chart built from it.

use crate::core::model::resolve_datetime;
use crate::core::parser::parse_line;
use crate::util::constants;
use std::collections::HashMap;

/// Count parsed events per hour of day.
///
/// A line contributes to a bucket only when its HH token converts to an
/// integer in 0..=23 AND the full timestamp resolves to a valid calendar
/// time under the injected year. Out-of-range components (hour "25",
/// minute "61", a negative-looking token) exclude the line from all
/// buckets, with no clamping or wrapping. Hours with zero events are absent
/// from the map.
pub fn count_events_per_hour(content: &str, year: i32) -> HashMap<u32, u32> {
    let mut counts: HashMap<u32, u32> = HashMap::new();
    for line in content.lines() {
        let Some(record) = parse_line(line) else {
            continue;
        };
        let Some(hour) = syntactic_hour(&record.timestamp) else {
            continue;
        };
        if resolve_datetime(&record.timestamp, year).is_none() {
            continue;
        }
        *counts.entry(hour).or_insert(0) += 1;
    }
    counts
}

/// Extract the HH token from "<Mon> <DD> <HH:MM:SS>" and convert it,
/// accepting only 0..=23.
fn syntactic_hour(timestamp: &str) -> Option<u32> {
    let time = timestamp.split_whitespace().last()?;
    let hh = time.split(':').next()?;
    let hour: u32 = hh.parse().ok()?;
    (hour <= 23).then_some(hour)
}

/// Render hourly counts as a fixed 24-row bar chart.
///
/// Every hour 00-23 gets a row; the busiest hour is scaled to
/// [`constants::CHART_MAX_BAR_WIDTH`] characters and the count is printed
/// after the bar.
pub fn render_hour_chart(counts: &HashMap<u32, u32>) -> String {
    let max = counts.values().copied().max().unwrap_or(0);
    let mut out = String::new();
    for hour in 0..24 {
        let count = counts.get(&hour).copied().unwrap_or(0);
        let width = if max == 0 {
            0
        } else {
            (count as usize * constants::CHART_MAX_BAR_WIDTH) / max as usize
        };
        out.push_str(&format!("{hour:02}:00 | {} {count}\n", "#".repeat(width)));
    }
    out
}
