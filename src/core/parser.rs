// logshed - core/parser.rs
//
// Single-line syslog parsing. One fallible parse function returning an
// optional record: a line either matches the whole grammar or produces
// nothing. Malformed lines never abort a batch; callers skip them and
// continue.

use crate::core::model::SyslogRecord;
use regex::Regex;
use std::sync::OnceLock;

/// Grammar for one BSD syslog line:
///
/// `<Mon> <D|DD> <HH:MM:SS> <hostname> <process>[([pid])]: <message>`
///
/// - Month is one of the twelve canonical three-letter abbreviations,
///   case-sensitive.
/// - Day is 1-2 digits; " 1" and "01" are both accepted and the timestamp
///   is captured exactly as written.
/// - Time is lexically HH:MM:SS; range validity is the caller's concern.
/// - The process token runs up to `:` or `[`; a directly following
///   `[<digits>]` is captured as the pid and excluded from the process.
/// - The message is everything after the first ": " of the header.
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?P<timestamp>(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+\d{1,2}\s+\d{2}:\d{2}:\d{2})\s+(?P<hostname>\S+)\s+(?P<process>[^\s:\[\]]+)(?:\[(?P<pid>\d+)\])?: (?P<message>.*)$",
        )
        .expect("line_pattern: invalid regex")
    })
}

/// Parse one raw syslog line into a structured record.
///
/// Leading and trailing whitespace is ignored. Returns `None` for any line
/// that does not match the grammar (wrong timestamp shape, missing
/// colon-delimited header, empty string), never an error.
pub fn parse_line(line: &str) -> Option<SyslogRecord> {
    let caps = line_pattern().captures(line.trim())?;

    // The regex guarantees the pid group is all digits; a value too large
    // for i64 rejects the whole line rather than truncating.
    let pid = match caps.name("pid") {
        Some(m) => Some(m.as_str().parse::<i64>().ok()?),
        None => None,
    };

    Some(SyslogRecord {
        timestamp: caps["timestamp"].to_string(),
        hostname: caps["hostname"].to_string(),
        process: caps["process"].to_string(),
        pid,
        message: caps["message"].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_pid() {
        let line = "Jun 14 15:16:01 combo sshd(pam_unix)[19939]: authentication failure; logname= uid=0 euid=0 tty=NODEVssh ruser= rhost=218.188.2.4";
        let record = parse_line(line).unwrap();
        assert_eq!(record.timestamp, "Jun 14 15:16:01");
        assert_eq!(record.hostname, "combo");
        assert_eq!(record.process, "sshd(pam_unix)");
        assert_eq!(record.pid, Some(19939));
        assert_eq!(
            record.message,
            "authentication failure; logname= uid=0 euid=0 tty=NODEVssh ruser= rhost=218.188.2.4"
        );
    }

    #[test]
    fn test_parse_line_without_pid() {
        let line = "Jun 14 15:16:01 combo sshd(pam_unix): authentication failure";
        let record = parse_line(line).unwrap();
        assert_eq!(record.process, "sshd(pam_unix)");
        assert_eq!(record.pid, None);
        assert_eq!(record.message, "authentication failure");
    }

    #[test]
    fn test_parse_line_plain_process() {
        let record = parse_line("Jul 20 12:00:00 myhost myproc[12345]: test message").unwrap();
        assert_eq!(record.hostname, "myhost");
        assert_eq!(record.process, "myproc");
        assert_eq!(record.pid, Some(12345));
        assert_eq!(record.message, "test message");
    }

    #[test]
    fn test_parse_line_kernel_style_bracket_message() {
        // Brackets in the message body must not be mistaken for a pid.
        let record =
            parse_line("Jun 14 15:16:03 combo kernel: [UFW BLOCK] IN=eth0 OUT=").unwrap();
        assert_eq!(record.process, "kernel");
        assert_eq!(record.pid, None);
        assert_eq!(record.message, "[UFW BLOCK] IN=eth0 OUT=");
    }

    #[test]
    fn test_parse_line_space_padded_day_preserved() {
        let record = parse_line("Jun  1 09:00:00 host cron[1]: job started").unwrap();
        assert_eq!(record.timestamp, "Jun  1 09:00:00");
    }

    #[test]
    fn test_parse_line_tolerates_surrounding_whitespace() {
        let record = parse_line("   Jun 14 15:16:01 combo sshd[1]: ok   ").unwrap();
        assert_eq!(record.hostname, "combo");
    }

    #[test]
    fn test_parse_line_rejects_non_syslog_text() {
        assert!(parse_line("This is not a syslog line").is_none());
    }

    #[test]
    fn test_parse_line_rejects_iso_timestamp() {
        assert!(parse_line("2024-09-04 12:34:56 combo sshd: authentication failure").is_none());
    }

    #[test]
    fn test_parse_line_rejects_empty_line() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn test_parse_line_rejects_missing_colon() {
        assert!(parse_line("Jun 14 15:16:01 combo sshd no colon here").is_none());
    }

    #[test]
    fn test_parse_line_rejects_lowercase_month() {
        assert!(parse_line("jun 14 15:16:01 combo sshd[1]: msg").is_none());
    }

    #[test]
    fn test_parse_line_rejects_non_numeric_pid_bracket() {
        // "[abc]" is not a pid, and the process token cannot contain '[',
        // so the whole line is rejected rather than partially parsed.
        assert!(parse_line("Jun 14 15:16:01 combo sshd[abc]: msg").is_none());
    }

    #[test]
    fn test_parse_line_does_not_validate_time_range() {
        // Lexically valid HH:MM:SS matches; range checks belong to the
        // hourly aggregator and the year-resolution helpers.
        let record = parse_line("Jun 14 25:01:00 combo sshd[1]: msg").unwrap();
        assert_eq!(record.timestamp, "Jun 14 25:01:00");
    }
}
