// logshed - core/source.rs
//
// Record source adapters: raw syslog lines, JSON arrays, and CSV rows
// exposed to the query engine as one uniform record shape. Each adapter
// owns the rule for rendering a matched record back to text; the query
// predicates never look at the source format.

use crate::core::model::SyslogRecord;
use crate::core::parser::parse_line;
use crate::util::constants;
use crate::util::error::SourceError;
use std::path::Path;

// =============================================================================
// Source format
// =============================================================================

/// Input file format, derived from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Raw BSD syslog lines (.log).
    Log,
    /// JSON array of record objects (.json).
    Json,
    /// CSV with a `timestamp,hostname,process,pid,message` header (.csv).
    Csv,
}

impl SourceFormat {
    /// Derive the format from a path's extension.
    ///
    /// Anything other than .log / .json / .csv is a structural failure:
    /// the whole operation refuses to proceed.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("log") => Ok(Self::Log),
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(SourceError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

// =============================================================================
// Query record
// =============================================================================

/// One record as seen by the query engine, regardless of source format.
///
/// Fields are optional because JSON entries may be heterogeneous and CSV
/// rows may have empty cells; a missing field excludes the record from
/// filters that need it without failing the load. `rendered` is the
/// format-specific textual representation returned for matches:
/// the original line for .log, compact single-line JSON for .json, and a
/// single-quoted mapping literal for .csv.
#[derive(Debug, Clone)]
pub struct QueryRecord {
    pub timestamp: Option<String>,
    pub hostname: Option<String>,
    pub process: Option<String>,
    pub pid: Option<String>,
    pub message: Option<String>,
    pub rendered: String,
}

impl QueryRecord {
    fn from_syslog(record: SyslogRecord, rendered: String) -> Self {
        Self {
            timestamp: Some(record.timestamp),
            hostname: Some(record.hostname),
            process: Some(record.process),
            pid: record.pid.map(|p| p.to_string()),
            message: Some(record.message),
            rendered,
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load uniform records from already-read file content.
///
/// `path` is used only for error context; this layer performs no I/O.
pub fn load_records(
    content: &str,
    format: SourceFormat,
    path: &Path,
) -> Result<Vec<QueryRecord>, SourceError> {
    let records = match format {
        SourceFormat::Log => load_log(content),
        SourceFormat::Json => load_json(content, path)?,
        SourceFormat::Csv => load_csv(content, path)?,
    };
    tracing::debug!(
        file = %path.display(),
        format = ?format,
        records = records.len(),
        "Source loaded"
    );
    Ok(records)
}

/// Raw-line adapter: one record per parsable line, unparsable lines
/// skipped. The rendered form is the trimmed original line so matches
/// pass through byte-for-byte.
fn load_log(content: &str) -> Vec<QueryRecord> {
    content
        .lines()
        .filter_map(|line| {
            parse_line(line).map(|record| QueryRecord::from_syslog(record, line.trim().to_string()))
        })
        .collect()
}

/// JSON adapter: expects a top-level array. Entries are taken as-is;
/// missing or non-string fields simply leave the corresponding record
/// field empty. Heterogeneous entries never abort the load.
fn load_json(content: &str, path: &Path) -> Result<Vec<QueryRecord>, SourceError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(content).map_err(|e| SourceError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut records = Vec::with_capacity(entries.len());
    for entry in entries {
        let rendered = serde_json::to_string(&entry).map_err(|e| SourceError::JsonParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        let field = |name: &str| {
            entry
                .get(name)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };
        records.push(QueryRecord {
            timestamp: field("timestamp"),
            hostname: field("hostname"),
            process: field("process"),
            pid: entry.get("pid").and_then(|v| v.as_i64()).map(|p| p.to_string()),
            message: field("message"),
            rendered,
        });
    }
    Ok(records)
}

/// CSV adapter: header must be exactly `timestamp,hostname,process,pid,message`.
/// All cells are read as strings; empty cells become missing fields. The
/// rendered form is a mapping literal with single-quoted keys and values in
/// field order.
fn load_csv(content: &str, path: &Path) -> Result<Vec<QueryRecord>, SourceError> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());

    let headers = reader.headers().map_err(|e| SourceError::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    if headers.iter().collect::<Vec<_>>() != constants::FIELD_ORDER {
        return Err(SourceError::CsvHeader {
            path: path.to_path_buf(),
            found: headers.iter().collect::<Vec<_>>().join(","),
        });
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| SourceError::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
        let cell = |idx: usize| -> Option<String> {
            match row.get(idx) {
                Some("") | None => None,
                Some(value) => Some(value.to_string()),
            }
        };
        records.push(QueryRecord {
            timestamp: cell(0),
            hostname: cell(1),
            process: cell(2),
            pid: cell(3),
            message: cell(4),
            rendered: render_csv_row(&row),
        });
    }
    Ok(records)
}

/// Render one CSV row as `{'timestamp': '…', 'hostname': '…', …}` with
/// single-quoted keys and values in field order. Absent pid renders as an
/// empty string, matching the CSV interchange contract.
fn render_csv_row(row: &csv::StringRecord) -> String {
    let pairs: Vec<String> = constants::FIELD_ORDER
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let value = row.get(idx).unwrap_or("").replace('\'', "\\'");
            format!("'{name}': '{value}'")
        })
        .collect();
    format!("{{{}}}", pairs.join(", "))
}
