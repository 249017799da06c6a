// logshed - app/commands.rs
//
// Per-subcommand drivers: read the input file, call into the core layer,
// write the output. Each invocation performs one sequential pass over
// its input and holds no state between calls. The year used for
// timestamp resolution is pinned here, once per invocation.

use crate::app::config::Config;
use crate::core::export;
use crate::core::model::SyslogRecord;
use crate::core::parser::parse_line;
use crate::core::query::LogQuery;
use crate::core::report;
use crate::core::source::{load_records, SourceFormat};
use crate::core::split;
use crate::util::error::{LogshedError, Result};
use chrono::{Datelike, Local, NaiveDate};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Target format for the export subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
    Sql,
}

/// One query operation, as parsed from the CLI.
#[derive(Debug, Clone)]
pub enum QueryOp {
    Between { start: NaiveDate, end: NaiveDate },
    Process { name: String },
    Words { keywords: Vec<String> },
}

/// The resolution year for this invocation: the current calendar year.
/// Core functions take it as a parameter so tests can pin it.
fn current_year() -> i32 {
    Local::now().year()
}

fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| LogshedError::Io {
        path: path.to_path_buf(),
        operation: "read",
        source: e,
    })
}

fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| LogshedError::Io {
        path: path.to_path_buf(),
        operation: "create",
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Parse every well-formed syslog line from raw content, skipping the rest.
fn parse_records(content: &str) -> Vec<SyslogRecord> {
    let records: Vec<SyslogRecord> = content.lines().filter_map(parse_line).collect();
    tracing::debug!(
        lines = content.lines().count(),
        records = records.len(),
        "Syslog content parsed"
    );
    records
}

/// Export a raw syslog file to JSON, CSV, or a SQL statement file.
/// Returns the number of records written.
pub fn run_export(
    format: ExportFormat,
    input: &Path,
    output: &Path,
    config: &Config,
) -> Result<usize> {
    let records = parse_records(&read_input(input)?);
    let writer = create_output(output)?;

    let count = match format {
        ExportFormat::Json => export::export_json(&records, writer, output)?,
        ExportFormat::Csv => export::export_csv(&records, writer, output)?,
        ExportFormat::Sql => export::export_sql(&records, writer, config.sql_table(), output)?,
    };

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        format = ?format,
        records = count,
        "Export complete"
    );
    Ok(count)
}

/// Run one query over a .log/.json/.csv source and return the matched
/// records in the source's textual rendering, newline-joined.
pub fn run_query(input: &Path, op: &QueryOp) -> Result<String> {
    let format = SourceFormat::from_path(input)?;
    let content = read_input(input)?;
    let query = LogQuery::new(load_records(&content, format, input)?);

    let result = match op {
        QueryOp::Between { start, end } => query.between_dates(*start, *end, current_year()),
        QueryOp::Process { name } => query.by_process(name),
        QueryOp::Words { keywords } => query.by_keywords(keywords),
    };
    Ok(result)
}

/// Split a syslog file into one `<stem>-<YYYY>-<MM>-<DD>.log` file per
/// calendar day, written next to the input. Returns the paths written,
/// in date order.
pub fn run_split(input: &Path) -> Result<Vec<PathBuf>> {
    let content = read_input(input)?;
    let groups = split::split_by_day(&content, current_year());

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("syslog");
    let parent = input.parent().unwrap_or_else(|| Path::new("."));

    let mut written = Vec::with_capacity(groups.len());
    for (date, lines) in &groups {
        let path = parent.join(split::day_file_name(stem, *date));
        let mut body = lines.join("\n");
        body.push('\n');
        std::fs::write(&path, body).map_err(|e| LogshedError::Io {
            path: path.clone(),
            operation: "write",
            source: e,
        })?;
        written.push(path);
    }

    tracing::info!(input = %input.display(), files = written.len(), "Split complete");
    Ok(written)
}

/// Build the hourly event frequency chart for a syslog file.
pub fn run_report(input: &Path) -> Result<String> {
    let content = read_input(input)?;
    let counts = report::count_events_per_hour(&content, current_year());
    Ok(report::render_hour_chart(&counts))
}
