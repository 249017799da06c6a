// logshed - core/export.rs
//
// JSON, CSV, and SQL-statement export of parsed syslog records.
// Core layer: writes to any Write trait object; the app layer opens files.

use crate::core::model::SyslogRecord;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records as a JSON array of objects.
///
/// `pid` serialises as a JSON number or `null`.
pub fn export_json<W: Write>(
    records: &[SyslogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

/// Export records as CSV with the `timestamp,hostname,process,pid,message`
/// header. `pid` is written as a decimal string, or empty when absent.
pub fn export_csv<W: Write>(
    records: &[SyslogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(crate::util::constants::FIELD_ORDER)
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    for record in records {
        let pid = record.pid.map(|p| p.to_string()).unwrap_or_default();
        csv_writer
            .write_record([
                &record.timestamp,
                &record.hostname,
                &record.process,
                &pid,
                &record.message,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(records.len())
}

/// Export records as a SQL statement file: the table DDL followed by one
/// multi-row INSERT. String fields are single-quote-delimited with `''`
/// escaping; an absent pid becomes an unquoted NULL literal. No database
/// connection is involved; the statements are consumed by an external
/// loader.
pub fn export_sql<W: Write>(
    records: &[SyslogRecord],
    mut writer: W,
    table: &str,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let io_err = |e: std::io::Error| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    };

    writeln!(
        writer,
        "CREATE TABLE IF NOT EXISTS {table} (\n    \
         id SERIAL PRIMARY KEY,\n    \
         timestamp VARCHAR(255) NOT NULL,\n    \
         hostname VARCHAR(255) NOT NULL,\n    \
         process VARCHAR(255) NOT NULL,\n    \
         pid INTEGER,\n    \
         message TEXT NOT NULL\n);"
    )
    .map_err(io_err)?;

    if records.is_empty() {
        return Ok(0);
    }

    writeln!(
        writer,
        "\nINSERT INTO {table} (timestamp, hostname, process, pid, message) VALUES"
    )
    .map_err(io_err)?;

    for (idx, record) in records.iter().enumerate() {
        let pid = record
            .pid
            .map(|p| p.to_string())
            .unwrap_or_else(|| "NULL".to_string());
        let terminator = if idx + 1 == records.len() { ";" } else { "," };
        writeln!(
            writer,
            "({}, {}, {}, {pid}, {}){terminator}",
            sql_quote(&record.timestamp),
            sql_quote(&record.hostname),
            sql_quote(&record.process),
            sql_quote(&record.message),
        )
        .map_err(io_err)?;
    }

    Ok(records.len())
}

/// Single-quote a string literal, doubling embedded quotes.
fn sql_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
