// logshed - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing
// 2. Configuration loading
// 3. Logging initialisation
// 4. Subcommand dispatch

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use logshed::app::commands::{self, ExportFormat, QueryOp};
use logshed::app::config::Config;
use logshed::util;
use std::path::PathBuf;

/// logshed - syslog file parser, exporter, and query tool.
///
/// Parses BSD syslog files, exports them to JSON/CSV/SQL, queries records
/// by time range, process name, or keywords, splits files by calendar day,
/// and reports hourly event frequency.
#[derive(Parser, Debug)]
#[command(name = util::constants::APP_NAME, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    /// Path to a TOML configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export a syslog file to another format.
    Export {
        /// Target format.
        #[arg(value_enum)]
        format: ExportFormat,
        /// Path to the syslog file.
        input: PathBuf,
        /// Path to the output file.
        output: PathBuf,
    },

    /// Query records in a .log, .json, or .csv file.
    Query {
        /// Path to the source file.
        input: PathBuf,
        #[command(subcommand)]
        op: QueryCommand,
    },

    /// Split a syslog file into one file per calendar day.
    Split {
        /// Path to the syslog file.
        input: PathBuf,
    },

    /// Print an hourly event frequency bar chart.
    Report {
        /// Path to the syslog file.
        input: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum QueryCommand {
    /// Records dated within an inclusive calendar date range.
    Between {
        /// Start date, YYYY-MM-DD.
        start: NaiveDate,
        /// End date, YYYY-MM-DD.
        end: NaiveDate,
    },

    /// Records whose process field names the given process.
    Process {
        /// Process name, e.g. "sshd" or "sshd(pam_unix)".
        name: String,
    },

    /// Records containing any of the given keywords.
    Words {
        /// Comma-separated keywords, matched case-sensitively.
        #[arg(value_delimiter = ',')]
        keywords: Vec<String>,
    },
}

impl From<QueryCommand> for QueryOp {
    fn from(cmd: QueryCommand) -> Self {
        match cmd {
            QueryCommand::Between { start, end } => QueryOp::Between { start, end },
            QueryCommand::Process { name } => QueryOp::Process { name },
            QueryCommand::Words { keywords } => QueryOp::Words { keywords },
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Config must load before logging so its level can participate in the
    // filter priority chain.
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    util::logging::init(cli.debug, config.log_level());

    let result = run(cli.command, &config);

    if let Err(e) = result {
        tracing::error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, config: &Config) -> logshed::util::error::Result<()> {
    match command {
        Command::Export {
            format,
            input,
            output,
        } => {
            let count = commands::run_export(format, &input, &output, config)?;
            println!("Exported {count} records to {}", output.display());
        }
        Command::Query { input, op } => {
            let result = commands::run_query(&input, &QueryOp::from(op))?;
            println!("{result}");
        }
        Command::Split { input } => {
            let written = commands::run_split(&input)?;
            for path in &written {
                println!("{}", path.display());
            }
        }
        Command::Report { input } => {
            let chart = commands::run_report(&input)?;
            print!("{chart}");
        }
    }
    Ok(())
}
