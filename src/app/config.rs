// logshed - app/config.rs
//
// Optional TOML configuration with startup validation. There is no
// implicit config search path; the file is named explicitly with
// --config. Absent file or absent keys fall back to defaults.

use crate::util::constants;
use crate::util::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Top-level configuration, parsed from TOML.
///
/// ```toml
/// [logging]
/// level = "debug"
///
/// [export]
/// sql_table = "syslog"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Tracing filter level; one of trace/debug/info/warn/error.
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Table name used in generated SQL statements.
    pub sql_table: Option<String>,
}

impl Config {
    /// Load and validate configuration. `None` means no config file was
    /// given; all defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Config = toml::from_str(&raw).map_err(|e| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        config.validate()?;

        tracing::debug!(file = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Configured log level, if any.
    pub fn log_level(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }

    /// Table name for SQL export, defaulting to "syslog".
    pub fn sql_table(&self) -> &str {
        self.export
            .sql_table
            .as_deref()
            .unwrap_or(constants::DEFAULT_SQL_TABLE)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = self.logging.level.as_deref() {
            if !constants::VALID_LOG_LEVELS.contains(&level) {
                return Err(ConfigError::ValueOutOfRange {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    expected: constants::VALID_LOG_LEVELS.join(", "),
                });
            }
        }

        if let Some(table) = self.export.sql_table.as_deref() {
            let valid_identifier = !table.is_empty()
                && !table.starts_with(|c: char| c.is_ascii_digit())
                && table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if !valid_identifier {
                return Err(ConfigError::ValueOutOfRange {
                    field: "export.sql_table".to_string(),
                    value: table.to_string(),
                    expected: "an SQL identifier (letters, digits, underscores)".to_string(),
                });
            }
        }

        Ok(())
    }
}
