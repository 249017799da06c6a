// logshed - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "logshed";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Logging
// =============================================================================

/// Default tracing filter level when neither RUST_LOG, --debug, nor a config
/// file level is present.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log levels accepted in the `[logging] level` config key.
pub const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

// =============================================================================
// Syslog field layout
// =============================================================================

/// Column order shared by the CSV exporter, the CSV source adapter, and the
/// SQL INSERT statement. The on-disk CSV header must match exactly.
pub const FIELD_ORDER: [&str; 5] = ["timestamp", "hostname", "process", "pid", "message"];

/// chrono format for a syslog timestamp once the resolution year has been
/// appended ("Jun 14 15:16:01 2024"). `%e` accepts both space- and
/// zero-padded days.
pub const TIMESTAMP_WITH_YEAR_FORMAT: &str = "%b %e %H:%M:%S %Y";

// =============================================================================
// Export defaults
// =============================================================================

/// Table name used by the SQL exporter unless overridden in config.
pub const DEFAULT_SQL_TABLE: &str = "syslog";

// =============================================================================
// Hourly report
// =============================================================================

/// Maximum width in characters of a bar in the hourly report chart. The
/// busiest hour is scaled to this width; other bars scale proportionally.
pub const CHART_MAX_BAR_WIDTH: usize = 50;
