// SimVerdict - util/constants.rs
//
// Single source of truth for named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "SimVerdict";

/// Application identifier used for the config directory.
pub const APP_ID: &str = "SimVerdict";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Discovery
// =============================================================================

/// Glob patterns used when none are given on the command line or in config.
/// Covers the usual regression output folders.
pub const DEFAULT_LOG_PATTERNS: &[&str] = &[
    "result/log/**/*.log",
    "result/log/*.log",
    "log/**/*.log",
    "log/*.log",
];

// =============================================================================
// Log reading
// =============================================================================

/// A buffer with more than `len / NUL_RATIO_DIVISOR` NUL bytes and no BOM is
/// treated as UTF-16LE (console capture tools that tee wide characters).
pub const NUL_RATIO_DIVISOR: usize = 10;

// =============================================================================
// Export
// =============================================================================

/// Default CSV output path, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "result/summary.csv";

/// Column headers of the CSV export, in order.
pub const CSV_HEADERS: [&str; 10] = [
    "scenario",
    "result",
    "result_source",
    "seed",
    "transfers",
    "errors",
    "questa_errors",
    "questa_warnings",
    "logfile",
    "result_line",
];

// =============================================================================
// Table layout
// =============================================================================

/// Table column headers, in order.
pub const TABLE_HEADERS: [&str; 9] = [
    "SCENARIO",
    "RESULT",
    "SRC",
    "SEED",
    "TRANSFERS",
    "ERRS",
    "Q_ERR",
    "Q_WARN",
    "LOG",
];

/// Fixed width of every table column except the last, which is unbounded.
pub const TABLE_COLUMN_WIDTHS: [usize; 8] = [20, 8, 6, 6, 10, 6, 6, 6];

/// Width of the horizontal rule drawn around the table rows.
pub const TABLE_RULE_WIDTH: usize = 120;

// =============================================================================
// Exit codes
// =============================================================================

/// Every record passed (or only tolerated UNKNOWNs remain).
pub const EXIT_OK: i32 = 0;

/// At least one FAIL, an untolerated UNKNOWN, or an export failure.
pub const EXIT_FAILED: i32 = 1;

/// No log file matched any pattern.
pub const EXIT_NO_LOGS: i32 = 2;

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept quiet because stdout carries the report.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Maximum length of a log line included in debug output.
pub const DEBUG_MAX_LINE_PREVIEW: usize = 200;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Valid values for `[logging] level`.
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];
