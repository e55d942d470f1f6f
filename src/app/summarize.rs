// SimVerdict - app/summarize.rs
//
// The summarize pipeline: discovery -> read -> classify -> report -> exit code.
//
// Files are processed one after another with no shared state; each record
// depends only on its own log. Per-file problems never abort the batch:
// an unreadable log is classified from empty text and ends up UNKNOWN.
// Only "no logs at all" stops the run before any output is produced.

use crate::core::classifier;
use crate::core::discovery;
use crate::core::export;
use crate::core::model::{RunRecord, Totals};
use crate::core::report;
use crate::platform::config::{CsvSetting, FileConfig};
use crate::platform::fs;
use crate::util::constants;
use crate::util::error::{ExportError, Result, SimVerdictError};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// Configuration
// =============================================================================

/// Everything one summarize run needs, merged from CLI, config file, and
/// built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryConfig {
    /// Glob patterns naming the logs to classify.
    pub patterns: Vec<String>,
    /// CSV output path; `None` skips the CSV file.
    pub csv_path: Option<PathBuf>,
    /// JSON output path; `None` skips the JSON file.
    pub json_path: Option<PathBuf>,
    /// Treat UNKNOWN verdicts as non-failing.
    pub allow_unknown: bool,
    /// Print each record's deciding line after the table.
    pub debug_lines: bool,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            patterns: constants::DEFAULT_LOG_PATTERNS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            csv_path: Some(PathBuf::from(constants::DEFAULT_CSV_PATH)),
            json_path: None,
            allow_unknown: false,
            debug_lines: false,
        }
    }
}

/// Values given on the command line. Unset options defer to the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub patterns: Vec<String>,
    pub csv_path: Option<PathBuf>,
    pub no_csv: bool,
    pub json_path: Option<PathBuf>,
    pub allow_unknown: bool,
    pub debug_lines: bool,
}

impl SummaryConfig {
    /// Merge with priority: CLI > config file > defaults.
    ///
    /// Boolean switches can only be turned on from the CLI; a config file
    /// `true` stays in effect when the flag is absent.
    pub fn resolve(cli: CliOverrides, file: FileConfig) -> Self {
        let defaults = Self::default();

        let patterns = if !cli.patterns.is_empty() {
            cli.patterns
        } else {
            file.patterns.unwrap_or(defaults.patterns)
        };

        let csv_path = if cli.no_csv {
            None
        } else if let Some(path) = cli.csv_path {
            Some(path)
        } else {
            match file.csv {
                CsvSetting::Unset => defaults.csv_path,
                CsvSetting::Disabled => None,
                CsvSetting::Path(path) => Some(path),
            }
        };

        Self {
            patterns,
            csv_path,
            json_path: cli.json_path.or(file.json),
            allow_unknown: cli.allow_unknown || file.allow_unknown.unwrap_or(false),
            debug_lines: cli.debug_lines || file.debug_lines.unwrap_or(false),
        }
    }
}

// =============================================================================
// Pipeline
// =============================================================================

/// Outcome of a summarize run that found at least one log.
#[derive(Debug, Clone)]
pub struct Summary {
    pub records: Vec<RunRecord>,
    pub totals: Totals,
    pub exit_code: i32,
}

/// Read and classify one log. Never fails: an unreadable file is reported
/// and classified as if it were empty.
pub fn classify_file(path: &Path) -> RunRecord {
    let text = match fs::read_log(path) {
        Ok(decoded) => decoded.text,
        Err(e) => {
            tracing::warn!(error = %e, "Log unreadable; classifying as empty");
            String::new()
        }
    };

    let record = classifier::classify(&text, path);
    tracing::debug!(
        file = %path.display(),
        scenario = %record.scenario,
        verdict = %record.verdict,
        source = %record.source,
        line = %preview(&record.matched_line),
        "Log classified"
    );
    record
}

/// Run the whole pipeline, writing the human-readable report to `out`.
///
/// Returns the process exit code. A discovery failure is reported on `out`
/// and mapped to its exit code; `Err` is reserved for failures writing the
/// report itself.
pub fn run<W: Write>(config: &SummaryConfig, out: &mut W) -> Result<i32> {
    match summarize(config, out) {
        Ok(summary) => Ok(summary.exit_code),
        Err(SimVerdictError::Discovery(e)) => {
            tracing::error!(error = %e, "Summary aborted");
            writeln!(out, "ERROR: {e}")?;
            Ok(constants::EXIT_NO_LOGS)
        }
        Err(e) => Err(e),
    }
}

/// Pipeline body. Fails before writing anything when discovery finds no
/// logs; export failures are reported on `out` and fail the exit code.
pub fn summarize<W: Write>(config: &SummaryConfig, out: &mut W) -> Result<Summary> {
    let paths = discovery::find_logs(&config.patterns)?;
    let records: Vec<RunRecord> = paths.iter().map(|p| classify_file(p)).collect();

    let totals = report::write_table(&records, &mut *out)?;

    let mut export_failed = false;
    if let Some(path) = &config.csv_path {
        match write_export(path, &records, export::export_csv) {
            Ok(_) => writeln!(out, "CSV written: {}", path.display())?,
            Err(e) => {
                export_failed = true;
                tracing::error!(error = %e, "CSV export failed");
                writeln!(out, "ERROR: {e}")?;
            }
        }
    }
    if let Some(path) = &config.json_path {
        match write_export(path, &records, export::export_json) {
            Ok(_) => writeln!(out, "JSON written: {}", path.display())?,
            Err(e) => {
                export_failed = true;
                tracing::error!(error = %e, "JSON export failed");
                writeln!(out, "ERROR: {e}")?;
            }
        }
    }

    if config.debug_lines {
        report::write_debug_lines(&records, &mut *out)?;
    }

    let mut exit_code = report::exit_code(&records, config.allow_unknown);
    if export_failed {
        exit_code = constants::EXIT_FAILED;
    }

    tracing::info!(
        total = totals.total,
        pass = totals.pass,
        fail = totals.fail,
        unknown = totals.unknown,
        exit_code,
        "Summary complete"
    );

    Ok(Summary {
        records,
        totals,
        exit_code,
    })
}

fn write_export<F>(
    path: &Path,
    records: &[RunRecord],
    export: F,
) -> std::result::Result<usize, ExportError>
where
    F: FnOnce(
        &[RunRecord],
        io::BufWriter<std::fs::File>,
        &Path,
    ) -> std::result::Result<usize, ExportError>,
{
    let file = fs::create_output(path)?;
    export(records, io::BufWriter::new(file), path)
}

/// Truncate a log line for debug output.
fn preview(line: &str) -> String {
    line.chars().take(constants::DEBUG_MAX_LINE_PREVIEW).collect()
}
