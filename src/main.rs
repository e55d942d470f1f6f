// SimVerdict - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Config file loading
// 3. Logging initialisation (debug mode support)
// 4. The summarize run and its process exit code

use clap::Parser;
use simverdict::app::summarize::{self, CliOverrides, SummaryConfig};
use simverdict::platform::config::{self, FileConfig};
use simverdict::util;
use std::path::PathBuf;

/// SimVerdict - Summarise simulation regression logs and gate on the result.
///
/// Classifies every matched log as PASS, FAIL, or UNKNOWN, prints a summary
/// table, writes a CSV, and exits 0 (all pass), 1 (failures), or 2 (no logs).
#[derive(Parser, Debug)]
#[command(name = "simverdict", version, about)]
struct Cli {
    /// Glob patterns for log files (default: common regression log folders).
    patterns: Vec<String>,

    /// Write the CSV summary to this path (default: result/summary.csv).
    #[arg(long = "csv", value_name = "PATH", conflicts_with = "no_csv")]
    csv: Option<PathBuf>,

    /// Do not write a CSV summary.
    #[arg(long = "no-csv")]
    no_csv: bool,

    /// Also write the records as a JSON array to this path.
    #[arg(long = "json", value_name = "PATH")]
    json: Option<PathBuf>,

    /// Do not fail if a log has an UNKNOWN result.
    #[arg(long = "allow-unknown")]
    allow_unknown: bool,

    /// Print the extracted result line per scenario.
    #[arg(long = "debug-lines")]
    debug_lines: bool,

    /// Config file (default: platform config directory / config.toml).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    // Config is read before logging so its [logging] level can apply.
    let config_path = cli.config.clone().or_else(config::default_config_path);
    let (file_config, config_warnings) = match config_path {
        Some(path) => config::load_config(&path),
        None => (FileConfig::default(), Vec::new()),
    };

    util::logging::init(cli.debug, file_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        "SimVerdict starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Config warning");
    }

    let overrides = CliOverrides {
        patterns: cli.patterns,
        csv_path: cli.csv,
        no_csv: cli.no_csv,
        json_path: cli.json,
        allow_unknown: cli.allow_unknown,
        debug_lines: cli.debug_lines,
    };
    let summary_config = SummaryConfig::resolve(overrides, file_config);
    tracing::debug!(config = ?summary_config, "Summary configuration resolved");

    let result = {
        let mut out = std::io::stdout().lock();
        summarize::run(&summary_config, &mut out)
    };
    let code = match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Summary failed");
            eprintln!("Error: {e}");
            util::constants::EXIT_FAILED
        }
    };

    std::process::exit(code);
}
