// SimVerdict - util/logging.rs
//
// tracing subscriber setup for the CLI. Diagnostics go to stderr; stdout
// carries only the summary report, so a CI job can capture it unchanged.
//
// Level sources, strongest first: RUST_LOG, `--debug`, `[logging] level`
// in config.toml, then the built-in default.

use crate::util::constants::{APP_NAME, APP_VERSION, DEFAULT_LOG_LEVEL};
use tracing_subscriber::EnvFilter;

/// Filter directive to install, or `None` when RUST_LOG is set and should be
/// parsed as-is.
fn directive<'a>(
    rust_log_set: bool,
    debug_flag: bool,
    config_level: Option<&'a str>,
) -> Option<&'a str> {
    if rust_log_set {
        None
    } else if debug_flag {
        Some("debug")
    } else {
        Some(config_level.unwrap_or(DEFAULT_LOG_LEVEL))
    }
}

/// Install the global subscriber. Call once, before any other tracing.
pub fn init(debug_flag: bool, config_level: Option<&str>) {
    let rust_log_set = std::env::var_os(EnvFilter::DEFAULT_ENV).is_some();
    let filter = match directive(rust_log_set, debug_flag, config_level) {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::from_default_env(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();

    tracing::debug!(app = APP_NAME, version = APP_VERSION, "Logging ready");
}
