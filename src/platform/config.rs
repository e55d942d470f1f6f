// SimVerdict - platform/config.rs
//
// Config file location and config.toml loading with startup validation.
//
// The config file is optional. A missing file yields defaults silently; an
// unreadable or malformed file, or an out-of-range value, yields a warning
// and the default for that value. Configuration problems never abort a run:
// a regression gate must still report verdicts.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Platform-default location of `config.toml`, if a home directory exists.
pub fn default_config_path() -> Option<PathBuf> {
    let path = ProjectDirs::from("", "", constants::APP_ID)?
        .config_dir()
        .join(constants::CONFIG_FILE_NAME);
    tracing::debug!(path = %path.display(), "Default config path resolved");
    Some(path)
}

// =============================================================================
// Raw file shape
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[summary]` section.
    pub summary: SummarySection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[summary]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct SummarySection {
    /// Glob patterns used when none are given on the command line.
    pub patterns: Option<Vec<String>>,
    /// CSV output path. An empty string disables the CSV file.
    pub csv: Option<String>,
    /// JSON output path.
    pub json: Option<String>,
    /// Do not fail the run on UNKNOWN verdicts.
    pub allow_unknown: Option<bool>,
    /// Print the deciding line per scenario.
    pub debug_lines: Option<bool>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// =============================================================================
// Validated config
// =============================================================================

/// Where the CSV summary goes, as far as the config file says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvSetting {
    /// Not mentioned in the file.
    Unset,
    /// `csv = ""`: do not write a CSV file.
    Disabled,
    /// `csv = "<path>"`.
    Path(PathBuf),
}

/// Validated values from config.toml. `None` means "not set in the file".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub patterns: Option<Vec<String>>,
    pub csv: CsvSetting,
    pub json: Option<PathBuf>,
    pub allow_unknown: Option<bool>,
    pub debug_lines: Option<bool>,
    pub log_level: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            patterns: None,
            csv: CsvSetting::Unset,
            json: None,
            allow_unknown: None,
            debug_lines: None,
            log_level: None,
        }
    }
}

/// Load and validate a config file.
///
/// Returns the validated values and a list of non-fatal warnings. Called
/// before logging is initialised, so warnings are returned rather than
/// logged.
pub fn load_config(path: &Path) -> (FileConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();

    if !path.exists() {
        return (FileConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(source) => {
            let err = ConfigError::Io {
                path: path.to_path_buf(),
                source,
            };
            warnings.push(format!("{err}. Using defaults."));
            return (FileConfig::default(), warnings);
        }
    };

    match parse_config(&content, path) {
        Ok(raw) => {
            let config = validate(raw, &mut warnings);
            (config, warnings)
        }
        Err(err) => {
            warnings.push(format!("{err}. Using defaults."));
            (FileConfig::default(), warnings)
        }
    }
}

/// Parse config.toml content without validating values.
pub fn parse_config(content: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(content).map_err(|source| ConfigError::TomlParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Check each raw value, keeping valid ones and warning about the rest.
pub fn validate(raw: RawConfig, warnings: &mut Vec<String>) -> FileConfig {
    let mut config = FileConfig::default();
    let mut reject = |field: &str, value: String, expected: &str| {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value,
            expected: expected.to_string(),
        };
        warnings.push(format!("{err}. Ignoring it."));
    };

    // -- Summary: patterns --
    if let Some(patterns) = raw.summary.patterns {
        let patterns: Vec<String> = patterns
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if patterns.is_empty() {
            reject(
                "[summary] patterns",
                "[]".to_string(),
                "at least one non-empty glob pattern",
            );
        } else {
            config.patterns = Some(patterns);
        }
    }

    // -- Summary: csv --
    if let Some(csv) = raw.summary.csv {
        let csv = csv.trim();
        config.csv = if csv.is_empty() {
            CsvSetting::Disabled
        } else {
            CsvSetting::Path(PathBuf::from(csv))
        };
    }

    // -- Summary: json --
    if let Some(json) = raw.summary.json {
        let json = json.trim();
        if json.is_empty() {
            reject("[summary] json", String::new(), "a file path");
        } else {
            config.json = Some(PathBuf::from(json));
        }
    }

    config.allow_unknown = raw.summary.allow_unknown;
    config.debug_lines = raw.summary.debug_lines;

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        let lower = level.to_lowercase();
        if constants::VALID_LOG_LEVELS.contains(&lower.as_str()) {
            config.log_level = Some(lower);
        } else {
            reject(
                "[logging] level",
                level,
                "one of error, warn, info, debug, trace",
            );
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_str(content: &str) -> (FileConfig, Vec<String>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        load_config(&path)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert_eq!(config, FileConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_full_config() {
        let (config, warnings) = load_str(
            r#"
            [summary]
            patterns = ["sim/**/*.log", "  "]
            csv = "out/verdicts.csv"
            json = "out/verdicts.json"
            allow_unknown = true
            debug_lines = false

            [logging]
            level = "DEBUG"
            "#,
        );
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
        assert_eq!(config.patterns, Some(vec!["sim/**/*.log".to_string()]));
        assert_eq!(config.csv, CsvSetting::Path(PathBuf::from("out/verdicts.csv")));
        assert_eq!(config.json, Some(PathBuf::from("out/verdicts.json")));
        assert_eq!(config.allow_unknown, Some(true));
        assert_eq!(config.debug_lines, Some(false));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_csv_disables_export() {
        let (config, _) = load_str("[summary]\ncsv = \"\"\n");
        assert_eq!(config.csv, CsvSetting::Disabled);
    }

    #[test]
    fn test_invalid_values_warn_and_fall_back() {
        let (config, warnings) = load_str(
            "[summary]\npatterns = []\n[logging]\nlevel = \"loud\"\n",
        );
        assert_eq!(config.patterns, None);
        assert_eq!(config.log_level, None);
        assert_eq!(warnings.len(), 2, "warnings: {warnings:?}");
        assert!(warnings[1].contains("loud"));
    }

    #[test]
    fn test_malformed_toml_warns() {
        let (config, warnings) = load_str("[summary\npatterns = 3");
        assert_eq!(config, FileConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let (config, warnings) = load_str("[summary]\nfuture_option = 1\n[extra]\nx = 2\n");
        assert_eq!(config, FileConfig::default());
        assert!(warnings.is_empty());
    }
}
