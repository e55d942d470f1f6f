// SimVerdict - core/discovery.rs
//
// Expansion of shell-style glob patterns into the set of logs to classify.
//
// Patterns may overlap; the result is de-duplicated and sorted so repeated
// runs over the same tree produce identical reports. `**` descends
// recursively. Hidden files are only matched by patterns that name the
// leading dot explicitly.
//
// Invalid patterns and unreadable directory entries are non-fatal: they are
// logged and skipped. Only an empty overall result is an error.

use crate::util::error::DiscoveryError;
use glob::MatchOptions;
use std::collections::BTreeMap;
use std::path::PathBuf;

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    }
}

/// Expand `patterns` into a sorted, de-duplicated list of regular files.
///
/// Paths are ordered by their string form, so `a-b/x.log` sorts before
/// `a/x.log`.
///
/// Returns `DiscoveryError::NoMatches` when nothing matched, so the caller
/// can abort before producing any output.
pub fn find_logs(patterns: &[String]) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut found: BTreeMap<String, PathBuf> = BTreeMap::new();

    for pattern in patterns {
        let paths = match glob::glob_with(pattern, match_options()) {
            Ok(paths) => paths,
            Err(source) => {
                let err = DiscoveryError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                };
                tracing::warn!(error = %err, "Skipping pattern");
                continue;
            }
        };

        let before = found.len();
        for entry in paths {
            match entry {
                Ok(path) if path.is_file() => {
                    found.insert(path.to_string_lossy().into_owned(), path);
                }
                Ok(path) => {
                    tracing::trace!(path = %path.display(), "Skipping non-file match");
                }
                Err(e) => {
                    tracing::warn!(
                        path = %e.path().display(),
                        error = %e.error(),
                        "Cannot read directory entry during glob expansion"
                    );
                }
            }
        }
        tracing::debug!(pattern = %pattern, new = found.len() - before, "Pattern expanded");
    }

    if found.is_empty() {
        return Err(DiscoveryError::NoMatches {
            patterns: patterns.to_vec(),
        });
    }

    tracing::info!(files = found.len(), patterns = patterns.len(), "Discovery complete");
    Ok(found.into_values().collect())
}

// =============================================================================
// Tests
// =============================================================================
