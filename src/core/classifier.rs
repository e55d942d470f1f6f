// SimVerdict - core/classifier.rs
//
// Turns the decoded text of one simulation log into a `RunRecord`.
// Core layer: pure functions over `&str`, never touches the filesystem.
//
// Marker precedence, highest first:
//   1. `[TEST] RESULT=FAIL` / `[TEST] RESULT=PASS`
//   2. `[SCB] TEST FAILED` / `[SCB] TEST PASSED`
//   3. the simulator's `# Errors: n, Warnings: m` summary (heuristic)
// Within a category the LAST matching line wins. The seed is the one field
// that takes the FIRST match. Afterwards, a nonzero simulator error count
// forces FAIL no matter what the harness claimed.
//
// Every function here is total: missing or malformed markers degrade to
// `None` or an UNKNOWN verdict, never to an error.

use crate::core::model::{Decision, RunRecord, SimCounts, Verdict, VerdictSource};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Tag token of the harness's explicit result line.
const TEST_TAG: &str = "[TEST]";

/// Tag token of the legacy scoreboard result line.
const SCOREBOARD_TAG: &str = "[SCB]";

// =============================================================================
// Patterns
// =============================================================================

struct Patterns {
    scenario_header: Regex,
    scenario_alt: Regex,
    seed: Regex,
    sim_summary: Regex,
    test_pass: Regex,
    test_fail: Regex,
    scb_pass: Regex,
    scb_fail: Regex,
    transfers: Regex,
    errors_kv: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();

    PATTERNS.get_or_init(|| {
        // Every pattern is a literal exercised by the unit tests below, so a
        // typo fails a test instead of panicking in the field.
        fn re(pat: &str) -> Regex {
            Regex::new(pat).expect("classifier: invalid regex")
        }

        Patterns {
            scenario_header: re(r"(?m)^===\s*Run scenario:\s*(\S+)\s*==="),
            scenario_alt: re(r"(?m)^\s*SCENARIO\s*[:=]\s*(\S+)\s*$"),
            seed: re(r"(?m)^\s*SEED\s*[:=]\s*([0-9]+)\s*$"),
            sim_summary: re(r"(?m)^#\s*Errors:\s*([0-9]+),\s*Warnings:\s*([0-9]+)\s*$"),
            test_pass: re(r"(?i)\[TEST\].*\bRESULT\s*=\s*PASS\b"),
            test_fail: re(r"(?i)\[TEST\].*\bRESULT\s*=\s*FAIL\b"),
            scb_pass: re(r"(?i)\[SCB\].*TEST\s+PASSED"),
            scb_fail: re(r"(?i)\[SCB\].*TEST\s+FAILED"),
            transfers: re(r"(?i)\btransfers\s*=\s*([0-9]+)\b"),
            errors_kv: re(r"(?i)\berrors\s*=\s*([0-9]+)\b"),
        }
    })
}

// =============================================================================
// Entry point
// =============================================================================

/// Classify the full text of the log at `path`.
///
/// `path` is only used for the record itself and for the scenario fallback
/// (the file stem); nothing is read from disk.
pub fn classify(text: &str, path: &Path) -> RunRecord {
    let scenario = extract_scenario(text).unwrap_or_else(|| file_stem(path));
    let seed = extract_seed(text);
    let sim = last_sim_counts(text);

    let decision = apply_override(resolve_verdict(text, sim), sim);

    let (transfers, errors) = if decision.matched_line.is_empty() {
        (None, None)
    } else {
        (
            first_capture_u64(&patterns().transfers, &decision.matched_line),
            first_capture_u64(&patterns().errors_kv, &decision.matched_line),
        )
    };

    tracing::trace!(
        file = %path.display(),
        scenario = %scenario,
        verdict = %decision.verdict,
        source = %decision.source,
        "Log classified"
    );

    RunRecord {
        path: path.to_path_buf(),
        scenario,
        seed,
        verdict: decision.verdict,
        source: decision.source,
        matched_line: decision.matched_line,
        transfers,
        errors,
        sim_errors: sim.map(|c| c.errors),
        sim_warnings: sim.map(|c| c.warnings),
    }
}

// =============================================================================
// Field extraction
// =============================================================================

/// Scenario name from `=== Run scenario: X ===`, else from `SCENARIO: X`.
pub fn extract_scenario(text: &str) -> Option<String> {
    let p = patterns();
    p.scenario_header
        .captures(text)
        .or_else(|| p.scenario_alt.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// The FIRST `SEED: n` line in the text.
pub fn extract_seed(text: &str) -> Option<u64> {
    first_capture_u64(&patterns().seed, text)
}

/// Counts from the LAST `# Errors: n, Warnings: m` line. Simulators print
/// interim summaries before the final one.
///
/// A count too large for `u64` saturates rather than dropping the summary,
/// so an absurd error count still triggers the override.
pub fn last_sim_counts(text: &str) -> Option<SimCounts> {
    let caps = patterns().sim_summary.captures_iter(text).last()?;
    Some(SimCounts {
        errors: saturating_count(caps.get(1)?.as_str()),
        warnings: saturating_count(caps.get(2)?.as_str()),
    })
}

/// Parse an all-digit capture, clamping overflow to `u64::MAX`.
fn saturating_count(digits: &str) -> u64 {
    digits.parse().unwrap_or(u64::MAX)
}

/// Base name of `path` without its extension.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn first_capture_u64(re: &Regex, haystack: &str) -> Option<u64> {
    re.captures(haystack)?.get(1)?.as_str().parse().ok()
}

// =============================================================================
// Verdict resolution
// =============================================================================

/// Characters that end a line besides `\n`. Console captures redraw progress
/// output with a bare `\r`, so each redraw is its own line.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split `text` into lines on every break in `LINE_BREAKS`, with `\r\n`
/// counted as a single break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(LINE_BREAKS))
}

/// Last line seen for each result marker category.
#[derive(Debug, Default)]
struct LastSeen<'a> {
    test_pass: Option<&'a str>,
    test_fail: Option<&'a str>,
    scb_pass: Option<&'a str>,
    scb_fail: Option<&'a str>,
}

impl<'a> LastSeen<'a> {
    fn scan(text: &'a str) -> Self {
        let p = patterns();
        let mut seen = Self::default();

        // A single line may match both outcomes of a category; both update.
        for line in split_lines(text) {
            if line.contains(TEST_TAG) {
                if p.test_pass.is_match(line) {
                    seen.test_pass = Some(line);
                }
                if p.test_fail.is_match(line) {
                    seen.test_fail = Some(line);
                }
            }
            if line.contains(SCOREBOARD_TAG) {
                if p.scb_pass.is_match(line) {
                    seen.scb_pass = Some(line);
                }
                if p.scb_fail.is_match(line) {
                    seen.scb_fail = Some(line);
                }
            }
        }
        seen
    }
}

/// Decide the verdict from the harness markers, falling back to the
/// simulator summary `sim` when no marker is present.
///
/// The simulator fallback only proves the absence of simulator-level faults:
/// a run with zero errors passes even if the test checks nothing.
pub fn resolve_verdict(text: &str, sim: Option<SimCounts>) -> Decision {
    let seen = LastSeen::scan(text);

    let tagged = [
        (seen.test_fail, Verdict::Fail, VerdictSource::TestTag),
        (seen.test_pass, Verdict::Pass, VerdictSource::TestTag),
        (seen.scb_fail, Verdict::Fail, VerdictSource::Scoreboard),
        (seen.scb_pass, Verdict::Pass, VerdictSource::Scoreboard),
    ];
    if let Some((line, verdict, source)) = tagged
        .into_iter()
        .find_map(|(line, v, s)| line.map(|l| (l, v, s)))
    {
        return Decision::new(verdict, source, line);
    }

    match sim {
        Some(counts) => {
            let verdict = if counts.errors > 0 {
                Verdict::Fail
            } else {
                Verdict::Pass
            };
            Decision::new(
                verdict,
                VerdictSource::Simulator,
                format!("# Errors: {} (heuristic)", counts.errors),
            )
        }
        None => Decision::unknown(),
    }
}

/// Force FAIL when the simulator reported errors. An existing FAIL keeps its
/// source and line.
pub fn apply_override(decision: Decision, sim: Option<SimCounts>) -> Decision {
    match sim {
        Some(counts) if counts.errors > 0 && decision.verdict != Verdict::Fail => {
            tracing::debug!(
                previous = %decision.verdict,
                previous_source = %decision.source,
                sim_errors = counts.errors,
                "Simulator errors override harness verdict"
            );
            Decision::new(
                Verdict::Fail,
                VerdictSource::Simulator,
                format!(
                    "# Errors: {}, Warnings: {} (override)",
                    counts.errors, counts.warnings
                ),
            )
        }
        _ => decision,
    }
}

// =============================================================================
// Tests
// =============================================================================
