// SimVerdict - core/model.rs
//
// Core data model types. Pure data definitions with no I/O.
//
// These types are the shared vocabulary between the classifier, the
// reporting layer, and the app pipeline.

use serde::Serialize;
use std::path::PathBuf;

// =============================================================================
// Verdict
// =============================================================================

/// Final classification of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Verdict {
    #[serde(rename = "PASS")]
    Pass,
    #[serde(rename = "FAIL")]
    Fail,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl Verdict {
    /// Label used in the table, CSV, and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass => "PASS",
            Verdict::Fail => "FAIL",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Verdict source
// =============================================================================

/// Which marker category decided the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VerdictSource {
    /// Explicit `[TEST] RESULT=...` tag emitted by the test harness.
    #[serde(rename = "TEST")]
    TestTag,

    /// Legacy `[SCB] TEST PASSED/FAILED` scoreboard line.
    #[serde(rename = "SCB")]
    Scoreboard,

    /// The simulator's own `# Errors: n, Warnings: m` summary.
    #[serde(rename = "QUESTA")]
    Simulator,

    /// No marker was found.
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl VerdictSource {
    /// Short label used in the table, CSV, and JSON output.
    pub fn label(&self) -> &'static str {
        match self {
            VerdictSource::TestTag => "TEST",
            VerdictSource::Scoreboard => "SCB",
            VerdictSource::Simulator => "QUESTA",
            VerdictSource::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Decision
// =============================================================================

/// A verdict together with the marker that produced it.
///
/// Verdict and source only ever change together, so they live in one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub verdict: Verdict,
    pub source: VerdictSource,
    /// The log line (or synthesised note) that decided the verdict.
    /// Empty when the verdict is UNKNOWN.
    pub matched_line: String,
}

impl Decision {
    pub fn new(verdict: Verdict, source: VerdictSource, matched_line: impl Into<String>) -> Self {
        Self {
            verdict,
            source,
            matched_line: matched_line.into(),
        }
    }

    /// The decision when no marker of any kind was found.
    pub fn unknown() -> Self {
        Self::new(Verdict::Unknown, VerdictSource::Unknown, String::new())
    }
}

// =============================================================================
// Simulator summary
// =============================================================================

/// Counts from the simulator's `# Errors: n, Warnings: m` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimCounts {
    pub errors: u64,
    pub warnings: u64,
}

// =============================================================================
// Run record
// =============================================================================

/// Classification result for one log file.
///
/// Built once per file by the classifier and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    /// Path of the source log, as discovered.
    #[serde(rename = "logfile")]
    pub path: PathBuf,

    /// Scenario name from the log, or the file stem when absent.
    pub scenario: String,

    /// First `SEED:` value in the log.
    pub seed: Option<u64>,

    #[serde(rename = "result")]
    pub verdict: Verdict,

    #[serde(rename = "result_source")]
    pub source: VerdictSource,

    /// Line that decided the verdict, kept for traceability.
    #[serde(rename = "result_line")]
    pub matched_line: String,

    /// `transfers=` counter from the matched line.
    pub transfers: Option<u64>,

    /// `errors=` counter from the matched line.
    pub errors: Option<u64>,

    /// Error count from the last simulator summary line.
    #[serde(rename = "questa_errors")]
    pub sim_errors: Option<u64>,

    /// Warning count from the last simulator summary line.
    #[serde(rename = "questa_warnings")]
    pub sim_warnings: Option<u64>,
}

// =============================================================================
// Totals
// =============================================================================

/// Aggregate verdict counts over a batch of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: usize,
    pub pass: usize,
    pub fail: usize,
    pub unknown: usize,
}

impl Totals {
    pub fn from_records(records: &[RunRecord]) -> Self {
        records.iter().fold(Self::default(), |mut t, r| {
            t.total += 1;
            match r.verdict {
                Verdict::Pass => t.pass += 1,
                Verdict::Fail => t.fail += 1,
                Verdict::Unknown => t.unknown += 1,
            }
            t
        })
    }
}

impl std::fmt::Display for Totals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TOTAL={}  PASS={}  FAIL={}  UNKNOWN={}",
            self.total, self.pass, self.fail, self.unknown
        )
    }
}
