// SimVerdict - tests/e2e_summarize.rs
//
// End-to-end tests for the summarize pipeline.
//
// These tests exercise the real filesystem, real glob expansion, real
// decoding, and real CSV/JSON output. The on-disk fixtures are captured
// Questa-style transcripts, including one written by PowerShell Tee-Object
// as UTF-16LE.

use simverdict::app::summarize::{self, SummaryConfig};
use simverdict::core::classifier;
use simverdict::core::model::{RunRecord, Verdict, VerdictSource};
use simverdict::platform::fs::{read_log, TextEncoding};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Helpers
// =============================================================================

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

fn config_for(patterns: Vec<String>, out_dir: &Path) -> SummaryConfig {
    SummaryConfig {
        patterns,
        csv_path: Some(out_dir.join("result").join("summary.csv")),
        json_path: None,
        allow_unknown: false,
        debug_lines: false,
    }
}

fn by_scenario<'a>(records: &'a [RunRecord], scenario: &str) -> &'a RunRecord {
    records
        .iter()
        .find(|r| r.scenario == scenario)
        .unwrap_or_else(|| panic!("no record for scenario {scenario}"))
}

// =============================================================================
// Fixture classification
// =============================================================================

#[test]
fn e2e_fixture_batch_classification() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = config_for(
        vec![format!("{}/*.log", fixtures_dir().display())],
        out_dir.path(),
    );

    let mut out = Vec::new();
    let summary = summarize::summarize(&config, &mut out).unwrap();
    let records = &summary.records;

    let scenarios: Vec<&str> = records.iter().map(|r| r.scenario.as_str()).collect();
    assert_eq!(
        scenarios,
        vec![
            "assert_fire",
            "axi_burst",
            "crashed",
            "legacy_scb",
            "smoke_only",
            "tee_capture"
        ],
        "records should follow sorted path order"
    );

    let axi = by_scenario(records, "axi_burst");
    assert_eq!(axi.verdict, Verdict::Pass);
    assert_eq!(axi.source, VerdictSource::TestTag);
    assert_eq!(axi.seed, Some(1717));
    assert_eq!(axi.transfers, Some(64));
    assert_eq!(axi.errors, Some(0));
    assert_eq!((axi.sim_errors, axi.sim_warnings), (Some(0), Some(1)));

    let fired = by_scenario(records, "assert_fire");
    assert_eq!(fired.verdict, Verdict::Fail);
    assert_eq!(fired.source, VerdictSource::Simulator);
    assert_eq!(fired.matched_line, "# Errors: 1, Warnings: 0 (override)");
    assert_eq!(fired.seed, Some(42));
    assert_eq!(fired.transfers, None);

    let scb = by_scenario(records, "legacy_scb");
    assert_eq!(scb.verdict, Verdict::Fail);
    assert_eq!(scb.source, VerdictSource::Scoreboard);
    assert_eq!(scb.matched_line, "# [SCB] TEST FAILED errors=1");
    assert_eq!(scb.errors, Some(1));

    let smoke = by_scenario(records, "smoke_only");
    assert_eq!(smoke.verdict, Verdict::Pass);
    assert_eq!(smoke.source, VerdictSource::Simulator);
    assert_eq!(smoke.sim_warnings, Some(2), "last summary line wins");

    let crashed = by_scenario(records, "crashed");
    assert_eq!(crashed.verdict, Verdict::Unknown);
    assert_eq!(crashed.source, VerdictSource::Unknown);
    assert!(crashed.matched_line.is_empty());

    let tee = by_scenario(records, "tee_capture");
    assert_eq!(tee.verdict, Verdict::Pass);
    assert_eq!(tee.seed, Some(9));
    assert_eq!(tee.transfers, Some(16));

    assert_eq!(
        (
            summary.totals.total,
            summary.totals.pass,
            summary.totals.fail,
            summary.totals.unknown
        ),
        (6, 3, 2, 1)
    );
    assert_eq!(summary.exit_code, 1);

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("=== SUMMARY ==="));
    assert!(report.contains("TOTAL=6  PASS=3  FAIL=2  UNKNOWN=1"));
    assert!(report.contains("CSV written: "));
}

#[test]
fn e2e_utf16_log_matches_utf8_equivalent() {
    let path = fixture("tee_capture.log");
    let decoded = read_log(&path).unwrap();
    assert_eq!(decoded.encoding, TextEncoding::Utf16LeBom);

    let utf8_text = "=== Run scenario: tee_capture ===\r\nSEED: 9\r\n\
                     # [TEST] RESULT=PASS transfers=16\r\n# Errors: 0, Warnings: 0\r\n";
    assert_eq!(decoded.text, utf8_text);
    assert_eq!(
        classifier::classify(&decoded.text, &path),
        classifier::classify(utf8_text, &path)
    );
}

// =============================================================================
// Exit codes and outputs
// =============================================================================

#[test]
fn e2e_one_pass_one_fail_exits_1() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = config_for(
        vec![
            fixture("axi_burst.log").display().to_string(),
            fixture("legacy_scb.log").display().to_string(),
        ],
        out_dir.path(),
    );
    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 1);
}

#[test]
fn e2e_all_pass_exits_0() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = config_for(
        vec![
            fixture("axi_burst.log").display().to_string(),
            fixture("smoke_only.log").display().to_string(),
        ],
        out_dir.path(),
    );
    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 0);
}

#[test]
fn e2e_unknown_tolerated_only_when_allowed() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut config = config_for(
        vec![
            fixture("axi_burst.log").display().to_string(),
            fixture("crashed.log").display().to_string(),
        ],
        out_dir.path(),
    );
    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 1);

    config.allow_unknown = true;
    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 0);
}

#[test]
fn e2e_no_matching_logs_exits_2_without_output() {
    let out_dir = tempfile::tempdir().unwrap();
    let config = config_for(
        vec![format!("{}/*.wlf", fixtures_dir().display())],
        out_dir.path(),
    );
    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 2);

    let report = String::from_utf8(out).unwrap();
    assert!(report.starts_with("ERROR: No logs found."));
    assert!(!report.contains("=== SUMMARY ==="));
    assert!(!out_dir.path().join("result").exists(), "no CSV on discovery failure");
}

#[test]
fn e2e_overlapping_patterns_classify_each_file_once() {
    let out_dir = tempfile::tempdir().unwrap();
    let dir = fixtures_dir().display().to_string();
    let config = config_for(
        vec![
            format!("{dir}/*.log"),
            format!("{dir}/a*.log"),
            fixture("crashed.log").display().to_string(),
        ],
        out_dir.path(),
    );
    let mut out = Vec::new();
    let summary = summarize::summarize(&config, &mut out).unwrap();
    assert_eq!(summary.records.len(), 6);
}

#[test]
fn e2e_csv_and_json_written() {
    let out_dir = tempfile::tempdir().unwrap();
    let mut config = config_for(
        vec![fixture("assert_fire.log").display().to_string()],
        out_dir.path(),
    );
    let json_path = out_dir.path().join("out").join("records.json");
    config.json_path = Some(json_path.clone());
    config.debug_lines = true;

    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 1);

    let csv = fs::read_to_string(out_dir.path().join("result").join("summary.csv")).unwrap();
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("scenario,result,result_source,seed"));
    let row = lines.next().unwrap();
    assert!(
        row.starts_with("assert_fire,FAIL,QUESTA,42,,,1,0,"),
        "row: {row}"
    );
    // The synthesised line contains commas, so it is quoted.
    assert!(
        row.ends_with("\"# Errors: 1, Warnings: 0 (override)\""),
        "row: {row}"
    );
    assert!(lines.next().is_none());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json[0]["scenario"], "assert_fire");
    assert_eq!(json[0]["result"], "FAIL");
    assert_eq!(json[0]["questa_errors"], 1);

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("JSON written: "));
    assert!(report.contains("assert_fire (QUESTA): # Errors: 1, Warnings: 0 (override)"));
}

#[test]
fn e2e_unwritable_csv_fails_run() {
    let out_dir = tempfile::tempdir().unwrap();
    // A regular file where the CSV's parent directory should be.
    let blocker = out_dir.path().join("result");
    fs::write(&blocker, "not a directory").unwrap();

    let config = config_for(
        vec![fixture("axi_burst.log").display().to_string()],
        out_dir.path(),
    );
    let mut out = Vec::new();
    assert_eq!(summarize::run(&config, &mut out).unwrap(), 1);

    let report = String::from_utf8(out).unwrap();
    assert!(report.contains("=== SUMMARY ==="), "table still printed");
    assert!(report.contains("ERROR: Export I/O error"));
}
