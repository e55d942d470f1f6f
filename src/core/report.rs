// SimVerdict - core/report.rs
//
// Human-readable summary table and exit status computation.
// Core layer: writes to any Write trait object.

use crate::core::model::{RunRecord, Totals, Verdict};
use crate::util::constants::{
    EXIT_FAILED, EXIT_OK, TABLE_COLUMN_WIDTHS, TABLE_HEADERS, TABLE_RULE_WIDTH,
};
use std::io::{self, Write};

/// Write the fixed-width summary table followed by the verdict totals.
pub fn write_table<W: Write>(records: &[RunRecord], mut out: W) -> io::Result<Totals> {
    let rule = "-".repeat(TABLE_RULE_WIDTH);

    writeln!(out, "=== SUMMARY ===")?;
    writeln!(out, "{}", format_row(&TABLE_HEADERS.map(|h| h.to_string())))?;
    writeln!(out, "{rule}")?;
    for record in records {
        writeln!(out, "{}", format_row(&table_cells(record)))?;
    }
    writeln!(out, "{rule}")?;

    let totals = Totals::from_records(records);
    writeln!(out, "{totals}")?;
    Ok(totals)
}

/// Write the line that decided each record, one per scenario.
pub fn write_debug_lines<W: Write>(records: &[RunRecord], mut out: W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== DEBUG: RESULT LINE ===")?;
    for r in records {
        writeln!(out, "{} ({}): {}", r.scenario, r.source, r.matched_line)?;
    }
    Ok(())
}

/// Process exit status for a batch of records.
///
/// Any FAIL fails the run. UNKNOWN fails it too unless `allow_unknown`.
pub fn exit_code(records: &[RunRecord], allow_unknown: bool) -> i32 {
    let any_fail = records.iter().any(|r| r.verdict == Verdict::Fail);
    let any_unknown = records.iter().any(|r| r.verdict == Verdict::Unknown);

    if any_fail || (any_unknown && !allow_unknown) {
        EXIT_FAILED
    } else {
        EXIT_OK
    }
}

fn table_cells(r: &RunRecord) -> [String; 9] {
    [
        r.scenario.clone(),
        r.verdict.label().to_string(),
        r.source.label().to_string(),
        opt(r.seed),
        opt(r.transfers),
        opt(r.errors),
        opt(r.sim_errors),
        opt(r.sim_warnings),
        r.path.display().to_string(),
    ]
}

fn opt(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Truncate and pad every column to its width; the last column is free.
fn format_row(cells: &[String; 9]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| match TABLE_COLUMN_WIDTHS.get(i) {
            Some(&width) => {
                let truncated: String = cell.chars().take(width).collect();
                format!("{truncated:<width$}")
            }
            None => cell.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::VerdictSource;
    use std::path::PathBuf;

    fn make_record(scenario: &str, verdict: Verdict) -> RunRecord {
        RunRecord {
            path: PathBuf::from(format!("log/{scenario}.log")),
            scenario: scenario.to_string(),
            seed: Some(1234),
            verdict,
            source: VerdictSource::TestTag,
            matched_line: "# [TEST] RESULT=PASS".to_string(),
            transfers: Some(8),
            errors: None,
            sim_errors: Some(0),
            sim_warnings: Some(2),
        }
    }

    #[test]
    fn test_table_layout() {
        let records = vec![make_record("uart_tx", Verdict::Pass)];
        let mut buf = Vec::new();
        let totals = write_table(&records, &mut buf).unwrap();
        assert_eq!(totals.pass, 1);

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "=== SUMMARY ===");
        assert!(lines[1].starts_with("SCENARIO             RESULT   SRC    SEED   TRANSFERS  ERRS"));
        assert_eq!(lines[2], "-".repeat(120));
        assert_eq!(
            lines[3],
            "uart_tx              PASS     TEST   1234   8                 0      2      log/uart_tx.log"
        );
        assert_eq!(lines[5], "TOTAL=1  PASS=1  FAIL=0  UNKNOWN=0");
    }

    #[test]
    fn test_long_scenario_is_truncated() {
        let records = vec![make_record("a_really_long_scenario_name_here", Verdict::Fail)];
        let mut buf = Vec::new();
        write_table(&records, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let row = output.lines().nth(3).unwrap();
        assert!(row.starts_with("a_really_long_scenar FAIL"), "row: {row}");
    }

    #[test]
    fn test_debug_lines() {
        let records = vec![make_record("spi", Verdict::Pass)];
        let mut buf = Vec::new();
        write_debug_lines(&records, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        assert!(output.contains("=== DEBUG: RESULT LINE ==="));
        assert!(output.contains("spi (TEST): # [TEST] RESULT=PASS"));
    }

    #[test]
    fn test_exit_code_rules() {
        let pass = make_record("p", Verdict::Pass);
        let fail = make_record("f", Verdict::Fail);
        let unknown = make_record("u", Verdict::Unknown);

        assert_eq!(exit_code(&[pass.clone()], false), 0);
        assert_eq!(exit_code(&[pass.clone(), fail.clone()], false), 1);
        assert_eq!(exit_code(&[pass.clone(), unknown.clone()], false), 1);
        assert_eq!(exit_code(&[pass, unknown.clone()], true), 0);
        assert_eq!(exit_code(&[fail, unknown], true), 1);
    }
}
