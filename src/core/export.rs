// SimVerdict - core/export.rs
//
// CSV and JSON export of run records.
// Core layer: writes to any Write trait object.

use crate::core::model::RunRecord;
use crate::util::constants::CSV_HEADERS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV, one row per log. Absent optional values are
/// written as empty cells.
///
/// Writes: scenario, result, result_source, seed, transfers, errors,
/// questa_errors, questa_warnings, logfile, result_line
pub fn export_csv<W: Write>(
    records: &[RunRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(CSV_HEADERS).map_err(csv_err)?;

    let mut count = 0;
    for r in records {
        let (seed, transfers, errors) = (opt(r.seed), opt(r.transfers), opt(r.errors));
        let (sim_errors, sim_warnings) = (opt(r.sim_errors), opt(r.sim_warnings));
        let logfile = r.path.display().to_string();
        let row: [&str; 10] = [
            &r.scenario,
            r.verdict.label(),
            r.source.label(),
            &seed,
            &transfers,
            &errors,
            &sim_errors,
            &sim_warnings,
            &logfile,
            &r.matched_line,
        ];
        csv_writer.write_record(row).map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export records as a pretty-printed JSON array.
pub fn export_json<W: Write>(
    records: &[RunRecord],
    mut writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    serde_json::to_writer_pretty(&mut writer, records).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(records.len())
}

fn opt(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
