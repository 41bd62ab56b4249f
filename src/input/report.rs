use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use crate::input::literal::{Literal, parse_literal};
use crate::input::{InputError, open_maybe_gz};
use crate::model::report::{CellValue, ReportRow, ReportTable, raw_key_index};

/// Parses one `bin_stats_ext.tsv` into rows tagged with `sample_id`.
///
/// Each non-blank line is `bin_id<TAB>{literal mapping}`. Keys missing from
/// the rename table are dropped, schema keys absent from a bin stay empty.
pub fn parse_single_report(sample_id: &str, path: &Path) -> Result<ReportTable, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut buf = String::new();
    let mut rows = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != 2 {
            return Err(decode_error(
                path,
                line_no,
                format!("expected 2 tab-separated fields, found {}", fields.len()),
            ));
        }
        let bin_id = fields[0];

        let stats = parse_literal(fields[1])
            .map_err(|e| decode_error(path, line_no, e.to_string()))?;
        let Literal::Map(entries) = stats else {
            return Err(decode_error(
                path,
                line_no,
                "bin statistics are not a mapping".to_string(),
            ));
        };

        if !seen.insert(bin_id.to_string()) {
            return Err(decode_error(
                path,
                line_no,
                format!("duplicate bin '{bin_id}'"),
            ));
        }

        rows.push(build_row(sample_id, bin_id, &entries));
    }

    tracing::debug!(
        sample = sample_id,
        bins = rows.len(),
        path = %path.display(),
        "parsed CheckM report"
    );

    Ok(ReportTable { rows })
}

fn build_row(sample_id: &str, bin_id: &str, entries: &[(Literal, Literal)]) -> ReportRow {
    let mut row = ReportRow::empty(sample_id, bin_id);
    for (key, value) in entries {
        let Some(key) = key.as_key() else {
            continue;
        };
        if let Some(idx) = raw_key_index(&key) {
            row.values[idx] = cell_from_literal(value);
        }
    }
    row
}

fn cell_from_literal(value: &Literal) -> CellValue {
    match value {
        Literal::None => CellValue::Missing,
        Literal::Int(v) => CellValue::Int(*v),
        Literal::Float(v) => CellValue::Float(*v),
        Literal::Str(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_repr()),
    }
}

fn decode_error(path: &Path, line: usize, reason: String) -> InputError {
    InputError::Decode {
        path: path.to_path_buf(),
        line,
        reason,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/report.rs"]
mod tests;
