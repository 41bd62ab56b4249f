use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::quality::QualityCategory;
use crate::model::report::ReportTable;

pub const QC_CATEGORY_COLUMN: &str = "qc_category";

/// Writes the aggregated table plus the category column. `categories` is
/// aligned with `table.rows`.
pub fn write_results_tsv(
    path: &Path,
    table: &ReportTable,
    categories: &[QualityCategory],
) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    let mut header = ReportTable::columns();
    header.push(QC_CATEGORY_COLUMN);
    writeln!(w, "{}", header.join("\t"))?;

    for (row, category) in table.rows.iter().zip(categories) {
        let mut cells: Vec<String> = row.cells().iter().map(|c| escape_field(c)).collect();
        cells.push(category.as_str().to_string());
        writeln!(w, "{}", cells.join("\t"))?;
    }

    w.flush()
}

/// Backslash-escapes characters that would break the row/column layout.
pub fn escape_field(value: &str) -> String {
    if !value.contains(['\\', '\t', '\n', '\r']) {
        return value.to_string();
    }
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/tsv.rs"]
mod tests;
