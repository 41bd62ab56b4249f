use std::path::PathBuf;

use crate::input::InputError;
use crate::input::report::parse_single_report;
use crate::model::ordered::OrderedMap;
use crate::model::report::ReportTable;

/// Parses every sample's report in map order and concatenates the rows.
/// The first failing sample aborts the aggregation; an empty map yields an
/// empty table.
pub fn parse_reports(reports: &OrderedMap<PathBuf>) -> Result<ReportTable, InputError> {
    let mut table = ReportTable::default();
    for (sample_id, path) in reports.iter() {
        let sample_table = parse_single_report(sample_id, path)?;
        tracing::info!(
            "parsed {} bins for sample {}",
            sample_table.len(),
            sample_id
        );
        table.append(sample_table);
    }
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
