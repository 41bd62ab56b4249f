use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::ordered::OrderedMap;
use crate::model::plots::PlotsBySample;
use crate::model::report::ReportTable;
use crate::pipeline::stage4_classify::Stage4Output;
use crate::report::html::{DETAILS_PAGE, INDEX_PAGE, render_index, render_sample_details};
use crate::report::json::{SampleSummary, SummaryData, render_summary_json};
use crate::report::median;
use crate::report::tsv::write_results_tsv;
use crate::report::zip::write_plots_zip;

pub const RESULTS_TSV: &str = "results.tsv";
pub const SUMMARY_JSON: &str = "summary.json";
pub const PLOTS_ZIP: &str = "checkm_plots.zip";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Stage6Input<'a> {
    pub table: &'a ReportTable,
    pub classification: &'a Stage4Output,
    pub samples: &'a [String],
    pub plots: Option<&'a PlotsBySample>,
    pub mode: &'a str,
    pub write_zip: bool,
    pub tool_name: String,
    pub tool_version: String,
}

#[derive(Debug, Clone)]
pub struct Stage6Output {
    pub results_path: PathBuf,
    pub summary_path: PathBuf,
    pub index_path: PathBuf,
    pub details_path: PathBuf,
    pub zip_path: Option<PathBuf>,
    pub summary: SummaryData,
}

pub fn write_outputs(input: &Stage6Input<'_>, out_dir: &Path) -> Result<Stage6Output, ReportError> {
    fs::create_dir_all(out_dir)?;

    let results_path = out_dir.join(RESULTS_TSV);
    write_results_tsv(
        &results_path,
        input.table,
        &input.classification.categories,
    )?;

    let mut zip_path = None;
    if input.write_zip {
        if let Some(plots) = input.plots {
            let path = out_dir.join(PLOTS_ZIP);
            if let Some(n) = write_plots_zip(plots, &path)? {
                tracing::info!("packed {} plot files into {}", n, path.display());
                zip_path = Some(path);
            }
        }
    }

    let summary = build_summary(input, zip_path.is_some());
    let summary_path = out_dir.join(SUMMARY_JSON);
    write_text(&summary_path, &render_summary_json(&summary)?)?;

    let index_path = out_dir.join(INDEX_PAGE);
    write_text(&index_path, &render_index(&summary))?;

    let details_path = out_dir.join(DETAILS_PAGE);
    write_text(
        &details_path,
        &render_sample_details(&summary, input.table, &input.classification.categories),
    )?;

    Ok(Stage6Output {
        results_path,
        summary_path,
        index_path,
        details_path,
        zip_path,
        summary,
    })
}

pub fn build_summary(input: &Stage6Input<'_>, has_zip: bool) -> SummaryData {
    let mut per_sample = OrderedMap::new();
    for sample in input.samples {
        let rows: Vec<_> = input.table.rows_for_sample(sample).collect();
        let completeness: Vec<f64> = rows.iter().map(|r| r.completeness()).collect();
        let contamination: Vec<f64> = rows.iter().map(|r| r.contamination()).collect();
        let categories = input
            .classification
            .per_sample
            .get(sample)
            .copied()
            .unwrap_or_default();
        let plot_kinds = input
            .plots
            .and_then(|p| p.get(sample))
            .map(|kinds| kinds.keys().map(str::to_string).collect())
            .unwrap_or_default();
        per_sample.insert(
            sample.clone(),
            SampleSummary {
                n_bins: rows.len(),
                categories,
                completeness_median: median(&completeness),
                contamination_median: median(&contamination),
                plot_kinds,
            },
        );
    }

    SummaryData {
        tool: input.tool_name.clone(),
        version: input.tool_version.clone(),
        mode: input.mode.to_string(),
        samples: input.samples.to_vec(),
        n_bins: input.table.len(),
        categories: input.classification.totals,
        per_sample,
        results_table: RESULTS_TSV.to_string(),
        plots_archive: has_zip.then(|| PLOTS_ZIP.to_string()),
    }
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage6_report.rs"]
mod tests;
