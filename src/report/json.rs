use serde::Serialize;

use crate::model::ordered::OrderedMap;
use crate::pipeline::stage4_classify::CategoryCounts;

#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub n_bins: usize,
    pub categories: CategoryCounts,
    pub completeness_median: Option<f64>,
    pub contamination_median: Option<f64>,
    pub plot_kinds: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub mode: String,
    pub samples: Vec<String>,
    pub n_bins: usize,
    pub categories: CategoryCounts,
    pub per_sample: OrderedMap<SampleSummary>,
    pub results_table: String,
    pub plots_archive: Option<String>,
}

pub fn render_summary_json(data: &SummaryData) -> serde_json::Result<String> {
    serde_json::to_string_pretty(data)
}
