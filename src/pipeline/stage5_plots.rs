use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::ordered::OrderedMap;
use crate::model::plots::{PlotsByKind, PlotsBySample};

#[derive(Debug, Error, PartialEq)]
pub enum PlotError {
    #[error(
        "All plot types need to have the same set of samples. Sample counts were: [{}].",
        join_counts(.counts)
    )]
    SampleMismatch { counts: Vec<usize> },
}

fn join_counts(counts: &[usize]) -> String {
    counts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Turns plot kind -> sample -> dir into sample -> plot kind -> dir.
///
/// Every plot kind must cover exactly the same samples as the first one.
/// Samples appear in the order they are first met while walking the input.
pub fn plots_per_sample(all_plots: &PlotsByKind) -> Result<PlotsBySample, PlotError> {
    let sample_sets: Vec<BTreeSet<&str>> = all_plots
        .values()
        .map(|samples| samples.keys().collect())
        .collect();
    if let Some(first) = sample_sets.first() {
        if sample_sets.iter().any(|set| set != first) {
            return Err(PlotError::SampleMismatch {
                counts: all_plots.values().map(OrderedMap::len).collect(),
            });
        }
    }

    let mut out = PlotsBySample::new();
    for (kind, samples) in all_plots.iter() {
        for (sample_id, dir) in samples.iter() {
            out.get_or_insert_with(sample_id, OrderedMap::new)
                .insert(kind, dir.clone());
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_plots.rs"]
mod tests;
