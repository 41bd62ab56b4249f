use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::input::InputError;
use crate::model::ordered::OrderedMap;
use crate::model::plots::{PlotKind, PlotsByKind};

#[derive(Debug, Clone, PartialEq)]
pub struct BinSample {
    pub id: String,
    pub dir: PathBuf,
    pub n_bins: usize,
}

/// Results of an earlier CheckM run laid out by [`sample_results_dir`] and
/// [`plot_dir`].
#[derive(Debug, Clone, Default)]
pub struct CheckmResults {
    pub reports: OrderedMap<PathBuf>,
    pub plots: PlotsByKind,
}

pub fn sample_results_dir(results_dir: &Path, sample_id: &str) -> PathBuf {
    results_dir.join(sample_id)
}

pub fn stats_path(sample_results: &Path) -> PathBuf {
    sample_results.join("storage").join("bin_stats_ext.tsv")
}

pub fn plot_dir(results_dir: &Path, kind: PlotKind, sample_id: &str) -> PathBuf {
    results_dir.join("plots").join(kind.as_str()).join(sample_id)
}

/// Every subdirectory of `bins_dir` holding `*.{extension}` files is one
/// sample, named after the directory. Samples come back sorted by id.
pub fn discover_bin_samples(bins_dir: &Path, extension: &str) -> Result<Vec<BinSample>, InputError> {
    if !bins_dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "bins directory {} does not exist",
            bins_dir.display()
        )));
    }

    let mut samples = BTreeMap::new();
    for entry in fs::read_dir(bins_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let id = entry.file_name().to_string_lossy().to_string();
        let n_bins = count_bins(&path, extension)?;
        if n_bins == 0 {
            tracing::warn!(
                "sample directory {} has no .{} bins; skipping",
                path.display(),
                extension
            );
            continue;
        }
        samples.insert(
            id.clone(),
            BinSample {
                id,
                dir: path,
                n_bins,
            },
        );
    }

    if samples.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no sample directories with .{} bins in {}",
            extension,
            bins_dir.display()
        )));
    }

    Ok(samples.into_values().collect())
}

fn count_bins(dir: &Path, extension: &str) -> Result<usize, InputError> {
    let mut n = 0usize;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            n += 1;
        }
    }
    Ok(n)
}

pub fn discover_checkm_results(results_dir: &Path) -> Result<CheckmResults, InputError> {
    if !results_dir.is_dir() {
        return Err(InputError::MissingInput(format!(
            "CheckM results directory {} does not exist",
            results_dir.display()
        )));
    }

    let mut reports = OrderedMap::new();
    for id in sorted_subdirs(results_dir)? {
        if id == "plots" {
            continue;
        }
        let stats = stats_path(&sample_results_dir(results_dir, &id));
        if stats.is_file() {
            reports.insert(id, stats);
        }
    }
    if reports.is_empty() {
        return Err(InputError::MissingInput(format!(
            "no storage/bin_stats_ext.tsv reports under {}",
            results_dir.display()
        )));
    }

    let mut plots = PlotsByKind::new();
    for &kind in PlotKind::all() {
        let kind_dir = results_dir.join("plots").join(kind.as_str());
        if !kind_dir.is_dir() {
            continue;
        }
        let mut per_sample = OrderedMap::new();
        for id in sorted_subdirs(&kind_dir)? {
            per_sample.insert(id.clone(), plot_dir(results_dir, kind, &id));
        }
        if !per_sample.is_empty() {
            plots.insert(kind.index_key(), per_sample);
        }
    }

    Ok(CheckmResults { reports, plots })
}

fn sorted_subdirs(dir: &Path) -> Result<Vec<String>, InputError> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/samples.rs"]
mod tests;
