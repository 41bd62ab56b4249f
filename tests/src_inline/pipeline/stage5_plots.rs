use super::*;
use std::path::PathBuf;

fn kind_map(samples: &[&str], kind: &str) -> OrderedMap<PathBuf> {
    samples
        .iter()
        .map(|s| (*s, PathBuf::from(format!("/r/plots/{kind}/{s}"))))
        .collect()
}

#[test]
fn test_plots_per_sample_transposes() {
    let mut all = PlotsByKind::new();
    all.insert("plots_gc", kind_map(&["s1", "s2"], "gc"));
    all.insert("plots_nx", kind_map(&["s2", "s1"], "nx"));

    let out = plots_per_sample(&all).unwrap();
    assert_eq!(out.keys().collect::<Vec<_>>(), vec!["s1", "s2"]);
    let s2 = out.get("s2").unwrap();
    assert_eq!(s2.keys().collect::<Vec<_>>(), vec!["plots_gc", "plots_nx"]);
    assert_eq!(s2.get("plots_nx"), Some(&PathBuf::from("/r/plots/nx/s2")));
}

#[test]
fn test_mismatched_counts_message() {
    let mut all = PlotsByKind::new();
    all.insert("plots_gc", kind_map(&["s1", "s2"], "gc"));
    all.insert("plots_nx", kind_map(&["s1"], "nx"));
    all.insert("plots_coding", kind_map(&["s1", "s2", "s3"], "coding"));

    let err = plots_per_sample(&all).unwrap_err();
    assert_eq!(
        err.to_string(),
        "All plot types need to have the same set of samples. Sample counts were: [2, 1, 3]."
    );
    assert_eq!(err, PlotError::SampleMismatch { counts: vec![2, 1, 3] });
}

#[test]
fn test_same_count_different_samples_fails() {
    let mut all = PlotsByKind::new();
    all.insert("plots_gc", kind_map(&["s1", "s2"], "gc"));
    all.insert("plots_nx", kind_map(&["s1", "s3"], "nx"));
    assert!(matches!(
        plots_per_sample(&all),
        Err(PlotError::SampleMismatch { counts }) if counts == vec![2, 2]
    ));
}

#[test]
fn test_empty_input() {
    let out = plots_per_sample(&PlotsByKind::new()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_single_kind() {
    let mut all = PlotsByKind::new();
    all.insert("plots_coding", kind_map(&["b", "a"], "coding"));
    let out = plots_per_sample(&all).unwrap();
    assert_eq!(out.keys().collect::<Vec<_>>(), vec!["b", "a"]);
    assert_eq!(out.get("a").unwrap().len(), 1);
}
