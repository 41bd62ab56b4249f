use std::fmt;

use crate::report::format_f64_repr;

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl ArgValue {
    /// An integer is always kept, so `0` stays distinguishable from "not
    /// provided". Every other falsy value counts as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ArgValue::Int(_) => false,
            ArgValue::Absent => true,
            ArgValue::Bool(b) => !b,
            ArgValue::Float(v) => *v == 0.0,
            ArgValue::Str(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgValue::Absent => f.write_str("None"),
            ArgValue::Bool(true) => f.write_str("True"),
            ArgValue::Bool(false) => f.write_str("False"),
            ArgValue::Int(v) => write!(f, "{v}"),
            ArgValue::Float(v) => f.write_str(&format_f64_repr(*v)),
            ArgValue::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        ArgValue::Bool(value)
    }
}

impl From<Option<i64>> for ArgValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(ArgValue::Absent, ArgValue::Int)
    }
}

impl From<Option<f64>> for ArgValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(ArgValue::Absent, ArgValue::Float)
    }
}

impl From<Option<String>> for ArgValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(ArgValue::Absent, ArgValue::Str)
    }
}

/// Flattens `(name, value)` pairs into command-line tokens, in input order.
/// Empty values are skipped; the rest go through `format_arg`.
pub fn process_common_args<F>(params: &[(&str, ArgValue)], mut format_arg: F) -> Vec<String>
where
    F: FnMut(&str, &ArgValue) -> Vec<String>,
{
    let mut out = Vec::new();
    for (name, value) in params {
        if value.is_empty() {
            continue;
        }
        out.extend(format_arg(name, value));
    }
    out
}

/// `true` becomes a bare `--name` flag, anything else `--name value`.
pub fn format_checkm_arg(name: &str, value: &ArgValue) -> Vec<String> {
    match value {
        ArgValue::Bool(true) => vec![format!("--{name}")],
        other => vec![format!("--{name}"), other.to_string()],
    }
}

/// Optional `checkm lineage_wf` settings.
#[derive(Debug, Clone, Default)]
pub struct CheckmParams {
    pub reduced_tree: bool,
    pub unique: Option<i64>,
    pub multi: Option<i64>,
    pub force_domain: bool,
    pub no_refinement: bool,
    pub individual_markers: bool,
    pub skip_adj_correction: bool,
    pub skip_pseudogene_correction: bool,
    pub aai_strain: Option<f64>,
    pub ignore_thresholds: bool,
    pub e_value: Option<f64>,
    pub length: Option<f64>,
    pub threads: Option<i64>,
    pub pplacer_threads: Option<i64>,
}

impl CheckmParams {
    pub fn to_arg_list(&self) -> Vec<(&'static str, ArgValue)> {
        vec![
            ("reduced_tree", self.reduced_tree.into()),
            ("unique", self.unique.into()),
            ("multi", self.multi.into()),
            ("force_domain", self.force_domain.into()),
            ("no_refinement", self.no_refinement.into()),
            ("individual_markers", self.individual_markers.into()),
            ("skip_adj_correction", self.skip_adj_correction.into()),
            (
                "skip_pseudogene_correction",
                self.skip_pseudogene_correction.into(),
            ),
            ("aai_strain", self.aai_strain.into()),
            ("ignore_thresholds", self.ignore_thresholds.into()),
            ("e_value", self.e_value.into()),
            ("length", self.length.into()),
            ("threads", self.threads.into()),
            ("pplacer_threads", self.pplacer_threads.into()),
        ]
    }

    pub fn common_args(&self) -> Vec<String> {
        process_common_args(&self.to_arg_list(), format_checkm_arg)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_args.rs"]
mod tests;
