use std::path::PathBuf;

use crate::model::ordered::OrderedMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Gc,
    Nx,
    Coding,
}

impl PlotKind {
    pub fn all() -> &'static [PlotKind] {
        &[PlotKind::Gc, PlotKind::Nx, PlotKind::Coding]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PlotKind::Gc => "gc",
            PlotKind::Nx => "nx",
            PlotKind::Coding => "coding",
        }
    }

    pub fn subcommand(self) -> String {
        format!("{}_plot", self.as_str())
    }

    /// Key used for this kind in a [`PlotsByKind`] index.
    pub fn index_key(self) -> String {
        format!("plots_{}", self.as_str())
    }

    /// Distribution percentiles passed to CheckM; the Nx plot takes none.
    pub fn dist_values(self) -> &'static [&'static str] {
        match self {
            PlotKind::Nx => &[],
            PlotKind::Gc | PlotKind::Coding => &["50", "75", "90"],
        }
    }

    /// The coding plot reads the lineage_wf output directory of the sample.
    pub fn needs_results_dir(self) -> bool {
        matches!(self, PlotKind::Coding)
    }
}

/// plot kind -> sample id -> plot directory
pub type PlotsByKind = OrderedMap<OrderedMap<PathBuf>>;

/// sample id -> plot kind -> plot directory
pub type PlotsBySample = OrderedMap<OrderedMap<PathBuf>>;
