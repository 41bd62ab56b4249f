use thiserror::Error;

use crate::input::InputError;
use crate::pipeline::stage2_evaluate::ToolError;
use crate::pipeline::stage5_plots::PlotError;
use crate::pipeline::stage6_report::ReportError;

pub mod stage1_args;
pub mod stage2_evaluate;
pub mod stage3_aggregate;
pub mod stage4_classify;
pub mod stage5_plots;
pub mod stage6_report;

/// Any stage failure aborts the whole run; nothing is retried or skipped.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
