use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::input::InputError;
use crate::input::samples::{BinSample, plot_dir, sample_results_dir, stats_path};
use crate::model::ordered::OrderedMap;
use crate::model::plots::{PlotKind, PlotsByKind};

pub const CHECKM_PROGRAM: &str = "checkm";
pub const CHECKM_DATA_ENV: &str = "CHECKM_DATA_PATH";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("empty command")]
    EmptyCommand,
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}")]
    Failed { program: String, status: String },
    #[error(transparent)]
    Input(#[from] InputError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolCommand {
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl ToolCommand {
    pub fn program(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    pub fn display(&self) -> String {
        self.args.join(" ")
    }
}

pub trait ToolRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<(), ToolError>;
}

/// Runs commands as blocking child processes inheriting this process'
/// environment plus the command's own variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<(), ToolError> {
        if cmd.args.is_empty() {
            return Err(ToolError::EmptyCommand);
        }
        let program = cmd.program();
        tracing::info!("running external command: {}", cmd.display());
        let status = Command::new(program)
            .args(&cmd.args[1..])
            .envs(cmd.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|source| ToolError::Launch {
                program: program.to_string(),
                source,
            })?;
        if !status.success() {
            return Err(ToolError::Failed {
                program: program.to_string(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct EvalParams {
    pub results_dir: PathBuf,
    pub db_path: PathBuf,
    pub extension: String,
    pub common_args: Vec<String>,
}

impl EvalParams {
    fn env(&self) -> Vec<(String, String)> {
        vec![(
            CHECKM_DATA_ENV.to_string(),
            self.db_path.display().to_string(),
        )]
    }
}

pub fn lineage_command(sample: &BinSample, params: &EvalParams) -> ToolCommand {
    let mut args = vec![CHECKM_PROGRAM.to_string(), "lineage_wf".to_string()];
    args.extend(params.common_args.iter().cloned());
    args.push("-x".to_string());
    args.push(params.extension.clone());
    args.push(path_arg(&sample.dir));
    args.push(path_arg(&sample_results_dir(
        &params.results_dir,
        &sample.id,
    )));
    ToolCommand {
        args,
        env: params.env(),
    }
}

pub fn plot_command(sample: &BinSample, params: &EvalParams, kind: PlotKind) -> ToolCommand {
    let mut args = vec![
        CHECKM_PROGRAM.to_string(),
        kind.subcommand(),
        "-x".to_string(),
        params.extension.clone(),
        "--image_type".to_string(),
        "svg".to_string(),
        "--font_size".to_string(),
        "10".to_string(),
    ];
    if kind.needs_results_dir() {
        args.push(path_arg(&sample_results_dir(
            &params.results_dir,
            &sample.id,
        )));
    }
    args.push(path_arg(&sample.dir));
    args.push(path_arg(&plot_dir(&params.results_dir, kind, &sample.id)));
    args.extend(kind.dist_values().iter().map(|v| v.to_string()));
    ToolCommand {
        args,
        env: params.env(),
    }
}

/// Runs `lineage_wf` per sample and returns sample id -> report path.
pub fn evaluate_bins(
    runner: &dyn ToolRunner,
    samples: &[BinSample],
    params: &EvalParams,
) -> Result<OrderedMap<PathBuf>, ToolError> {
    let mut reports = OrderedMap::new();
    for sample in samples {
        tracing::info!(
            "evaluating {} bins of sample {}",
            sample.n_bins,
            sample.id
        );
        runner.run(&lineage_command(sample, params))?;

        let stats = stats_path(&sample_results_dir(&params.results_dir, &sample.id));
        if !stats.is_file() {
            return Err(InputError::MissingFile(stats).into());
        }
        reports.insert(sample.id.clone(), stats);
    }
    Ok(reports)
}

/// Draws one plot kind for every sample; returns sample id -> plot dir.
pub fn draw_plots(
    runner: &dyn ToolRunner,
    samples: &[BinSample],
    params: &EvalParams,
    kind: PlotKind,
) -> Result<OrderedMap<PathBuf>, ToolError> {
    let mut plots = OrderedMap::new();
    for sample in samples {
        plots.insert(
            sample.id.clone(),
            plot_dir(&params.results_dir, kind, &sample.id),
        );
        runner.run(&plot_command(sample, params, kind))?;
    }
    Ok(plots)
}

pub fn draw_all_plots(
    runner: &dyn ToolRunner,
    samples: &[BinSample],
    params: &EvalParams,
) -> Result<PlotsByKind, ToolError> {
    let mut all = PlotsByKind::new();
    for &kind in PlotKind::all() {
        let plots = draw_plots(runner, samples, params, kind)?;
        all.insert(kind.index_key(), plots);
    }
    Ok(all)
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_evaluate.rs"]
mod tests;
