mod input;
mod logging;
mod model;
mod pipeline;
mod report;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::input::samples::{discover_bin_samples, discover_checkm_results};
use crate::model::ordered::OrderedMap;
use crate::model::plots::PlotsBySample;
use crate::model::quality::QualityThresholds;
use crate::pipeline::PipelineError;
use crate::pipeline::stage1_args::CheckmParams;
use crate::pipeline::stage2_evaluate::{
    EvalParams, ProcessRunner, ToolRunner, draw_all_plots, evaluate_bins,
};
use crate::pipeline::stage3_aggregate::parse_reports;
use crate::pipeline::stage4_classify::run_stage4;
use crate::pipeline::stage5_plots::plots_per_sample;
use crate::pipeline::stage6_report::{Stage6Input, Stage6Output, write_outputs};

const TOOL_NAME: &str = "kira-checkm";

#[derive(Parser)]
#[command(
    name = "kira-checkm",
    version,
    about = "CheckM bin quality assessment across samples"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CheckM on every sample, then aggregate and report.
    Run(RunArgs),
    /// Aggregate and report an existing CheckM results directory.
    Aggregate(AggregateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Directory with one subdirectory of bins per sample.
    #[arg(long)]
    bins: PathBuf,

    /// CheckM reference data directory.
    #[arg(long)]
    db: PathBuf,

    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value = "fasta")]
    extension: String,

    /// Where CheckM writes its own outputs [default: <out>/checkm].
    #[arg(long)]
    results_dir: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    no_plots: bool,

    #[arg(long, default_value_t = false)]
    no_zip: bool,

    #[command(flatten)]
    checkm: CheckmArgs,
}

#[derive(Args)]
struct CheckmArgs {
    #[arg(long)]
    reduced_tree: bool,
    #[arg(long)]
    unique: Option<i64>,
    #[arg(long)]
    multi: Option<i64>,
    #[arg(long)]
    force_domain: bool,
    #[arg(long)]
    no_refinement: bool,
    #[arg(long)]
    individual_markers: bool,
    #[arg(long)]
    skip_adj_correction: bool,
    #[arg(long)]
    skip_pseudogene_correction: bool,
    #[arg(long)]
    aai_strain: Option<f64>,
    #[arg(long)]
    ignore_thresholds: bool,
    #[arg(long)]
    e_value: Option<f64>,
    #[arg(long)]
    length: Option<f64>,
    #[arg(long)]
    threads: Option<i64>,
    #[arg(long)]
    pplacer_threads: Option<i64>,
}

#[derive(Args)]
struct AggregateArgs {
    /// Output directory of an earlier `checkm lineage_wf` run per sample.
    #[arg(long)]
    results_dir: PathBuf,

    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = false)]
    no_zip: bool,
}

#[derive(Debug, Clone)]
struct RunConfig {
    bins_dir: PathBuf,
    db_path: PathBuf,
    out_dir: PathBuf,
    results_dir: PathBuf,
    extension: String,
    params: CheckmParams,
    draw_plots: bool,
    write_zip: bool,
}

#[derive(Debug, Clone)]
struct AggregateConfig {
    results_dir: PathBuf,
    out_dir: PathBuf,
    write_zip: bool,
}

impl From<CheckmArgs> for CheckmParams {
    fn from(a: CheckmArgs) -> Self {
        CheckmParams {
            reduced_tree: a.reduced_tree,
            unique: a.unique,
            multi: a.multi,
            force_domain: a.force_domain,
            no_refinement: a.no_refinement,
            individual_markers: a.individual_markers,
            skip_adj_correction: a.skip_adj_correction,
            skip_pseudogene_correction: a.skip_pseudogene_correction,
            aai_strain: a.aai_strain,
            ignore_thresholds: a.ignore_thresholds,
            e_value: a.e_value,
            length: a.length,
            threads: a.threads,
            pplacer_threads: a.pplacer_threads,
        }
    }
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        let results_dir = resolve_results_dir(&args.out, args.results_dir.as_deref());
        RunConfig {
            bins_dir: args.bins,
            db_path: args.db,
            out_dir: args.out,
            results_dir,
            extension: args.extension,
            params: args.checkm.into(),
            draw_plots: !args.no_plots,
            write_zip: !args.no_zip,
        }
    }
}

impl From<AggregateArgs> for AggregateConfig {
    fn from(args: AggregateArgs) -> Self {
        AggregateConfig {
            results_dir: args.results_dir,
            out_dir: args.out,
            write_zip: !args.no_zip,
        }
    }
}

fn main() {
    logging::init_logging();
    if let Err(err) = run() {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PipelineError> {
    let cli = Cli::parse();
    let output = match cli.command {
        Commands::Run(args) => evaluate(&args.into(), &ProcessRunner)?,
        Commands::Aggregate(args) => aggregate(&args.into())?,
    };
    tracing::info!(
        "{} bins across {} samples",
        output.summary.n_bins,
        output.summary.samples.len()
    );
    tracing::info!(
        "wrote {}, {}, {} and {}",
        output.results_path.display(),
        output.summary_path.display(),
        output.index_path.display(),
        output.details_path.display()
    );
    if let Some(zip_path) = &output.zip_path {
        tracing::info!("plots archived in {}", zip_path.display());
    }
    Ok(())
}

fn resolve_results_dir(out_dir: &Path, results_dir: Option<&Path>) -> PathBuf {
    match results_dir {
        Some(dir) => dir.to_path_buf(),
        None => out_dir.join("checkm"),
    }
}

fn evaluate(config: &RunConfig, runner: &dyn ToolRunner) -> Result<Stage6Output, PipelineError> {
    let samples = discover_bin_samples(&config.bins_dir, &config.extension)?;
    tracing::info!(
        "discovered {} samples in {}",
        samples.len(),
        config.bins_dir.display()
    );

    let params = EvalParams {
        results_dir: config.results_dir.clone(),
        db_path: config.db_path.clone(),
        extension: config.extension.clone(),
        common_args: config.params.common_args(),
    };

    let reports = evaluate_bins(runner, &samples, &params)?;
    let plots = if config.draw_plots {
        let all = draw_all_plots(runner, &samples, &params)?;
        Some(plots_per_sample(&all)?)
    } else {
        None
    };

    finish(
        &reports,
        plots.as_ref(),
        "run",
        config.write_zip,
        &config.out_dir,
    )
}

fn aggregate(config: &AggregateConfig) -> Result<Stage6Output, PipelineError> {
    let results = discover_checkm_results(&config.results_dir)?;
    tracing::info!(
        "found {} sample reports in {}",
        results.reports.len(),
        config.results_dir.display()
    );
    let plots = if results.plots.is_empty() {
        None
    } else {
        Some(plots_per_sample(&results.plots)?)
    };
    finish(
        &results.reports,
        plots.as_ref(),
        "aggregate",
        config.write_zip,
        &config.out_dir,
    )
}

fn finish(
    reports: &OrderedMap<PathBuf>,
    plots: Option<&PlotsBySample>,
    mode: &str,
    write_zip: bool,
    out_dir: &Path,
) -> Result<Stage6Output, PipelineError> {
    let table = parse_reports(reports)?;
    if table.is_empty() {
        tracing::warn!("no bins found in any CheckM report");
    }
    let classification = run_stage4(&table, &QualityThresholds::default_v1());
    let samples: Vec<String> = reports.keys().map(str::to_string).collect();

    let input = Stage6Input {
        table: &table,
        classification: &classification,
        samples: &samples,
        plots,
        mode,
        write_zip,
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Ok(write_outputs(&input, out_dir)?)
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
