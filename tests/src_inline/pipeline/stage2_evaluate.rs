use super::*;
use std::cell::RefCell;
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("kira_checkm_stage2_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// Records commands; writes a report for lineage_wf unless told not to.
#[derive(Default)]
struct FakeRunner {
    calls: RefCell<Vec<ToolCommand>>,
    skip_report: bool,
    fail_on: Option<&'static str>,
}

impl ToolRunner for FakeRunner {
    fn run(&self, cmd: &ToolCommand) -> Result<(), ToolError> {
        self.calls.borrow_mut().push(cmd.clone());
        if self.fail_on == Some(cmd.args[1].as_str()) {
            return Err(ToolError::Failed {
                program: cmd.program().to_string(),
                status: "exit status: 2".to_string(),
            });
        }
        if cmd.args[1] == "lineage_wf" && !self.skip_report {
            let out = PathBuf::from(cmd.args.last().unwrap());
            let stats = stats_path(&out);
            fs::create_dir_all(stats.parent().unwrap()).unwrap();
            fs::write(&stats, "b1\t{'Completeness': 99.0}\n").unwrap();
        }
        Ok(())
    }
}

fn sample(id: &str) -> BinSample {
    BinSample {
        id: id.to_string(),
        dir: PathBuf::from("/data/bins").join(id),
        n_bins: 2,
    }
}

fn params(results_dir: &Path) -> EvalParams {
    EvalParams {
        results_dir: results_dir.to_path_buf(),
        db_path: PathBuf::from("/db/checkm"),
        extension: "fasta".to_string(),
        common_args: vec!["--threads".to_string(), "4".to_string()],
    }
}

#[test]
fn test_lineage_command() {
    let cmd = lineage_command(&sample("s1"), &params(Path::new("/work")));
    assert_eq!(
        cmd.args,
        vec![
            "checkm",
            "lineage_wf",
            "--threads",
            "4",
            "-x",
            "fasta",
            "/data/bins/s1",
            "/work/s1",
        ]
    );
    assert_eq!(
        cmd.env,
        vec![("CHECKM_DATA_PATH".to_string(), "/db/checkm".to_string())]
    );
    assert_eq!(cmd.program(), "checkm");
}

#[test]
fn test_plot_commands() {
    let p = params(Path::new("/work"));
    let gc = plot_command(&sample("s1"), &p, PlotKind::Gc);
    assert_eq!(
        gc.args,
        vec![
            "checkm",
            "gc_plot",
            "-x",
            "fasta",
            "--image_type",
            "svg",
            "--font_size",
            "10",
            "/data/bins/s1",
            "/work/plots/gc/s1",
            "50",
            "75",
            "90",
        ]
    );

    let nx = plot_command(&sample("s1"), &p, PlotKind::Nx);
    assert_eq!(nx.args.last().map(String::as_str), Some("/work/plots/nx/s1"));
    assert_eq!(nx.args.len(), 10);

    let coding = plot_command(&sample("s1"), &p, PlotKind::Coding);
    assert_eq!(coding.args[1], "coding_plot");
    assert_eq!(coding.args[8], "/work/s1");
    assert_eq!(coding.args[9], "/data/bins/s1");
    assert_eq!(coding.args[10], "/work/plots/coding/s1");
}

#[test]
fn test_evaluate_bins_collects_reports() {
    let dir = make_temp_dir();
    let runner = FakeRunner::default();
    let samples = vec![sample("s1"), sample("s2")];

    let reports = evaluate_bins(&runner, &samples, &params(&dir)).unwrap();
    assert_eq!(reports.keys().collect::<Vec<_>>(), vec!["s1", "s2"]);
    assert_eq!(reports.get("s2"), Some(&stats_path(&dir.join("s2"))));
    assert_eq!(runner.calls.borrow().len(), 2);
}

#[test]
fn test_evaluate_bins_missing_report() {
    let dir = make_temp_dir();
    let runner = FakeRunner {
        skip_report: true,
        ..FakeRunner::default()
    };
    let err = evaluate_bins(&runner, &[sample("s1")], &params(&dir)).unwrap_err();
    assert!(matches!(
        err,
        ToolError::Input(InputError::MissingFile(_))
    ));
}

#[test]
fn test_tool_failure_aborts() {
    let dir = make_temp_dir();
    let runner = FakeRunner {
        fail_on: Some("nx_plot"),
        ..FakeRunner::default()
    };
    let samples = vec![sample("s1"), sample("s2")];
    let err = draw_all_plots(&runner, &samples, &params(&dir)).unwrap_err();
    assert_eq!(err.to_string(), "checkm exited with exit status: 2");
    // gc for both samples, then the first nx call
    assert_eq!(runner.calls.borrow().len(), 3);
}

#[test]
fn test_draw_all_plots_index() {
    let dir = make_temp_dir();
    let runner = FakeRunner::default();
    let samples = vec![sample("s1"), sample("s2")];
    let all = draw_all_plots(&runner, &samples, &params(&dir)).unwrap();
    assert_eq!(
        all.keys().collect::<Vec<_>>(),
        vec!["plots_gc", "plots_nx", "plots_coding"]
    );
    assert_eq!(
        all.get("plots_nx").unwrap().get("s2"),
        Some(&dir.join("plots").join("nx").join("s2"))
    );
}

#[test]
fn test_process_runner_empty_command() {
    let cmd = ToolCommand {
        args: vec![],
        env: vec![],
    };
    assert!(matches!(
        ProcessRunner.run(&cmd),
        Err(ToolError::EmptyCommand)
    ));
}
