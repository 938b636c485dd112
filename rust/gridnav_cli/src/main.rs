// rust/gridnav_cli/src/main.rs
#![forbid(unsafe_code)]

mod report;
mod rollout;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::rollout::{NoopSink, PolicyRun, RolloutSink, Runner, RunnerConfig, TableSink};
use gridnav_engine::{GridConfig, PolicyKind};

#[derive(Parser, Debug)]
#[command(name = "gridnav_cli", version, about = "Compare random vs greedy grid-world navigation")]
struct Args {
    // ---------------- configuration ----------------
    /// TOML file with grid layout, rewards and run settings. Defaults to the built-in 6x6 maze.
    #[arg(long, value_name = "path")]
    config: Option<PathBuf>,

    /// Policy: random | greedy | both
    #[arg(long, default_value = "both")]
    policy: String,

    // ---------------- run overrides ----------------
    /// Episodes per policy (overrides config).
    #[arg(long)]
    episodes: Option<usize>,

    /// Step budget per episode (overrides config).
    #[arg(long)]
    max_steps: Option<usize>,

    /// Base seed; episode i is tagged with base_seed + i (overrides config).
    #[arg(long)]
    seed: Option<u64>,

    /// RNG seed for the random policy (overrides config).
    #[arg(long)]
    random_seed: Option<u64>,

    /// RNG seed for the greedy policy's boxed-in fallback (overrides config).
    #[arg(long)]
    greedy_seed: Option<u64>,

    // ---------------- output / reporting ----------------
    /// Directory for CSV/JSON/text results.
    #[arg(long, default_value = "results")]
    out: PathBuf,

    /// Verbosity: 0=silent (final summary only), 1=progress bar, 2=progress bar + per-episode table.
    #[arg(long, default_value_t = 1)]
    verbosity: u8,

    /// Log filter (tracing EnvFilter syntax), e.g. "info" or "gridnav_engine=debug".
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn selected_policies(arg: &str) -> Result<Vec<PolicyKind>> {
    if arg.trim().eq_ignore_ascii_case("both") {
        return Ok(PolicyKind::ALL.to_vec());
    }
    match PolicyKind::parse(arg) {
        Some(k) => Ok(vec![k]),
        None => bail!("unknown policy {arg:?} (expected random | greedy | both)"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut cfg = match &args.config {
        Some(path) => GridConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GridConfig::default(),
    };
    if let Some(n) = args.episodes {
        cfg.run.episodes = n;
    }
    if let Some(n) = args.max_steps {
        cfg.run.max_steps = n;
    }
    if let Some(s) = args.seed {
        cfg.run.base_seed = s;
    }
    if let Some(s) = args.random_seed {
        cfg.run.random_seed = s;
    }
    if let Some(s) = args.greedy_seed {
        cfg.run.greedy_seed = s;
    }
    cfg.validate().context("invalid grid configuration")?;

    let policies = selected_policies(&args.policy)?;
    let model = cfg.build_model();

    info!(
        size = model.size(),
        walls = model.wall_count(),
        start = %model.start(),
        goal = %model.goal(),
        episodes = cfg.run.episodes,
        max_steps = cfg.run.max_steps,
        base_seed = cfg.run.base_seed,
        "configuration loaded"
    );

    report::ensure_out_dir(&args.out)?;
    report::write_grid(&args.out, &model)?;

    // Rollout configuration (data only; no logic).
    let runner_cfg = RunnerConfig {
        episodes: cfg.run.episodes,
        max_steps: cfg.run.max_steps,
        base_seed: cfg.run.base_seed,
        verbosity: args.verbosity,
    };

    let sink: Box<dyn RolloutSink> = if args.verbosity >= 2 {
        Box::new(TableSink::new(20))
    } else {
        Box::new(NoopSink)
    };
    let mut runner = Runner::new(runner_cfg, sink);

    let mut runs: Vec<PolicyRun> = Vec::with_capacity(policies.len());
    for kind in policies {
        let seed = match kind {
            PolicyKind::Random => cfg.run.random_seed,
            PolicyKind::Greedy => cfg.run.greedy_seed,
        };
        let run = runner.run(&model, kind, seed);
        report::write_policy_reports(&args.out, &run)?;
        runs.push(run);
    }
    report::write_combined_reports(&args.out, &runs)?;

    for run in &runs {
        println!("{}", report::done_line(run));
    }
    info!(dir = %args.out.display(), "results written");
    Ok(())
}
