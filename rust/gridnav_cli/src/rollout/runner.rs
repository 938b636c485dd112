// rust/gridnav_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use gridnav_engine::{GridModel, PolicyKind, TrajectoryStep, simulate_episode};

use super::sinks::RolloutSink;
use super::stats::{EpisodeRow, PolicySummary, RolloutStats};

#[derive(Clone, Debug)]
pub struct RunnerConfig {
    pub episodes: usize,
    pub max_steps: usize,
    /// Base seed; episode `i` is tagged with `base_seed + i`.
    pub base_seed: u64,

    /// 0 = final summary only
    /// 1 = progress bar
    /// 2 = progress bar + per-episode table (via sink)
    pub verbosity: u8,
}

/// Trajectory picked for the human-readable sample file.
#[derive(Clone, Debug)]
pub struct SampleTrajectory {
    /// False when no episode succeeded and the first episode was replayed.
    pub from_success: bool,
    pub steps: Vec<TrajectoryStep>,
}

/// Everything the report writer needs for one policy.
#[derive(Clone, Debug)]
pub struct PolicyRun {
    pub policy: PolicyKind,
    pub rows: Vec<EpisodeRow>,
    pub summary: PolicySummary,
    pub sample: SampleTrajectory,
    pub elapsed_s: f64,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    /// Run `cfg.episodes` episodes with ONE policy instance, so the policy's
    /// RNG stream continues from episode to episode.
    pub fn run(&mut self, model: &GridModel, kind: PolicyKind, policy_seed: u64) -> PolicyRun {
        let cfg = self.cfg.clone();
        let name = kind.name();

        // Progress bar is UI only; runner logic does not depend on it.
        let pb = if cfg.verbosity >= 1 {
            let pb = ProgressBar::new(cfg.episodes as u64);
            pb.set_style(
                ProgressStyle::with_template(
                    "{prefix:>7} {bar:40.cyan/blue} {pos:>5}/{len:<5}  {percent:>3}%  {elapsed_precise}  {msg}",
                )
                .unwrap()
                .progress_chars("=>-"),
            );
            pb.set_prefix(name);
            Some(pb)
        } else {
            None
        };

        info!(policy = name, policy_seed, episodes = cfg.episodes, max_steps = cfg.max_steps, "rollout start");

        let mut policy = kind.build(policy_seed);
        let mut stats = RolloutStats::new();
        let mut rows: Vec<EpisodeRow> = Vec::with_capacity(cfg.episodes);
        let mut sample: Option<Vec<TrajectoryStep>> = None;

        for ep in 0..cfg.episodes {
            let seed = cfg.base_seed.wrapping_add(ep as u64);
            let res = simulate_episode(model, policy.as_mut(), cfg.max_steps, seed);

            stats.on_episode(&res);
            let row = EpisodeRow::from_result(ep + 1, &res);

            if cfg.verbosity >= 2 {
                self.sink.on_episode(name, &row, pb.as_ref());
            }
            rows.push(row);

            if sample.is_none() && res.reached_goal {
                debug!(policy = name, episode = ep + 1, "sample trajectory taken");
                sample = Some(res.trajectory);
            }

            if let Some(ref pb) = pb {
                pb.inc(1);
                pb.set_message(stats.live_msg());
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message(stats.live_msg());
        }

        let sample = match sample {
            Some(steps) => SampleTrajectory {
                from_success: true,
                steps,
            },
            None => {
                // Replay the first episode from a fresh policy so the sample does
                // not depend on how far the shared stream has advanced.
                debug!(policy = name, "no successful episode; replaying episode 1 for sample");
                let mut fresh = kind.build(policy_seed);
                let res = simulate_episode(model, fresh.as_mut(), cfg.max_steps, cfg.base_seed);
                SampleTrajectory {
                    from_success: false,
                    steps: res.trajectory,
                }
            }
        };

        let summary = stats.summary(name);
        info!(
            policy = name,
            successes = summary.successes,
            success_rate = summary.success_rate,
            steps_avg = summary.steps_avg,
            reward_avg = summary.reward_avg,
            "rollout done"
        );

        PolicyRun {
            policy: kind,
            rows,
            summary,
            sample,
            elapsed_s: stats.elapsed_secs(),
        }
    }
}
