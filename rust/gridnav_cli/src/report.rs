// rust/gridnav_cli/src/report.rs
#![forbid(unsafe_code)]

//! Result files written next to each other in the output directory:
//!
//! - `grid.txt`                      ASCII layout
//! - `stats_<policy>.csv`            one row per episode
//! - `sample_trajectory_<policy>.txt`
//! - `summary_<policy>.json`
//! - `stats_combined.csv`, `summary_combined.json`

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use tracing::info;

use gridnav_engine::GridModel;

use crate::rollout::{EpisodeRow, PolicyRun, PolicySummary, SampleTrajectory};

#[derive(Serialize)]
struct CombinedRow<'a> {
    episode: usize,
    steps: usize,
    total_reward: f64,
    reached_goal: u8,
    policy: &'a str,
}

/// `{ "<policy>": summary, ... }` in run order.
struct KeyedSummaries<'a>(&'a [PolicyRun]);

impl Serialize for KeyedSummaries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for run in self.0 {
            map.serialize_entry(run.policy.name(), &run.summary)?;
        }
        map.end()
    }
}

pub fn ensure_out_dir(out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create output dir {}", out_dir.display()))
}

pub fn write_grid(out_dir: &Path, model: &GridModel) -> Result<PathBuf> {
    let path = out_dir.join("grid.txt");
    let text = format!(
        "Maze layout ({n}x{n}; #=wall, S=start, G=goal, .=free)\n\n{}",
        model.render_ascii(),
        n = model.size(),
    );
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

pub fn format_sample(policy_name: &str, sample: &SampleTrajectory) -> String {
    let mut out = format!(
        "Sample trajectory for {policy_name} policy (state_before -> action -> reward):\n\n"
    );
    if !sample.from_success {
        out.push_str("(No successful episode to sample; showing first episode steps)\n");
    }
    for s in &sample.steps {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{} -> {} -> {:.2}", s.state, s.action, s.reward);
    }
    out
}

fn write_rows_csv(path: &Path, rows: &[EpisodeRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

/// Per-policy artifacts. Returns the sample trajectory path.
pub fn write_policy_reports(out_dir: &Path, run: &PolicyRun) -> Result<PathBuf> {
    let name = run.policy.name();

    write_rows_csv(&out_dir.join(format!("stats_{name}.csv")), &run.rows)?;

    let traj_path = out_dir.join(format!("sample_trajectory_{name}.txt"));
    fs::write(&traj_path, format_sample(name, &run.sample))
        .with_context(|| format!("failed to write {}", traj_path.display()))?;

    write_json(&out_dir.join(format!("summary_{name}.json")), &run.summary)?;

    info!(policy = name, dir = %out_dir.display(), "policy reports written");
    Ok(traj_path)
}

pub fn write_combined_reports(out_dir: &Path, runs: &[PolicyRun]) -> Result<()> {
    let path = out_dir.join("stats_combined.csv");
    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    for run in runs {
        for r in &run.rows {
            wtr.serialize(CombinedRow {
                episode: r.episode,
                steps: r.steps,
                total_reward: r.total_reward,
                reached_goal: r.reached_goal,
                policy: run.policy.name(),
            })?;
        }
    }
    wtr.flush()?;

    write_json(&out_dir.join("summary_combined.json"), &KeyedSummaries(runs))?;
    Ok(())
}

/// One-line summary for logs / grep.
pub fn done_line(run: &PolicyRun) -> String {
    let s: &PolicySummary = &run.summary;
    format!(
        "DONE: policy={} episodes={} successes={} success_rate={:.2} steps[min/avg/max]={}/{:.2}/{} reward[min/avg/max]={:.2}/{:.2}/{:.2} elapsed={:.3}s",
        s.policy,
        s.episodes,
        s.successes,
        s.success_rate,
        s.steps_min,
        s.steps_avg,
        s.steps_max,
        s.reward_min,
        s.reward_avg,
        s.reward_max,
        run.elapsed_s,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rollout::{NoopSink, Runner, RunnerConfig};
    use gridnav_engine::{Action, GridConfig, PolicyKind, Position, TrajectoryStep};

    fn runs(model: &GridModel) -> Vec<PolicyRun> {
        let mut runner = Runner::new(
            RunnerConfig {
                episodes: 3,
                max_steps: 50,
                base_seed: 7,
                verbosity: 0,
            },
            Box::new(NoopSink),
        );
        PolicyKind::ALL
            .iter()
            .map(|&k| runner.run(model, k, k.default_seed()))
            .collect()
    }

    #[test]
    fn sample_format_matches_line_layout() {
        let sample = SampleTrajectory {
            from_success: false,
            steps: vec![TrajectoryStep {
                state: Position::new(5, 0),
                action: Action::Up,
                reward: -1.0,
            }],
        };
        let text = format_sample("greedy", &sample);
        assert_eq!(
            text,
            "Sample trajectory for greedy policy (state_before -> action -> reward):\n\n\
             (No successful episode to sample; showing first episode steps)\n\
             (5, 0) -> U -> -1.00\n"
        );
    }

    #[test]
    fn writes_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("results");
        ensure_out_dir(&out).unwrap();

        let model = GridConfig::default().build_model();
        write_grid(&out, &model).unwrap();
        let runs = runs(&model);
        for run in &runs {
            write_policy_reports(&out, run).unwrap();
        }
        write_combined_reports(&out, &runs).unwrap();

        for f in [
            "grid.txt",
            "stats_random.csv",
            "stats_greedy.csv",
            "sample_trajectory_random.txt",
            "sample_trajectory_greedy.txt",
            "summary_random.json",
            "summary_greedy.json",
            "stats_combined.csv",
            "summary_combined.json",
        ] {
            assert!(out.join(f).is_file(), "missing {f}");
        }

        let greedy_csv = fs::read_to_string(out.join("stats_greedy.csv")).unwrap();
        let mut lines = greedy_csv.lines();
        assert_eq!(lines.next(), Some("episode,steps,total_reward,reached_goal"));
        assert_eq!(lines.next(), Some("1,10,1.0,1"));

        let combined = fs::read_to_string(out.join("stats_combined.csv")).unwrap();
        assert!(combined.starts_with("episode,steps,total_reward,reached_goal,policy\n"));
        assert_eq!(combined.lines().count(), 1 + 6);

        let summary: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("summary_combined.json")).unwrap())
                .unwrap();
        assert_eq!(summary["greedy"]["successes"], 3);
        assert_eq!(summary["random"]["episodes"], 3);

        let grid = fs::read_to_string(out.join("grid.txt")).unwrap();
        assert!(grid.ends_with(".....G\n.##.#.\n....#.\n.##.#.\n....#.\nS.....\n"));
    }
}
