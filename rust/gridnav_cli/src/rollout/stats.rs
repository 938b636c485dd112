// rust/gridnav_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::time::Instant;

use serde::Serialize;

use gridnav_engine::EpisodeResult;

/// One CSV row per simulated episode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeRow {
    /// 1-based.
    pub episode: usize,
    pub steps: usize,
    pub total_reward: f64,
    /// 0/1 so the CSV column stays numeric.
    pub reached_goal: u8,
}

impl EpisodeRow {
    pub fn from_result(episode: usize, r: &EpisodeResult) -> Self {
        Self {
            episode,
            steps: r.steps,
            total_reward: r.total_reward,
            reached_goal: u8::from(r.reached_goal),
        }
    }
}

/// Running per-policy aggregates over finished episodes.
#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub episodes_finished: usize,
    pub successes: usize,

    pub steps_sum: u64,
    pub steps_min: usize,
    pub steps_max: usize,

    pub reward_sum: f64,
    pub reward_min: f64,
    pub reward_max: f64,

    t0: Instant,
}

impl Default for RolloutStats {
    fn default() -> Self {
        Self::new()
    }
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            episodes_finished: 0,
            successes: 0,
            steps_sum: 0,
            steps_min: usize::MAX,
            steps_max: 0,
            reward_sum: 0.0,
            reward_min: f64::INFINITY,
            reward_max: f64::NEG_INFINITY,
            t0: Instant::now(),
        }
    }

    /// Call once per finished episode.
    pub fn on_episode(&mut self, r: &EpisodeResult) {
        self.episodes_finished += 1;
        if r.reached_goal {
            self.successes += 1;
        }

        self.steps_sum += r.steps as u64;
        self.steps_min = self.steps_min.min(r.steps);
        self.steps_max = self.steps_max.max(r.steps);

        self.reward_sum += r.total_reward;
        self.reward_min = self.reward_min.min(r.total_reward);
        self.reward_max = self.reward_max.max(r.total_reward);
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.t0.elapsed().as_secs_f64()
    }

    pub fn success_rate(&self) -> f64 {
        if self.episodes_finished > 0 {
            self.successes as f64 / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_steps(&self) -> f64 {
        if self.episodes_finished > 0 {
            self.steps_sum as f64 / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn avg_reward(&self) -> f64 {
        if self.episodes_finished > 0 {
            self.reward_sum / self.episodes_finished as f64
        } else {
            0.0
        }
    }

    pub fn live_msg(&self) -> String {
        format!(
            "eps={} success={:.2} avg_steps={:.1} avg_reward={:.2}",
            self.episodes_finished,
            self.success_rate(),
            self.avg_steps(),
            self.avg_reward(),
        )
    }

    pub fn summary(&self, policy_name: &str) -> PolicySummary {
        let any = self.episodes_finished > 0;
        PolicySummary {
            policy: policy_name.to_string(),
            episodes: self.episodes_finished,
            successes: self.successes,
            success_rate: self.success_rate(),
            steps_min: if any { self.steps_min as f64 } else { 0.0 },
            steps_max: if any { self.steps_max as f64 } else { 0.0 },
            steps_avg: self.avg_steps(),
            reward_min: if any { self.reward_min } else { 0.0 },
            reward_max: if any { self.reward_max } else { 0.0 },
            reward_avg: self.avg_reward(),
        }
    }
}

/// End-of-run per-policy summary (written as `summary_<policy>.json`).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicySummary {
    pub policy: String,
    pub episodes: usize,
    pub successes: usize,
    pub success_rate: f64,
    pub steps_min: f64,
    pub steps_max: f64,
    pub steps_avg: f64,
    pub reward_min: f64,
    pub reward_max: f64,
    pub reward_avg: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(steps: usize, total_reward: f64, reached_goal: bool) -> EpisodeResult {
        EpisodeResult {
            steps,
            total_reward,
            reached_goal,
            trajectory: Vec::new(),
        }
    }

    #[test]
    fn summary_aggregates_min_max_avg() {
        let mut s = RolloutStats::new();
        s.on_episode(&result(10, 1.0, true));
        s.on_episode(&result(200, -250.0, false));
        s.on_episode(&result(30, -15.0, true));

        let sum = s.summary("random");
        assert_eq!(sum.policy, "random");
        assert_eq!(sum.episodes, 3);
        assert_eq!(sum.successes, 2);
        assert!((sum.success_rate - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(sum.steps_min, 10.0);
        assert_eq!(sum.steps_max, 200.0);
        assert_eq!(sum.steps_avg, 80.0);
        assert_eq!(sum.reward_min, -250.0);
        assert_eq!(sum.reward_max, 1.0);
        assert!((sum.reward_avg - (-88.0)).abs() < 1e-12);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let sum = RolloutStats::new().summary("greedy");
        assert_eq!(sum.episodes, 0);
        assert_eq!(sum.success_rate, 0.0);
        assert_eq!(sum.steps_min, 0.0);
        assert_eq!(sum.reward_max, 0.0);
    }

    #[test]
    fn row_encodes_goal_flag_as_int() {
        let row = EpisodeRow::from_result(1, &result(7, 4.0, true));
        assert_eq!(row.reached_goal, 1);
        assert_eq!(EpisodeRow::from_result(2, &result(7, 4.0, false)).reached_goal, 0);
    }
}
