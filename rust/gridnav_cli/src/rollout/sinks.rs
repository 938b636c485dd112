// rust/gridnav_cli/src/rollout/sinks.rs
#![forbid(unsafe_code)]

use super::stats::EpisodeRow;

/// Sink interface for per-episode reporting.
pub trait RolloutSink {
    fn on_episode(&mut self, policy: &str, row: &EpisodeRow, pb: Option<&indicatif::ProgressBar>);
}

/// Default sink: does nothing.
#[derive(Default)]
pub struct NoopSink;

impl RolloutSink for NoopSink {
    fn on_episode(&mut self, _policy: &str, _row: &EpisodeRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Human-readable per-episode table.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

impl TableSink {
    const DEFAULT_HEADER_EVERY: u64 = 20;

    /// If `header_every == 0`, a reasonable default is used.
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: if header_every == 0 {
                Self::DEFAULT_HEADER_EVERY
            } else {
                header_every
            },
            rows_printed: 0,
        }
    }

    fn header_line(&self) -> String {
        // Keep widths aligned with row_line() below.
        format!(
            "{:>8} {:>8} {:>7} {:>12} {:>5}",
            "policy", "episode", "steps", "reward", "goal"
        )
    }

    fn sep_line(&self) -> String {
        "-".repeat(self.header_line().len())
    }

    fn row_line(&self, policy: &str, r: &EpisodeRow) -> String {
        format!(
            "{:>8} {:>8} {:>7} {:>12.2} {:>5}",
            policy, r.episode, r.steps, r.total_reward, r.reached_goal
        )
    }

    fn lines_for(&mut self, policy: &str, row: &EpisodeRow) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();

        if self.rows_printed % self.header_every == 0 {
            lines.push(self.header_line());
            lines.push(self.sep_line());
        }

        lines.push(self.row_line(policy, row));
        self.rows_printed += 1;
        lines
    }
}

impl RolloutSink for TableSink {
    fn on_episode(&mut self, policy: &str, row: &EpisodeRow, pb: Option<&indicatif::ProgressBar>) {
        let lines = self.lines_for(policy, row);

        if let Some(pb) = pb {
            for l in lines {
                pb.println(l);
            }
        } else {
            for l in lines {
                println!("{l}");
            }
        }
    }
}
