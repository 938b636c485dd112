// rust/gridnav_cli/src/rollout/mod.rs
#![forbid(unsafe_code)]

pub mod runner;
pub mod sinks;
pub mod stats;

pub use runner::{PolicyRun, Runner, RunnerConfig, SampleTrajectory};
pub use sinks::{NoopSink, RolloutSink, TableSink};
pub use stats::{EpisodeRow, PolicySummary};
