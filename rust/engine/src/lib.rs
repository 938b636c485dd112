// rust/engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod episode;
pub mod policy;

pub use engine::{
    Action, EngineError, GridConfig, GridModel, Position, Rewards, RunConfig, Transition,
};
pub use episode::{EpisodeResult, TrajectoryStep, simulate_episode};
pub use policy::{GreedyManhattanPolicy, Policy, PolicyKind, RandomPolicy};
