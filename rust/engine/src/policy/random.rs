// rust/engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Action, GridModel, Position};

use super::base::Policy;

/// Uniform choice over `available_actions`, one RNG draw per call.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub const DEFAULT_SEED: u64 = 42;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, model: &GridModel, _state: Position) -> Action {
        let actions = model.available_actions();
        let idx = self.rng.gen_range(0..actions.len());
        actions[idx]
    }
}
