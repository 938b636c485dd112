// rust/engine/src/policy/greedy.rs
#![forbid(unsafe_code)]

use rand::prelude::*;
use tracing::warn;

use crate::engine::{Action, GridModel, Position};

use super::base::Policy;

/// Tie-break order shared by both greedy passes.
pub const GREEDY_PREFERENCE: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

/// Greedy descent on Manhattan distance to the goal.
///
/// Decision rule, in order:
/// 1. terminal state: `Up` (never reached by the episode loop).
/// 2. first non-colliding action (in `GREEDY_PREFERENCE` order) that strictly
///    reduces the distance.
/// 3. first non-colliding action, whatever it does to the distance.
/// 4. boxed in on all four sides: uniform random action.
///
/// Only step 4 touches the RNG. Collisions are detected with
/// `GridModel::peek`, never by calling `transition`.
pub struct GreedyManhattanPolicy {
    rng: StdRng,
    preference: [Action; 4],
}

impl GreedyManhattanPolicy {
    pub const DEFAULT_SEED: u64 = 123;

    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            preference: GREEDY_PREFERENCE,
        }
    }

    pub fn preference(&self) -> [Action; 4] {
        self.preference
    }
}

impl Default for GreedyManhattanPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SEED)
    }
}

impl Policy for GreedyManhattanPolicy {
    fn select_action(&mut self, model: &GridModel, state: Position) -> Action {
        if model.is_terminal(state) {
            return Action::Up;
        }

        let cur = model.manhattan_distance(state);

        // (action, distance after move) for every non-colliding action, in preference order.
        let mut open: [Option<(Action, u32)>; 4] = [None; 4];
        for (slot, &a) in open.iter_mut().zip(self.preference.iter()) {
            *slot = model
                .peek(state, a)
                .map(|next| (a, model.manhattan_distance(next)));
        }

        if let Some((a, _)) = open.iter().flatten().find(|&&(_, d)| d < cur) {
            return *a;
        }
        if let Some((a, _)) = open.iter().flatten().next() {
            return *a;
        }

        let actions = model.available_actions();
        let a = actions[self.rng.gen_range(0..actions.len())];
        warn!(row = state.row, col = state.col, action = %a, "greedy policy boxed in; random fallback");
        a
    }
}
