// rust/engine/src/episode.rs
#![forbid(unsafe_code)]

use tracing::{debug, trace};

use crate::engine::{Action, GridModel, Position};
use crate::policy::Policy;

/// One recorded step: the state the action was taken FROM, plus its reward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryStep {
    pub state: Position,
    pub action: Action,
    pub reward: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EpisodeResult {
    pub steps: usize,
    pub total_reward: f64,
    pub reached_goal: bool,
    pub trajectory: Vec<TrajectoryStep>,
}

/// Run one episode from `model.start()` until the goal is reached or
/// `max_steps` actions have been taken.
///
/// `seed` is recorded for bookkeeping only; the loop itself draws no
/// randomness. Any randomness comes from the policy's own stream, which
/// keeps advancing across episodes when the same policy is reused.
pub fn simulate_episode(
    model: &GridModel,
    policy: &mut dyn Policy,
    max_steps: usize,
    seed: u64,
) -> EpisodeResult {
    debug!(seed, max_steps, start = %model.start(), "episode start");

    let mut state = model.start();
    let mut total_reward = 0.0;
    let mut trajectory: Vec<TrajectoryStep> = Vec::new();

    for t in 0..max_steps {
        // Only fires at t == 0 (start == goal); later arrivals return below.
        if model.is_terminal(state) {
            debug!(seed, steps = t, "episode started on goal");
            return EpisodeResult {
                steps: t,
                total_reward,
                reached_goal: true,
                trajectory,
            };
        }

        let action = policy.select_action(model, state);
        let tr = model.transition(state, action);
        trace!(t, from = %state, action = %action, to = %tr.next, reward = tr.reward, "step");

        trajectory.push(TrajectoryStep {
            state,
            action,
            reward: tr.reward,
        });
        total_reward += tr.reward;
        state = tr.next;

        if tr.done {
            debug!(seed, steps = t + 1, total_reward, "episode reached goal");
            return EpisodeResult {
                steps: t + 1,
                total_reward,
                reached_goal: true,
                trajectory,
            };
        }
    }

    debug!(seed, steps = max_steps, total_reward, "episode hit step budget");
    EpisodeResult {
        steps: max_steps,
        total_reward,
        reached_goal: false,
        trajectory,
    }
}
