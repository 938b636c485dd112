// rust/engine/src/engine/model.rs
#![forbid(unsafe_code)]

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::engine::error::EngineError;
use crate::engine::position::{Action, Position};

/// Reward constants plus the discount factor.
///
/// `gamma` is carried as configuration only; nothing in the transition
/// kernel reads it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rewards {
    pub step_reward: f64,
    pub wall_penalty: f64,
    pub goal_reward: f64,
    pub gamma: f64,
}

impl Default for Rewards {
    fn default() -> Self {
        Self {
            step_reward: -1.0,
            wall_penalty: -2.0,
            goal_reward: 10.0,
            gamma: 0.9,
        }
    }
}

/// Result of one deterministic transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub next: Position,
    pub reward: f64,
    pub done: bool,
}

/// Deterministic N x N grid world with walls and a single goal.
///
/// Built once per run and never mutated afterwards. Start/goal/walls are
/// expected to lie inside the grid, but this is NOT checked here
/// (see `GridConfig::validate` for the opt-in check).
#[derive(Clone, Debug, PartialEq)]
pub struct GridModel {
    size: i32,
    walls: FxHashSet<Position>,
    start: Position,
    goal: Position,
    rewards: Rewards,
}

impl GridModel {
    pub fn new<I>(size: i32, walls: I, start: Position, goal: Position, rewards: Rewards) -> Self
    where
        I: IntoIterator<Item = Position>,
    {
        Self {
            size,
            walls: walls.into_iter().collect(),
            start,
            goal,
            rewards,
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn rewards(&self) -> Rewards {
        self.rewards
    }

    pub fn gamma(&self) -> f64 {
        self.rewards.gamma
    }

    pub fn walls(&self) -> impl Iterator<Item = Position> + '_ {
        self.walls.iter().copied()
    }

    pub fn wall_count(&self) -> usize {
        self.walls.len()
    }

    // -------------------------------------------------------------------------
    // Cell predicates
    // -------------------------------------------------------------------------

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        (0..self.size).contains(&pos.row) && (0..self.size).contains(&pos.col)
    }

    #[inline]
    pub fn is_wall(&self, pos: Position) -> bool {
        self.walls.contains(&pos)
    }

    #[inline]
    pub fn is_terminal(&self, pos: Position) -> bool {
        pos == self.goal
    }

    /// All four actions, always. Termination is the caller's job.
    pub fn available_actions(&self) -> [Action; 4] {
        Action::ALL
    }

    // -------------------------------------------------------------------------
    // Transition kernel
    // -------------------------------------------------------------------------

    /// Would-be destination of `action`, or `None` if the move leaves the
    /// grid or runs into a wall. Pure: no reward, no terminal handling.
    #[inline]
    pub fn peek(&self, pos: Position, action: Action) -> Option<Position> {
        let cand = pos.offset(action);
        if !self.in_bounds(cand) || self.is_wall(cand) {
            None
        } else {
            Some(cand)
        }
    }

    /// One deterministic step.
    ///
    /// - terminal `pos`: stays put, reward 0, done.
    /// - blocked move (edge or wall): stays put, `wall_penalty`, not done.
    /// - move onto the goal: `goal_reward`, done.
    /// - any other move: `step_reward`, not done.
    pub fn transition(&self, pos: Position, action: Action) -> Transition {
        if self.is_terminal(pos) {
            return Transition {
                next: pos,
                reward: 0.0,
                done: true,
            };
        }

        match self.peek(pos, action) {
            None => Transition {
                next: pos,
                reward: self.rewards.wall_penalty,
                done: false,
            },
            Some(next) if self.is_terminal(next) => Transition {
                next,
                reward: self.rewards.goal_reward,
                done: true,
            },
            Some(next) => Transition {
                next,
                reward: self.rewards.step_reward,
                done: false,
            },
        }
    }

    /// `transition` for an action given by symbol (`U`/`D`/`L`/`R`).
    pub fn transition_symbol(&self, pos: Position, symbol: &str) -> Result<Transition, EngineError> {
        let action: Action = symbol.parse()?;
        Ok(self.transition(pos, action))
    }

    #[inline]
    pub fn manhattan_distance(&self, pos: Position) -> u32 {
        pos.row.abs_diff(self.goal.row) + pos.col.abs_diff(self.goal.col)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// ASCII layout: `#` wall, `S` start, `G` goal, `.` free.
    pub fn render_ascii(&self) -> String {
        let n = self.size.max(0);
        let mut out = String::with_capacity(((n + 1) * n) as usize);
        for r in 0..n {
            for c in 0..n {
                let p = Position::new(r, c);
                let ch = if p == self.goal {
                    'G'
                } else if p == self.start {
                    'S'
                } else if self.is_wall(p) {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
