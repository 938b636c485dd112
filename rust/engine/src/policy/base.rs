// rust/engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Action, GridModel, Position};

/// Policy chooses the next action for `state`.
///
/// The model is only borrowed; a policy may advance nothing but its own RNG.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn select_action(&mut self, model: &GridModel, state: Position) -> Action;
}
