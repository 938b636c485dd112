// rust/engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod config;
mod error;
mod model;
mod position;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use config::{GridConfig, RunConfig};
pub use error::EngineError;
pub use model::{GridModel, Rewards, Transition};
pub use position::{Action, Position};
