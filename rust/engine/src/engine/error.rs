// rust/engine/src/engine/error.rs
#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Action symbol outside {U, D, L, R}.
    #[error("unknown action: {0:?}")]
    UnknownAction(String),

    #[error("invalid grid config: {0}")]
    InvalidConfig(String),

    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
