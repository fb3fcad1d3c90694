use std::path::PathBuf;

use crate::types::BodyId;

/// Startup failures: a missing or invalid static body parameter.
/// Always fatal, scene assembly never starts with a bad config.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    Parse(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Steady-state failures raised by the speed state and the updater
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    #[error("no speed registered for {0}")]
    NotFound(BodyId),

    #[error("speed state out of sync: {0} has no entry")]
    StateDesync(BodyId),

    #[error("speed {value} for {body} outside [{min}, {max}]")]
    InputOutOfRange {
        body: BodyId,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum OrreryError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
