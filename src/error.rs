//! Error types for configuration, population I/O and simulation runs

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while evaluating an arithmetic config value
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExprError {
    #[error("unexpected character '{0}'")]
    UnexpectedChar(char),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("unexpected trailing input at position {0}")]
    TrailingInput(usize),
    #[error("invalid number literal '{0}'")]
    InvalidLiteral(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow")]
    Overflow,
}

/// Errors raised while building the typed simulation config
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing required config key '{0}'")]
    MissingKey(&'static str),
    #[error("invalid value for config key '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// Errors raised while reading or writing population files
#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("failed to access population file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write population: {0}")]
    Write(#[from] std::io::Error),
}

/// Top-level error for a file-driven simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Population(#[from] PopulationError),
    #[error("failed to report progress: {0}")]
    Progress(#[from] std::io::Error),
    #[error("failed to write summary {path}: {source}")]
    Summary {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Serialize(#[from] serde_json::Error),
}
