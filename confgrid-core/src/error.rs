//! Error types for confgrid.
//!
//! Uses `thiserror` for public API error types with structured error variants
//! covering configuration, grid bounds, and metric computation.

use std::path::PathBuf;

/// Top-level error type for the confgrid core library.
#[derive(Debug, thiserror::Error)]
pub enum ConfgridError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Metric error: {0}")]
    Metric(#[from] MetricError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Failed to load configuration: {message}")]
    Load { message: String },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

impl From<Box<figment::Error>> for ConfigError {
    fn from(err: Box<figment::Error>) -> Self {
        ConfigError::Load {
            message: err.to_string(),
        }
    }
}

/// Errors from grid bounds and count derivation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Population total must be greater than zero")]
    EmptyPopulation,

    #[error("Counts exceed population total: requested {requested} of {total}")]
    CountsExceedTotal { total: u32, requested: u32 },
}

/// Errors from metric computation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MetricError {
    #[error("Zero denominator while computing {metric}")]
    ZeroDenominator { metric: &'static str },

    #[error("Confusion matrix is empty")]
    EmptyMatrix,
}

/// Convenience result type for confgrid operations.
pub type Result<T> = std::result::Result<T, ConfgridError>;
