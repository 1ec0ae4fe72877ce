//! CLI error types

use estimator_core::GeometryError;
use estimator_engine::mc::ConfigError as EngineConfigError;
use estimator_engine::EngineError;
use thiserror::Error;

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line arguments
    #[error("Usage error: {0}")]
    Usage(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    /// Estimation engine failure
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Invalid bounding box or curve
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

impl From<EngineConfigError> for CliError {
    fn from(err: EngineConfigError) -> Self {
        CliError::Engine(EngineError::Config(err))
    }
}
