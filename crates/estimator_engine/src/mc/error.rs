//! Error types for the estimation engine.
//!
//! This module defines structured error types for configuration validation
//! (raised before any sampling starts) and for run-time failures of the
//! worker pool or of the distributed reduction.

use estimator_core::{EstimateError, GeometryError};
use thiserror::Error;

use super::config::MAX_WORKERS;
use crate::dist::ReduceError;

/// Configuration error for the estimator.
///
/// These errors occur during construction when invalid parameters are provided.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Total sample count is zero.
    #[error("Invalid sample count {0}: must be at least 1")]
    InvalidSampleCount(u64),

    /// Worker count outside valid range [1, MAX_WORKERS].
    #[error("Invalid worker count {0}: must be in range [1, {max}]", max = MAX_WORKERS)]
    InvalidWorkerCount(usize),

    /// Budget not evenly divisible under the strict remainder policy.
    #[error(
        "Sample count {samples} is not divisible by worker count {workers} \
         (remainder policy 'strict')"
    )]
    UnevenBudget {
        /// Requested sample count
        samples: u64,
        /// Worker count
        workers: usize,
    },

    /// Builder finished without a bounding box.
    #[error("Bounding box not set")]
    MissingBoundingBox,

    /// Remainder policy name not recognised.
    #[error("Unknown remainder policy '{0}': expected drop, first-worker, spread or strict")]
    UnknownRemainderPolicy(String),

    /// Replay sampler constructed from an empty point sequence.
    #[error("Replay stream must contain at least one point")]
    EmptyReplayStream,

    /// Geometry rejected while building the configuration.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors raised while running an estimation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid configuration (fatal before dispatch).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Counts could not be turned into an area.
    #[error(transparent)]
    Estimate(#[from] EstimateError),

    /// Collective reduction between participants failed.
    #[error(transparent)]
    Reduce(#[from] ReduceError),

    /// Worker pool or participant thread could not be created.
    #[error("Resource allocation failed: {0}")]
    ResourceAllocation(String),

    /// A distributed participant panicked before finishing.
    #[error("Participant {rank} panicked")]
    ParticipantPanicked {
        /// Rank of the participant
        rank: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidSampleCount(0);
        assert!(err.to_string().contains("Invalid sample count 0"));

        let err = ConfigError::InvalidWorkerCount(0);
        assert_eq!(
            err.to_string(),
            format!("Invalid worker count 0: must be in range [1, {}]", MAX_WORKERS)
        );

        let err = ConfigError::UnevenBudget {
            samples: 10,
            workers: 3,
        };
        assert!(err.to_string().contains("not divisible by worker count 3"));
    }

    #[test]
    fn test_engine_error_from_config() {
        let err: EngineError = ConfigError::MissingBoundingBox.into();
        assert!(matches!(err, EngineError::Config(ConfigError::MissingBoundingBox)));
        assert_eq!(err.to_string(), "Bounding box not set");
    }
}
