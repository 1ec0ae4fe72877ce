//! Estimator configuration.
//!
//! This module provides the immutable run configuration and its builder.
//! The bounding box lives here and nowhere else: the coordinator and every
//! worker receive it by reference from the configuration.

use std::fmt;
use std::str::FromStr;

use estimator_core::Rectangle;

use super::budget::SampleBudget;
use super::error::ConfigError;

/// Maximum number of workers (threads or participants) allowed.
pub const MAX_WORKERS: usize = 1024;

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 8;

/// What happens to `total_samples % workers` leftover samples.
///
/// - `Drop`: leftover samples are never drawn (reference behaviour)
/// - `FirstWorker`: worker 0 draws all leftover samples
/// - `Spread`: the first `remainder` workers draw one extra sample each
/// - `Strict`: uneven budgets are rejected before dispatch
///
/// With `Drop` the estimate is still divided by the requested total, so a
/// non-zero remainder biases the estimate slightly downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RemainderPolicy {
    /// Leftover samples are not drawn.
    #[default]
    Drop,
    /// Worker 0 draws the leftover samples.
    FirstWorker,
    /// Leftover samples are spread one per worker from worker 0 upwards.
    Spread,
    /// Budget must divide evenly.
    Strict,
}

impl RemainderPolicy {
    /// Canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RemainderPolicy::Drop => "drop",
            RemainderPolicy::FirstWorker => "first-worker",
            RemainderPolicy::Spread => "spread",
            RemainderPolicy::Strict => "strict",
        }
    }
}

impl FromStr for RemainderPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(RemainderPolicy::Drop),
            "first-worker" | "first_worker" | "first" => Ok(RemainderPolicy::FirstWorker),
            "spread" => Ok(RemainderPolicy::Spread),
            "strict" => Ok(RemainderPolicy::Strict),
            _ => Err(ConfigError::UnknownRemainderPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for RemainderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estimator configuration.
///
/// Immutable configuration for one or more estimation runs.
/// Use [`EstimatorConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use estimator_core::Rectangle;
/// use estimator_engine::mc::{EstimatorConfig, RemainderPolicy};
///
/// let config = EstimatorConfig::builder()
///     .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
///     .total_samples(1_000_000)
///     .workers(4)
///     .remainder(RemainderPolicy::Spread)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.workers(), 4);
/// assert_eq!(config.total_samples(), 1_000_000);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Box the samples are drawn from.
    bounding_box: Rectangle,
    /// Requested sample budget.
    total_samples: u64,
    /// Number of workers (threads or participants).
    workers: usize,
    /// Leftover sample policy.
    remainder: RemainderPolicy,
}

impl EstimatorConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EstimatorConfigBuilder {
        EstimatorConfigBuilder::default()
    }

    /// Returns the bounding box.
    #[inline]
    pub fn bounding_box(&self) -> Rectangle {
        self.bounding_box
    }

    /// Returns the requested sample budget.
    #[inline]
    pub fn total_samples(&self) -> u64 {
        self.total_samples
    }

    /// Returns the number of workers.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Returns the remainder policy.
    #[inline]
    pub fn remainder(&self) -> RemainderPolicy {
        self.remainder
    }

    /// Returns the sample budget with its remainder policy.
    #[inline]
    pub fn budget(&self) -> SampleBudget {
        SampleBudget::new(self.total_samples, self.remainder)
    }

    /// Returns a copy of this configuration with a different worker count.
    ///
    /// # Errors
    ///
    /// Same as [`validate`](Self::validate).
    pub fn with_workers(&self, workers: usize) -> Result<Self, ConfigError> {
        let config = Self {
            workers,
            ..self.clone()
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `total_samples` is 0
    /// - `workers` is 0 or greater than [`MAX_WORKERS`]
    /// - the policy is `Strict` and the budget does not divide evenly
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_samples == 0 {
            return Err(ConfigError::InvalidSampleCount(self.total_samples));
        }
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount(self.workers));
        }
        if self.remainder == RemainderPolicy::Strict
            && self.budget().remainder(self.workers) != 0
        {
            return Err(ConfigError::UnevenBudget {
                samples: self.total_samples,
                workers: self.workers,
            });
        }
        Ok(())
    }
}

/// Builder for [`EstimatorConfig`].
///
/// Provides a fluent API with validation at build time.
#[derive(Clone, Debug, Default)]
pub struct EstimatorConfigBuilder {
    bounding_box: Option<Rectangle>,
    total_samples: Option<u64>,
    workers: Option<usize>,
    remainder: RemainderPolicy,
}

impl EstimatorConfigBuilder {
    /// Sets the bounding box.
    #[inline]
    pub fn bounding_box(mut self, bounding_box: Rectangle) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    /// Sets the total sample budget.
    #[inline]
    pub fn total_samples(mut self, total_samples: u64) -> Self {
        self.total_samples = Some(total_samples);
        self
    }

    /// Sets the number of workers (default [`DEFAULT_WORKERS`]).
    #[inline]
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sets the remainder policy (default [`RemainderPolicy::Drop`]).
    #[inline]
    pub fn remainder(mut self, remainder: RemainderPolicy) -> Self {
        self.remainder = remainder;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingBoundingBox`] if no bounding box was set
    /// - Any error from [`EstimatorConfig::validate`]
    pub fn build(self) -> Result<EstimatorConfig, ConfigError> {
        let config = EstimatorConfig {
            bounding_box: self.bounding_box.ok_or(ConfigError::MissingBoundingBox)?,
            total_samples: self.total_samples.unwrap_or(0),
            workers: self.workers.unwrap_or(DEFAULT_WORKERS),
            remainder: self.remainder,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rectangle {
        Rectangle::new(0, 0, 100, 100).unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let config = EstimatorConfig::builder()
            .bounding_box(rect())
            .total_samples(100)
            .build()
            .unwrap();
        assert_eq!(config.workers(), DEFAULT_WORKERS);
        assert_eq!(config.remainder(), RemainderPolicy::Drop);
        assert_eq!(config.bounding_box(), rect());
    }

    #[test]
    fn test_missing_fields() {
        assert_eq!(
            EstimatorConfig::builder().total_samples(10).build(),
            Err(ConfigError::MissingBoundingBox)
        );
        assert_eq!(
            EstimatorConfig::builder().bounding_box(rect()).build(),
            Err(ConfigError::InvalidSampleCount(0))
        );
    }

    #[test]
    fn test_worker_count_limits() {
        let builder = EstimatorConfig::builder()
            .bounding_box(rect())
            .total_samples(10);
        assert_eq!(
            builder.clone().workers(0).build(),
            Err(ConfigError::InvalidWorkerCount(0))
        );
        assert_eq!(
            builder.clone().workers(MAX_WORKERS + 1).build(),
            Err(ConfigError::InvalidWorkerCount(MAX_WORKERS + 1))
        );
        assert!(builder.workers(MAX_WORKERS).build().is_ok());
    }

    #[test]
    fn test_strict_policy_rejects_uneven_budget() {
        let builder = EstimatorConfig::builder()
            .bounding_box(rect())
            .remainder(RemainderPolicy::Strict)
            .workers(3);
        assert_eq!(
            builder.clone().total_samples(10).build(),
            Err(ConfigError::UnevenBudget {
                samples: 10,
                workers: 3
            })
        );
        assert!(builder.total_samples(9).build().is_ok());
    }

    #[test]
    fn test_with_workers() {
        let config = EstimatorConfig::builder()
            .bounding_box(rect())
            .total_samples(10)
            .build()
            .unwrap();
        assert_eq!(config.with_workers(1).unwrap().workers(), 1);
        assert!(config.with_workers(0).is_err());
    }

    #[test]
    fn test_remainder_policy_parsing() {
        assert_eq!("drop".parse::<RemainderPolicy>().unwrap(), RemainderPolicy::Drop);
        assert_eq!(
            "First-Worker".parse::<RemainderPolicy>().unwrap(),
            RemainderPolicy::FirstWorker
        );
        assert_eq!("spread".parse::<RemainderPolicy>().unwrap(), RemainderPolicy::Spread);
        assert_eq!("STRICT".parse::<RemainderPolicy>().unwrap(), RemainderPolicy::Strict);
        assert!(matches!(
            "round-robin".parse::<RemainderPolicy>(),
            Err(ConfigError::UnknownRemainderPolicy(_))
        ));

        for policy in [
            RemainderPolicy::Drop,
            RemainderPolicy::FirstWorker,
            RemainderPolicy::Spread,
            RemainderPolicy::Strict,
        ] {
            assert_eq!(policy.to_string().parse::<RemainderPolicy>().unwrap(), policy);
        }
    }
}
