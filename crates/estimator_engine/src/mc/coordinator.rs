//! Shared-memory coordinator.
//!
//! The coordinator owns a fixed-size rayon thread pool and drives one
//! estimation run at a time:
//!
//! ```text
//! INIT ──► DISPATCH ──► AWAIT_COMPLETION ──► AGGREGATE ──► DONE
//! ```
//!
//! Each worker writes its [`WorkerResult`] into its own slot of a pre-sized
//! results vector (`par_iter_mut`), so no locks are taken. The slots are
//! only read after the parallel iterator has returned, which is the join
//! barrier: no worker can still be writing at that point.

use std::fmt;

use estimator_core::{estimate_area, AreaEstimate, Curve, Ellipse};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::config::{EstimatorConfig, RemainderPolicy};
use super::error::EngineError;
use super::sampler::{SamplerFactory, SeededSamplers};
use super::worker::{run_share, WorkerResult};

/// Phases of one estimation run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunPhase {
    /// Inputs validated, shares computed.
    Init,
    /// Workers launched.
    Dispatch,
    /// Blocking on the join barrier or collective reduction.
    AwaitCompletion,
    /// Summing partial counts and computing the estimate.
    Aggregate,
    /// Estimate available.
    Done,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Init => "init",
            RunPhase::Dispatch => "dispatch",
            RunPhase::AwaitCompletion => "await_completion",
            RunPhase::Aggregate => "aggregate",
            RunPhase::Done => "done",
        };
        f.write_str(name)
    }
}

/// Outcome of one estimation run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub(crate) run_id: Option<u64>,
    pub(crate) workers: Vec<WorkerResult>,
    pub(crate) total_inside: u64,
    pub(crate) samples_requested: u64,
    pub(crate) samples_drawn: u64,
    pub(crate) estimate: AreaEstimate,
}

impl RunReport {
    /// Run identifier the worker seeds were derived from (`None` for
    /// injected samplers).
    #[inline]
    pub fn run_id(&self) -> Option<u64> {
        self.run_id
    }

    /// Per-worker results, ordered by worker id.
    #[inline]
    pub fn workers(&self) -> &[WorkerResult] {
        &self.workers
    }

    /// Aggregated inside count.
    #[inline]
    pub fn total_inside(&self) -> u64 {
        self.total_inside
    }

    /// Requested sample budget (the estimate's denominator).
    #[inline]
    pub fn samples_requested(&self) -> u64 {
        self.samples_requested
    }

    /// Samples actually drawn (smaller than requested under `Drop`).
    #[inline]
    pub fn samples_drawn(&self) -> u64 {
        self.samples_drawn
    }

    /// Area estimate.
    #[inline]
    pub fn estimate(&self) -> &AreaEstimate {
        &self.estimate
    }
}

/// Sums worker results and derives the estimate.
pub(crate) fn aggregate(
    config: &EstimatorConfig,
    run_id: Option<u64>,
    workers: Vec<WorkerResult>,
) -> Result<RunReport, EngineError> {
    let total_inside: u64 = workers.iter().map(|w| w.inside).sum();
    let samples_drawn: u64 = workers.iter().map(|w| w.samples).sum();
    let estimate = estimate_area(total_inside, &config.bounding_box(), config.total_samples())?;

    Ok(RunReport {
        run_id,
        workers,
        total_inside,
        samples_requested: config.total_samples(),
        samples_drawn,
        estimate,
    })
}

/// Logs the samples lost to the `Drop` policy.
pub(crate) fn warn_dropped_samples(config: &EstimatorConfig) {
    let dropped = config.budget().remainder(config.workers());
    if config.remainder() == RemainderPolicy::Drop && dropped > 0 {
        warn!(
            dropped,
            total_samples = config.total_samples(),
            workers = config.workers(),
            "Sample budget not divisible by worker count; remainder samples are not drawn"
        );
    }
}

/// Shared-memory estimation coordinator.
///
/// # Examples
///
/// ```rust
/// use estimator_core::Rectangle;
/// use estimator_engine::mc::{Coordinator, EstimatorConfig};
///
/// let config = EstimatorConfig::builder()
///     .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
///     .total_samples(200_000)
///     .workers(4)
///     .build()
///     .unwrap();
///
/// let coordinator = Coordinator::new(config).unwrap();
/// let report = coordinator.run(42).unwrap();
///
/// // pi * 100 * 50 ~= 15708
/// assert!((report.estimate().value() - 15_708.0).abs() < 300.0);
/// assert_eq!(report.workers().len(), 4);
/// ```
pub struct Coordinator<C = Ellipse> {
    config: EstimatorConfig,
    curve: C,
    pool: rayon::ThreadPool,
}

impl Coordinator<Ellipse> {
    /// Creates a coordinator for the reference ellipse.
    ///
    /// # Errors
    ///
    /// See [`Coordinator::with_curve`].
    pub fn new(config: EstimatorConfig) -> Result<Self, EngineError> {
        Self::with_curve(config, Ellipse::reference())
    }
}

impl<C: Curve + Sync> Coordinator<C> {
    /// Creates a coordinator for an arbitrary curve.
    ///
    /// Builds a rayon pool with one thread per configured worker.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Config`] if the configuration is invalid
    /// - [`EngineError::ResourceAllocation`] if the thread pool cannot be built
    pub fn with_curve(config: EstimatorConfig, curve: C) -> Result<Self, EngineError> {
        config.validate()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers())
            .thread_name(|i| format!("area-worker-{i}"))
            .build()
            .map_err(|e| EngineError::ResourceAllocation(e.to_string()))?;

        Ok(Self {
            config,
            curve,
            pool,
        })
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Returns the target curve.
    #[inline]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Runs one estimation with per-worker seeds derived from `run_id`.
    ///
    /// # Errors
    ///
    /// See [`run_with`](Self::run_with).
    pub fn run(&self, run_id: u64) -> Result<RunReport, EngineError> {
        let mut report = self.run_with(&SeededSamplers::new(run_id))?;
        report.run_id = Some(run_id);
        Ok(report)
    }

    /// Runs one estimation with samplers built by `factory`.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget cannot be split or the estimate cannot
    /// be formed; both are ruled out by a validated configuration.
    pub fn run_with<F>(&self, factory: &F) -> Result<RunReport, EngineError>
    where
        F: SamplerFactory + Sync,
    {
        let workers = self.config.workers();
        let shares = self.config.budget().split(workers)?;
        let bounding_box = self.config.bounding_box();
        debug!(phase = %RunPhase::Init, workers, bounding_box = %bounding_box, "Shares computed");
        warn_dropped_samples(&self.config);

        let mut slots = vec![WorkerResult::default(); shares.len()];
        let curve = &self.curve;

        debug!(phase = %RunPhase::Dispatch, "Launching workers");
        self.pool.install(|| {
            slots
                .par_iter_mut()
                .zip(shares.par_iter())
                .for_each(|(slot, share)| {
                    *slot = run_share(share, &bounding_box, factory, curve);
                });
        });
        debug!(phase = %RunPhase::AwaitCompletion, "All workers joined");

        debug!(phase = %RunPhase::Aggregate, "Aggregating partial counts");
        let report = aggregate(&self.config, None, slots)?;

        info!(
            phase = %RunPhase::Done,
            total_inside = report.total_inside,
            samples = report.samples_requested,
            estimate = report.estimate.value(),
            "Estimation complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{RemainderPolicy, ReplaySamplers};
    use estimator_core::{Point, Rectangle};

    fn config(samples: u64, workers: usize, policy: RemainderPolicy) -> EstimatorConfig {
        EstimatorConfig::builder()
            .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
            .total_samples(samples)
            .workers(workers)
            .remainder(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_is_reproducible_for_same_run_id() {
        let coordinator = Coordinator::new(config(50_000, 4, RemainderPolicy::Drop)).unwrap();
        let a = coordinator.run(7).unwrap();
        let b = coordinator.run(7).unwrap();
        assert_eq!(a.workers(), b.workers());
        assert_eq!(a.run_id(), Some(7));
    }

    #[test]
    fn test_different_run_ids_differ() {
        let coordinator = Coordinator::new(config(50_000, 4, RemainderPolicy::Drop)).unwrap();
        let a = coordinator.run(1).unwrap();
        let b = coordinator.run(2).unwrap();
        assert_ne!(a.workers(), b.workers());
    }

    #[test]
    fn test_slots_ordered_by_worker_id() {
        let coordinator = Coordinator::new(config(1_000, 8, RemainderPolicy::Drop)).unwrap();
        let report = coordinator.run(3).unwrap();
        for (i, w) in report.workers().iter().enumerate() {
            assert_eq!(w.worker_id, i);
            assert_eq!(w.samples, 125);
        }
    }

    #[test]
    fn test_drop_policy_reports_drawn_samples() {
        let coordinator = Coordinator::new(config(1_003, 4, RemainderPolicy::Drop)).unwrap();
        let report = coordinator.run(3).unwrap();
        assert_eq!(report.samples_requested(), 1_003);
        assert_eq!(report.samples_drawn(), 1_000);
        assert_eq!(report.estimate().samples(), 1_003);
    }

    #[test]
    fn test_all_inside_stream_gives_box_area() {
        let factory = ReplaySamplers::new(vec![Point::new(0, 0)]).unwrap();
        let coordinator = Coordinator::new(config(999, 3, RemainderPolicy::Strict)).unwrap();
        let report = coordinator.run_with(&factory).unwrap();
        assert_eq!(report.total_inside(), 999);
        assert_eq!(report.estimate().value(), 20_000.0);
        assert_eq!(report.run_id(), None);
    }

    #[test]
    fn test_custom_curve() {
        struct Nothing;
        impl Curve for Nothing {
            fn contains(&self, _point: Point) -> bool {
                false
            }
        }
        let coordinator =
            Coordinator::with_curve(config(1_000, 2, RemainderPolicy::Drop), Nothing).unwrap();
        let report = coordinator.run(0).unwrap();
        assert_eq!(report.estimate().value(), 0.0);
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(RunPhase::AwaitCompletion.to_string(), "await_completion");
        assert_eq!(RunPhase::Done.to_string(), "done");
    }
}
