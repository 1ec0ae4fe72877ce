//! Distributed participants.
//!
//! [`run_participant`] is the whole program of one rank: derive the share,
//! run the worker loop, join the reduction. [`launch_local_cluster`] starts
//! one participant per rank on dedicated OS threads connected by a
//! [`channel_world`], which stands in for a process launcher.

use std::thread;

use estimator_core::{estimate_area, AreaEstimate, Curve};
use tracing::{debug, error, info};

use super::channel::channel_world;
use super::{Communicator, ReduceError, ROOT_RANK};
use crate::mc::coordinator::{aggregate, warn_dropped_samples};
use crate::mc::{EngineError, EstimatorConfig, RunPhase, RunReport, SamplerFactory, SeededSamplers};
use crate::mc::{run_share, WorkerResult};

/// Outcome of one participant.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticipantReport {
    /// Participant rank.
    pub rank: usize,
    /// Local worker result.
    pub local: WorkerResult,
    /// Reduced inside count (root only).
    pub total_inside: Option<u64>,
    /// Area estimate (root only).
    pub estimate: Option<AreaEstimate>,
}

impl ParticipantReport {
    /// Returns true if this report carries the global result.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.total_inside.is_some()
    }
}

/// Runs one rank of a distributed estimation.
///
/// The participant counts its own share and then blocks in
/// [`Communicator::reduce_sum`] until every rank has contributed. Only the
/// root receives the total and computes the estimate.
///
/// # Errors
///
/// - [`EngineError::Reduce`] with [`ReduceError::WorldSizeMismatch`] if the
///   communicator size differs from the configured participant count
/// - [`EngineError::Reduce`] if the collective fails
pub fn run_participant<M, F, C>(
    config: &EstimatorConfig,
    comm: &M,
    factory: &F,
    curve: &C,
) -> Result<ParticipantReport, EngineError>
where
    M: Communicator + ?Sized,
    F: SamplerFactory + ?Sized,
    C: Curve + ?Sized,
{
    let rank = comm.rank();
    let size = comm.size();
    if size != config.workers() {
        return Err(ReduceError::WorldSizeMismatch {
            expected: config.workers(),
            actual: size,
        }
        .into());
    }

    let share = config.budget().share_for(rank, size)?;
    let bounding_box = config.bounding_box();
    debug!(rank, offset = share.offset, samples = share.samples, "Participant share");

    let local = run_share(&share, &bounding_box, factory, curve);

    debug!(rank, phase = %RunPhase::AwaitCompletion, "Joining reduction");
    let total_inside = comm.reduce_sum(local.inside, ROOT_RANK)?;

    let estimate = match total_inside {
        Some(total) => {
            let estimate = estimate_area(total, &bounding_box, config.total_samples())?;
            info!(
                rank,
                total_inside = total,
                estimate = estimate.value(),
                "Root reduced estimate"
            );
            Some(estimate)
        }
        None => None,
    };

    Ok(ParticipantReport {
        rank,
        local,
        total_inside,
        estimate,
    })
}

/// Runs a distributed estimation with one OS thread per rank.
///
/// Rank `i` samples with the seed derived from `(run_id, i)`, so the result
/// equals a shared-memory [`Coordinator::run`](crate::mc::Coordinator::run)
/// with the same configuration and run id.
///
/// # Errors
///
/// - [`EngineError::Config`] if the configuration is invalid
/// - [`EngineError::ResourceAllocation`] if a rank thread cannot be spawned
/// - [`EngineError::ParticipantPanicked`] if a rank panics
/// - [`EngineError::Reduce`] if the collective fails
///
/// # Examples
///
/// ```rust
/// use estimator_core::{Ellipse, Rectangle};
/// use estimator_engine::dist::launch_local_cluster;
/// use estimator_engine::mc::EstimatorConfig;
///
/// let config = EstimatorConfig::builder()
///     .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
///     .total_samples(80_000)
///     .workers(4)
///     .build()
///     .unwrap();
///
/// let report = launch_local_cluster(&config, 1, &Ellipse::reference()).unwrap();
/// assert_eq!(report.workers().len(), 4);
/// assert!((report.estimate().value() - 15_708.0).abs() < 500.0);
/// ```
pub fn launch_local_cluster<C>(
    config: &EstimatorConfig,
    run_id: u64,
    curve: &C,
) -> Result<RunReport, EngineError>
where
    C: Curve + Sync,
{
    config.validate()?;
    warn_dropped_samples(config);

    let ranks = config.workers();
    let factory = SeededSamplers::new(run_id);
    let world = channel_world(ranks);
    let world_abort = world.first().map(|comm| comm.abort_handle());
    debug!(phase = %RunPhase::Dispatch, ranks, run_id, "Launching participants");

    let outcomes = thread::scope(|s| {
        let mut handles = Vec::with_capacity(ranks);
        let mut spawn_failure = None;

        for comm in world {
            let rank = comm.rank();
            let abort = comm.abort_handle();
            let factory = &factory;
            let spawned = thread::Builder::new()
                .name(format!("area-rank-{rank}"))
                .spawn_scoped(s, move || {
                    let result = run_participant(config, &comm, factory, curve);
                    if result.is_err() {
                        abort.abort();
                    }
                    result
                });

            match spawned {
                Ok(handle) => handles.push((rank, handle)),
                Err(e) => {
                    error!(rank, error = %e, "Failed to spawn participant");
                    if let Some(world_abort) = &world_abort {
                        world_abort.abort();
                    }
                    spawn_failure = Some(EngineError::ResourceAllocation(e.to_string()));
                    break;
                }
            }
        }

        let joined: Vec<(usize, thread::Result<Result<ParticipantReport, EngineError>>)> = handles
            .into_iter()
            .map(|(rank, handle)| (rank, handle.join()))
            .collect();
        (spawn_failure, joined)
    });

    let (spawn_failure, joined) = outcomes;
    if let Some(err) = spawn_failure {
        return Err(err);
    }

    let mut reports = Vec::with_capacity(ranks);
    let mut first_error = None;
    for (rank, outcome) in joined {
        match outcome {
            Ok(Ok(report)) => reports.push(report),
            Ok(Err(e)) => {
                first_error.get_or_insert(e);
            }
            Err(_) => {
                error!(rank, "Participant panicked");
                return Err(EngineError::ParticipantPanicked { rank });
            }
        }
    }
    if let Some(err) = first_error {
        return Err(err);
    }

    debug!(phase = %RunPhase::Aggregate, "Collecting participant reports");
    reports.sort_by_key(|r| r.rank);
    let reduced = reports
        .iter()
        .find_map(|r| r.total_inside)
        .ok_or_else(|| ReduceError::Protocol {
            rank: ROOT_RANK,
            detail: "root produced no total".to_string(),
        })?;

    let report = aggregate(
        config,
        Some(run_id),
        reports.into_iter().map(|r| r.local).collect(),
    )?;
    if report.total_inside() != reduced {
        return Err(ReduceError::Protocol {
            rank: ROOT_RANK,
            detail: format!(
                "reduced total {reduced} differs from local sum {}",
                report.total_inside()
            ),
        }
        .into());
    }

    info!(
        phase = %RunPhase::Done,
        total_inside = reduced,
        samples = report.samples_requested(),
        estimate = report.estimate().value(),
        "Distributed estimation complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{Coordinator, RemainderPolicy, ReplaySamplers};
    use estimator_core::{Ellipse, Point, Rectangle};

    fn config(samples: u64, ranks: usize, policy: RemainderPolicy) -> EstimatorConfig {
        EstimatorConfig::builder()
            .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
            .total_samples(samples)
            .workers(ranks)
            .remainder(policy)
            .build()
            .unwrap()
    }

    #[test]
    fn test_world_size_mismatch() {
        let world = channel_world(3);
        let factory = SeededSamplers::new(0);
        let err = run_participant(
            &config(100, 4, RemainderPolicy::Drop),
            &world[0],
            &factory,
            &Ellipse::reference(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Reduce(ReduceError::WorldSizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_single_rank_is_root() {
        let world = channel_world(1);
        let factory = ReplaySamplers::new(vec![Point::new(0, 0)]).unwrap();
        let report = run_participant(
            &config(10, 1, RemainderPolicy::Drop),
            &world[0],
            &factory,
            &Ellipse::reference(),
        )
        .unwrap();
        assert!(report.is_root());
        assert_eq!(report.total_inside, Some(10));
        assert_eq!(report.estimate.unwrap().value(), 20_000.0);
    }

    #[test]
    fn test_only_root_reports_estimate() {
        let cfg = config(1_000, 4, RemainderPolicy::Strict);
        let factory = ReplaySamplers::new(vec![Point::new(0, 0), Point::new(100, 50)]).unwrap();
        let world = channel_world(4);
        let reports: Vec<ParticipantReport> = thread::scope(|s| {
            let handles: Vec<_> = world
                .into_iter()
                .map(|comm| {
                    let (cfg, factory) = (&cfg, &factory);
                    s.spawn(move || {
                        run_participant(cfg, &comm, factory, &Ellipse::reference()).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(reports.iter().filter(|r| r.is_root()).count(), 1);
        assert!(reports[0].is_root());
        // alternating inside/outside stream: exactly half inside
        assert_eq!(reports[0].total_inside, Some(500));
        assert!(reports[1..].iter().all(|r| r.estimate.is_none()));
    }

    #[test]
    fn test_cluster_matches_coordinator() {
        for ranks in [1, 3, 8] {
            let cfg = config(30_001, ranks, RemainderPolicy::Spread);
            let distributed = launch_local_cluster(&cfg, 77, &Ellipse::reference()).unwrap();
            let shared = Coordinator::new(cfg).unwrap().run(77).unwrap();
            assert_eq!(distributed.workers(), shared.workers());
            assert_eq!(distributed.estimate(), shared.estimate());
            assert_eq!(distributed.run_id(), Some(77));
        }
    }

    #[test]
    fn test_cluster_panicking_curve() {
        struct Explodes;
        impl Curve for Explodes {
            fn contains(&self, _point: Point) -> bool {
                panic!("curve failure");
            }
        }
        let err = launch_local_cluster(&config(100, 2, RemainderPolicy::Drop), 1, &Explodes)
            .unwrap_err();
        assert!(matches!(err, EngineError::ParticipantPanicked { .. }));
    }
}
