//! Worker: the unit of parallel work.
//!
//! A worker draws its assigned number of samples from its own sampler,
//! classifies each against the curve and returns the local inside count.
//! It reads the bounding box and the curve through shared references and
//! owns nothing else, so any number of workers can run concurrently as long
//! as each has its own sampler.

use estimator_core::{Curve, Rectangle};
use tracing::debug;

use super::budget::WorkerShare;
use super::sampler::{PointSampler, SamplerFactory};

/// Local result of one worker.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkerResult {
    /// Worker (thread index or rank).
    pub worker_id: usize,
    /// Samples drawn.
    pub samples: u64,
    /// Samples classified inside the curve.
    pub inside: u64,
}

/// Runs `samples` sample/classify iterations and counts the inside points.
///
/// # Examples
///
/// ```rust
/// use estimator_core::{Ellipse, Rectangle};
/// use estimator_engine::mc::{count_inside, BoxSampler};
/// use estimator_engine::rng::SamplerRng;
///
/// let rect = Rectangle::new(-100, -50, 100, 50).unwrap();
/// let mut sampler = BoxSampler::new(SamplerRng::from_seed(1));
///
/// let result = count_inside(0, &rect, 10_000, &mut sampler, &Ellipse::reference());
/// assert_eq!(result.samples, 10_000);
/// assert!(result.inside > 7_000 && result.inside < 8_700);
/// ```
pub fn count_inside<S, C>(
    worker_id: usize,
    bounding_box: &Rectangle,
    samples: u64,
    sampler: &mut S,
    curve: &C,
) -> WorkerResult
where
    S: PointSampler + ?Sized,
    C: Curve + ?Sized,
{
    let mut inside = 0u64;
    for _ in 0..samples {
        if curve.contains(sampler.sample(bounding_box)) {
            inside += 1;
        }
    }

    debug!(worker_id, samples, inside, "Worker finished");

    WorkerResult {
        worker_id,
        samples,
        inside,
    }
}

/// Builds the worker's sampler from `factory` and runs its share.
pub fn run_share<F, C>(
    share: &WorkerShare,
    bounding_box: &Rectangle,
    factory: &F,
    curve: &C,
) -> WorkerResult
where
    F: SamplerFactory + ?Sized,
    C: Curve + ?Sized,
{
    let mut sampler = factory.sampler_for(share);
    count_inside(share.worker_id, bounding_box, share.samples, &mut sampler, curve)
}
