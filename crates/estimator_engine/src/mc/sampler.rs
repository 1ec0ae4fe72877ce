//! Point samplers.
//!
//! A [`PointSampler`] turns private random state into points inside a
//! bounding box. Each worker owns exactly one sampler; a [`SamplerFactory`]
//! builds it from the worker's [`WorkerShare`].
//!
//! Two families are provided:
//!
//! - [`BoxSampler`] / [`SeededSamplers`]: production sampling from a seeded
//!   PRNG, one independent stream per worker
//! - [`ReplaySampler`] / [`ReplaySamplers`]: deterministic replay of a fixed
//!   point sequence, positioned at the worker's offset in the global stream

use std::sync::Arc;

use estimator_core::{Point, Rectangle};
use rand::RngCore;

use super::budget::WorkerShare;
use super::error::ConfigError;
use crate::rng::SamplerRng;

/// Source of sample points for one worker.
pub trait PointSampler {
    /// Returns the next point for `bounding_box`.
    fn sample(&mut self, bounding_box: &Rectangle) -> Point;
}

/// Creates one sampler per worker share.
///
/// Factories are shared read-only between workers; the sampler they return
/// is owned by a single worker.
pub trait SamplerFactory {
    /// Sampler type handed to each worker.
    type Sampler: PointSampler;

    /// Builds the sampler for `share`.
    fn sampler_for(&self, share: &WorkerShare) -> Self::Sampler;
}

/// Uniform-in-box sampler over a raw 32-bit generator.
///
/// Draws two raw values, reduces them modulo the horizontal and vertical
/// spans and offsets them by the left and bottom bounds, giving points in
/// `[left, right) x [bottom, top)`.
///
/// # Modulo bias
///
/// When a span does not divide 2³², low residues are slightly more likely
/// than high ones (relative bias below `span / 2³²`). This is negligible
/// for the estimator's precision and is accepted instead of rejection
/// sampling.
///
/// # Examples
///
/// ```rust
/// use estimator_core::Rectangle;
/// use estimator_engine::mc::{BoxSampler, PointSampler};
/// use estimator_engine::rng::SamplerRng;
///
/// let rect = Rectangle::new(-100, -50, 100, 50).unwrap();
/// let mut sampler = BoxSampler::new(SamplerRng::from_seed(42));
///
/// for _ in 0..1_000 {
///     assert!(rect.contains(sampler.sample(&rect)));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct BoxSampler<R> {
    rng: R,
}

impl<R: RngCore> BoxSampler<R> {
    /// Wraps a generator.
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Returns the underlying generator.
    #[inline]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// Consumes the sampler, returning the generator.
    #[inline]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

/// Maps a raw draw into `[lower, lower + span)`.
#[inline]
fn offset_into_span(lower: i32, raw: u32, span: u64) -> i32 {
    // lower + (raw % span) < upper <= i32::MAX, so the cast is lossless
    (i64::from(lower) + (u64::from(raw) % span) as i64) as i32
}

impl<R: RngCore> PointSampler for BoxSampler<R> {
    #[inline]
    fn sample(&mut self, bounding_box: &Rectangle) -> Point {
        let x = offset_into_span(bounding_box.left(), self.rng.next_u32(), bounding_box.width());
        let y = offset_into_span(
            bounding_box.bottom(),
            self.rng.next_u32(),
            bounding_box.height(),
        );
        Point::new(x, y)
    }
}

/// Production factory: one [`SamplerRng`] per worker, seeded from the run id.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SeededSamplers {
    run_id: u64,
}

impl SeededSamplers {
    /// Creates the factory for run `run_id`.
    #[inline]
    pub fn new(run_id: u64) -> Self {
        Self { run_id }
    }

    /// Run identifier the seeds are derived from.
    #[inline]
    pub fn run_id(&self) -> u64 {
        self.run_id
    }
}

impl SamplerFactory for SeededSamplers {
    type Sampler = BoxSampler<SamplerRng>;

    fn sampler_for(&self, share: &WorkerShare) -> Self::Sampler {
        BoxSampler::new(SamplerRng::for_worker(self.run_id, share.worker_id))
    }
}

/// Deterministic sampler replaying a fixed point sequence.
///
/// Ignores the bounding box and returns the stored points in order,
/// wrapping around at the end.
#[derive(Clone, Debug)]
pub struct ReplaySampler {
    points: Arc<[Point]>,
    cursor: usize,
}

impl ReplaySampler {
    /// Index of the next point to be returned.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl PointSampler for ReplaySampler {
    #[inline]
    fn sample(&mut self, _bounding_box: &Rectangle) -> Point {
        let point = self.points[self.cursor];
        self.cursor = (self.cursor + 1) % self.points.len();
        point
    }
}

/// Factory replaying one shared global point stream.
///
/// Worker `i` starts at its share offset, so however the budget is split the
/// union of all workers' samples is the same prefix of the stream.
///
/// # Examples
///
/// ```rust
/// use estimator_core::Point;
/// use estimator_engine::mc::{PointSampler, ReplaySamplers, SamplerFactory, WorkerShare};
///
/// let factory = ReplaySamplers::new(vec![Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]).unwrap();
/// let share = WorkerShare { worker_id: 1, offset: 2, samples: 1 };
/// let mut sampler = factory.sampler_for(&share);
///
/// let rect = estimator_core::Rectangle::new(0, 0, 10, 10).unwrap();
/// assert_eq!(sampler.sample(&rect), Point::new(2, 2));
/// assert_eq!(sampler.sample(&rect), Point::new(0, 0)); // wraps around
/// ```
#[derive(Clone, Debug)]
pub struct ReplaySamplers {
    points: Arc<[Point]>,
}

impl ReplaySamplers {
    /// Creates a replay factory over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyReplayStream`] if `points` is empty.
    pub fn new(points: Vec<Point>) -> Result<Self, ConfigError> {
        if points.is_empty() {
            return Err(ConfigError::EmptyReplayStream);
        }
        Ok(Self {
            points: points.into(),
        })
    }

    /// Records `len` points drawn from `sampler` into a replay factory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyReplayStream`] if `len` is 0.
    pub fn record<S: PointSampler>(
        sampler: &mut S,
        bounding_box: &Rectangle,
        len: usize,
    ) -> Result<Self, ConfigError> {
        Self::new((0..len).map(|_| sampler.sample(bounding_box)).collect())
    }

    /// The replayed points.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl SamplerFactory for ReplaySamplers {
    type Sampler = ReplaySampler;

    fn sampler_for(&self, share: &WorkerShare) -> Self::Sampler {
        let len = self.points.len() as u64;
        ReplaySampler {
            points: Arc::clone(&self.points),
            cursor: (share.offset % len) as usize,
        }
    }
}
