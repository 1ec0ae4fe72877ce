//! Sample budget partitioning.
//!
//! Splits a total sample count into contiguous per-worker shares. Shares are
//! laid out back to back over one conceptual global sample stream: worker
//! `i` owns samples `[offset, offset + samples)`. Deterministic samplers use
//! the offset to start at the right position, which is what makes the
//! aggregated count independent of the worker count.

use super::config::RemainderPolicy;
use super::error::ConfigError;

/// One worker's slice of the sample budget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkerShare {
    /// Worker (thread index or rank).
    pub worker_id: usize,
    /// Index of this worker's first sample in the global stream.
    pub offset: u64,
    /// Number of samples this worker draws.
    pub samples: u64,
}

/// Total sample budget plus the policy for leftover samples.
///
/// # Examples
///
/// ```rust
/// use estimator_engine::mc::{RemainderPolicy, SampleBudget};
///
/// let budget = SampleBudget::new(10, RemainderPolicy::Spread);
/// let shares = budget.split(4).unwrap();
/// let samples: Vec<u64> = shares.iter().map(|s| s.samples).collect();
/// assert_eq!(samples, vec![3, 3, 2, 2]);
///
/// let dropped = SampleBudget::new(10, RemainderPolicy::Drop);
/// assert_eq!(dropped.drawn(4), 8);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SampleBudget {
    total: u64,
    policy: RemainderPolicy,
}

impl SampleBudget {
    /// Creates a budget.
    #[inline]
    pub fn new(total: u64, policy: RemainderPolicy) -> Self {
        Self { total, policy }
    }

    /// Requested sample count.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Remainder policy.
    #[inline]
    pub fn policy(&self) -> RemainderPolicy {
        self.policy
    }

    /// Per-worker base share `total / workers`.
    #[inline]
    pub fn base_share(&self, workers: usize) -> u64 {
        self.total / workers.max(1) as u64
    }

    /// Leftover samples `total % workers`.
    #[inline]
    pub fn remainder(&self, workers: usize) -> u64 {
        self.total % workers.max(1) as u64
    }

    /// Samples actually drawn across all workers under this policy.
    pub fn drawn(&self, workers: usize) -> u64 {
        match self.policy {
            RemainderPolicy::Drop | RemainderPolicy::Strict => {
                self.base_share(workers) * workers as u64
            }
            RemainderPolicy::FirstWorker | RemainderPolicy::Spread => self.total,
        }
    }

    /// Computes the share of one worker without materialising the others.
    ///
    /// Distributed participants use this to derive their own share from
    /// their rank.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidWorkerCount`] if `workers` is 0 or
    ///   `worker_id >= workers`
    /// - [`ConfigError::UnevenBudget`] under `Strict` with a non-zero remainder
    pub fn share_for(&self, worker_id: usize, workers: usize) -> Result<WorkerShare, ConfigError> {
        if workers == 0 || worker_id >= workers {
            return Err(ConfigError::InvalidWorkerCount(workers));
        }

        let base = self.base_share(workers);
        let rem = self.remainder(workers);
        let id = worker_id as u64;

        let (offset, samples) = match self.policy {
            RemainderPolicy::Drop => (id * base, base),
            RemainderPolicy::Strict => {
                if rem != 0 {
                    return Err(ConfigError::UnevenBudget {
                        samples: self.total,
                        workers,
                    });
                }
                (id * base, base)
            }
            RemainderPolicy::FirstWorker => {
                if id == 0 {
                    (0, base + rem)
                } else {
                    (id * base + rem, base)
                }
            }
            RemainderPolicy::Spread => {
                let extra = u64::from(id < rem);
                (id * base + id.min(rem), base + extra)
            }
        };

        Ok(WorkerShare {
            worker_id,
            offset,
            samples,
        })
    }

    /// Splits the budget into one share per worker, ordered by worker id.
    ///
    /// # Errors
    ///
    /// Same as [`share_for`](Self::share_for).
    pub fn split(&self, workers: usize) -> Result<Vec<WorkerShare>, ConfigError> {
        (0..workers.max(1))
            .map(|worker_id| self.share_for(worker_id, workers))
            .collect()
    }
}
