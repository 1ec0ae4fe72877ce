//! Distributed-memory execution.
//!
//! In the distributed model every participant is an independent unit of
//! execution identified by its rank. Participants share no mutable state:
//! each derives its own share of the budget from its rank, runs the same
//! worker logic as the shared-memory coordinator, and then joins a blocking
//! collective sum through a [`Communicator`].
//!
//! # Architecture
//!
//! ```text
//! launch_local_cluster
//! ├── channel_world(n)          (one inbox per rank)
//! └── rank 0..n (own thread)
//!     └── run_participant
//!         ├── SampleBudget::share_for(rank)
//!         ├── run_share          (worker loop)
//!         └── reduce_sum(root=0) (blocks until all ranks contributed)
//! ```
//!
//! The collective is abstracted behind [`Communicator`], so a
//! process-level transport can replace [`ChannelCommunicator`] without
//! touching the participant logic.

mod channel;
mod participant;

pub use channel::{channel_world, ChannelCommunicator, WorldAbortHandle};
pub use participant::{launch_local_cluster, run_participant, ParticipantReport};

use thiserror::Error;

/// Rank that receives the reduced total and reports the estimate.
pub const ROOT_RANK: usize = 0;

/// Errors raised by collective operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// Root rank outside the world.
    #[error("Invalid root rank {root} for world of size {size}")]
    InvalidRoot {
        /// Requested root
        root: usize,
        /// World size
        size: usize,
    },

    /// Communicator world does not match the configured participant count.
    #[error("World size {actual} does not match configured participant count {expected}")]
    WorldSizeMismatch {
        /// Configured participants
        expected: usize,
        /// Communicator size
        actual: usize,
    },

    /// A peer went away before the collective completed.
    #[error("Rank {rank} disconnected during reduction")]
    Disconnected {
        /// Rank whose channel closed
        rank: usize,
    },

    /// Unexpected message for the current protocol step.
    #[error("Protocol violation at rank {rank}: {detail}")]
    Protocol {
        /// Rank that observed the violation
        rank: usize,
        /// What went wrong
        detail: String,
    },
}

/// Message-passing collective operations over a fixed world of ranks.
pub trait Communicator {
    /// This participant's rank in `[0, size)`.
    fn rank(&self) -> usize;

    /// Number of participants.
    fn size(&self) -> usize;

    /// Sums `local` over all ranks.
    ///
    /// Blocks every participant until all ranks have contributed. Returns
    /// `Some(total)` at `root` and `None` everywhere else.
    ///
    /// # Errors
    ///
    /// See [`ReduceError`].
    fn reduce_sum(&self, local: u64, root: usize) -> Result<Option<u64>, ReduceError>;

    /// Sums `local` over all ranks and returns the total on every rank.
    ///
    /// # Errors
    ///
    /// See [`ReduceError`].
    fn all_reduce_sum(&self, local: u64) -> Result<u64, ReduceError>;

    /// Returns true if this participant is the root.
    #[inline]
    fn is_root(&self) -> bool {
        self.rank() == ROOT_RANK
    }
}
