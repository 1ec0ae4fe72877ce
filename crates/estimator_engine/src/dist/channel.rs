//! Channel-based communicator.
//!
//! Every rank owns one inbox. A reduction is two message waves:
//!
//! 1. each non-root rank sends `Contribution { from, value }` to the root
//!    and blocks on its inbox;
//! 2. once the root has one contribution from every other rank it sends
//!    `Release { total }` to all of them.
//!
//! Nobody leaves the collective before every rank has contributed, which is
//! the same synchronisation point as the shared-memory join barrier.
//!
//! A rank that panics closes every channel while unwinding, so peers blocked
//! in a collective get [`ReduceError::Disconnected`] instead of hanging.

use std::sync::Arc;

use async_channel::{Receiver, Sender};
use tracing::trace;

use super::{Communicator, ReduceError, ROOT_RANK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Envelope {
    Contribution { from: usize, value: u64 },
    Release { total: u64 },
}

/// One rank's endpoint in a channel world.
#[derive(Debug)]
pub struct ChannelCommunicator {
    rank: usize,
    inbox: Receiver<Envelope>,
    peers: Arc<[Sender<Envelope>]>,
}

/// Closes every channel of a world, failing all pending collectives.
#[derive(Clone, Debug)]
pub struct WorldAbortHandle {
    peers: Arc<[Sender<Envelope>]>,
}

impl WorldAbortHandle {
    /// Closes every inbox in the world.
    pub fn abort(&self) {
        for sender in self.peers.iter() {
            sender.close();
        }
    }
}

/// Creates a world of `size` connected communicators, indexed by rank.
///
/// # Examples
///
/// ```rust
/// use estimator_engine::dist::{channel_world, Communicator};
///
/// let world = channel_world(3);
/// let totals: Vec<u64> = std::thread::scope(|s| {
///     let handles: Vec<_> = world
///         .into_iter()
///         .map(|comm| s.spawn(move || comm.all_reduce_sum(comm.rank() as u64 + 1).unwrap()))
///         .collect();
///     handles.into_iter().map(|h| h.join().unwrap()).collect()
/// });
/// assert_eq!(totals, vec![6, 6, 6]);
/// ```
pub fn channel_world(size: usize) -> Vec<ChannelCommunicator> {
    let (senders, receivers): (Vec<_>, Vec<_>) =
        (0..size).map(|_| async_channel::unbounded()).unzip();
    let peers: Arc<[Sender<Envelope>]> = senders.into();

    receivers
        .into_iter()
        .enumerate()
        .map(|(rank, inbox)| ChannelCommunicator {
            rank,
            inbox,
            peers: Arc::clone(&peers),
        })
        .collect()
}

impl ChannelCommunicator {
    /// Handle that can tear down the whole world.
    pub fn abort_handle(&self) -> WorldAbortHandle {
        WorldAbortHandle {
            peers: Arc::clone(&self.peers),
        }
    }

    fn recv(&self) -> Result<Envelope, ReduceError> {
        self.inbox
            .recv_blocking()
            .map_err(|_| ReduceError::Disconnected { rank: self.rank })
    }

    fn send(&self, to: usize, envelope: Envelope) -> Result<(), ReduceError> {
        self.peers[to]
            .send_blocking(envelope)
            .map_err(|_| ReduceError::Disconnected { rank: to })
    }

    /// Runs one reduction round and returns the total on every rank.
    fn combine(&self, local: u64, root: usize) -> Result<u64, ReduceError> {
        let size = self.size();
        if root >= size {
            return Err(ReduceError::InvalidRoot { root, size });
        }

        if self.rank != root {
            self.send(
                root,
                Envelope::Contribution {
                    from: self.rank,
                    value: local,
                },
            )?;
            return match self.recv()? {
                Envelope::Release { total } => Ok(total),
                Envelope::Contribution { from, .. } => Err(ReduceError::Protocol {
                    rank: self.rank,
                    detail: format!("contribution from rank {from} received by non-root"),
                }),
            };
        }

        let mut total = local;
        let mut seen = vec![false; size];
        seen[root] = true;
        for _ in 1..size {
            match self.recv()? {
                Envelope::Contribution { from, value } => {
                    if from >= size || seen[from] {
                        return Err(ReduceError::Protocol {
                            rank: self.rank,
                            detail: format!("unexpected contribution from rank {from}"),
                        });
                    }
                    seen[from] = true;
                    trace!(root, from, value, "Contribution received");
                    total += value;
                }
                Envelope::Release { .. } => {
                    return Err(ReduceError::Protocol {
                        rank: self.rank,
                        detail: "release received by root".to_string(),
                    });
                }
            }
        }

        for peer in (0..size).filter(|&peer| peer != root) {
            self.send(peer, Envelope::Release { total })?;
        }
        Ok(total)
    }
}

impl Communicator for ChannelCommunicator {
    #[inline]
    fn rank(&self) -> usize {
        self.rank
    }

    #[inline]
    fn size(&self) -> usize {
        self.peers.len()
    }

    fn reduce_sum(&self, local: u64, root: usize) -> Result<Option<u64>, ReduceError> {
        let total = self.combine(local, root)?;
        Ok((self.rank == root).then_some(total))
    }

    fn all_reduce_sum(&self, local: u64) -> Result<u64, ReduceError> {
        self.combine(local, ROOT_RANK)
    }
}

impl Drop for ChannelCommunicator {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.abort_handle().abort();
        }
    }
}
