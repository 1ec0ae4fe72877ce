//! # Random Number Generation Infrastructure
//!
//! This module provides the per-worker random state used by the point
//! sampler.
//!
//! ## Design Rationale
//!
//! - **Ownership**: every worker owns its generator; no generator is ever
//!   shared between workers or reached through global state
//! - **Reproducibility**: seeds are a pure function of a run identifier and
//!   the worker id ([`derive_seed`]), so any run can be replayed exactly
//! - **Independence**: distinct worker ids always map to distinct seeds for
//!   the same run identifier
//!
//! ## Module Structure
//!
//! - [`prng`]: Seeded generator wrapper around `rand::rngs::StdRng`
//! - [`seed`]: Seed derivation from (run id, worker id)
//!
//! ## Usage Example
//!
//! ```rust
//! use estimator_engine::rng::{derive_seed, SamplerRng};
//!
//! let mut worker_0 = SamplerRng::for_worker(42, 0);
//! let mut worker_1 = SamplerRng::for_worker(42, 1);
//!
//! assert_eq!(worker_0.seed(), derive_seed(42, 0));
//! assert_ne!(worker_0.seed(), worker_1.seed());
//! let _ = (worker_0.next_raw(), worker_1.next_raw());
//! ```

pub mod prng;
pub mod seed;

pub use prng::SamplerRng;
pub use seed::derive_seed;

#[cfg(test)]
mod tests;
