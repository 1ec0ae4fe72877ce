//! # Estimator Engine (Layer 2: Parallel Execution)
//!
//! Parallel Monte Carlo estimation of the area enclosed by a curve.
//!
//! ## Layer 2 Role
//!
//! estimator_engine turns the pure geometry of `estimator_core` into a
//! parallel computation:
//! - Reproducible per-worker random streams ([`rng`])
//! - Sample budget splitting, samplers, workers and the shared-memory
//!   coordinator ([`mc`])
//! - Distributed participants joined by a blocking collective sum ([`dist`])
//!
//! ## Execution Models
//!
//! | Model | Units | Synchronisation |
//! |-------|-------|-----------------|
//! | Shared memory | rayon pool threads | join barrier, one result slot per worker |
//! | Distributed | ranks with private state | `reduce_sum` to rank 0 |
//!
//! Both models derive worker `i`'s seed from `(run_id, i)` only, so for the
//! same configuration and run id they produce the same estimate.
//!
//! ## Usage Example
//!
//! ```rust
//! use estimator_core::{Ellipse, Rectangle};
//! use estimator_engine::dist::launch_local_cluster;
//! use estimator_engine::mc::{Coordinator, EstimatorConfig};
//!
//! let config = EstimatorConfig::builder()
//!     .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
//!     .total_samples(40_000)
//!     .workers(4)
//!     .build()
//!     .unwrap();
//!
//! let shared = Coordinator::new(config.clone()).unwrap().run(9).unwrap();
//! let distributed = launch_local_cluster(&config, 9, &Ellipse::reference()).unwrap();
//!
//! assert_eq!(shared.total_inside(), distributed.total_inside());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dist;
pub mod mc;
pub mod rng;

// Re-export commonly used items for convenience
pub use dist::{launch_local_cluster, ChannelCommunicator, Communicator, ReduceError};
pub use mc::{
    Coordinator, EngineError, EstimatorConfig, RemainderPolicy, RunReport, WorkerResult,
};
pub use rng::SamplerRng;
