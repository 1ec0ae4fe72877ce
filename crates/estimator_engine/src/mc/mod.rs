//! Monte Carlo area estimation on a shared-memory worker pool.
//!
//! # Architecture
//!
//! ```text
//! Coordinator
//! ├── EstimatorConfig   (bounding box, budget, workers, remainder policy)
//! ├── SampleBudget      (per-worker shares and stream offsets)
//! ├── SamplerFactory    (one PointSampler per worker)
//! └── rayon ThreadPool
//!     └── run_share() per worker ──► WorkerResult slot
//! ```
//!
//! Workers never share mutable state. Each owns its sampler and writes only
//! its own result slot; the coordinator sums the slots after the join.
//!
//! # Examples
//!
//! ```rust
//! use estimator_core::Rectangle;
//! use estimator_engine::mc::{Coordinator, EstimatorConfig, RemainderPolicy};
//!
//! let config = EstimatorConfig::builder()
//!     .bounding_box(Rectangle::new(-100, -50, 100, 50).unwrap())
//!     .total_samples(100_001)
//!     .workers(8)
//!     .remainder(RemainderPolicy::Spread)
//!     .build()
//!     .unwrap();
//!
//! let report = Coordinator::new(config).unwrap().run(2024).unwrap();
//! assert_eq!(report.samples_drawn(), 100_001);
//! ```

pub mod budget;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod sampler;
pub mod worker;

// Re-exports for convenient access
pub use budget::{SampleBudget, WorkerShare};
pub use config::{
    EstimatorConfig, EstimatorConfigBuilder, RemainderPolicy, DEFAULT_WORKERS, MAX_WORKERS,
};
pub use coordinator::{Coordinator, RunPhase, RunReport};
pub use error::{ConfigError, EngineError};
pub use sampler::{
    BoxSampler, PointSampler, ReplaySampler, ReplaySamplers, SamplerFactory, SeededSamplers,
};
pub use worker::{count_inside, run_share, WorkerResult};
