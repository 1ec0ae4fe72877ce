//! Shared-memory command implementation
//!
//! Runs the estimation on a pool of worker threads. The pool is built once
//! and reused for every iteration; iteration `i` uses run id `base + i`.

use std::time::{Duration, Instant};

use estimator_engine::mc::Coordinator;
use tracing::info;

use super::{check_iterations, print_report, print_summary, resolve_run_id, EstimateArgs};
use crate::config::CliConfig;
use crate::Result;

/// Run the threads (or sequential, with `workers == 1`) command
pub fn run(settings: &CliConfig, args: &EstimateArgs, workers: usize, iterations: u32) -> Result<()> {
    check_iterations(iterations)?;
    let config = args.to_config(settings, workers)?;

    info!(
        samples = config.total_samples(),
        workers = config.workers(),
        remainder = %config.remainder(),
        bounding_box = %config.bounding_box(),
        iterations,
        "Starting shared-memory estimation"
    );

    let coordinator = Coordinator::new(config)?;
    let base_run_id = resolve_run_id(settings);

    let mut timings: Vec<Duration> = Vec::with_capacity(iterations as usize);
    for i in 0..iterations {
        let started = Instant::now();
        let report = coordinator.run(base_run_id.wrapping_add(u64::from(i)))?;
        let elapsed = started.elapsed();

        print_report(i, &coordinator.config().bounding_box(), &report, elapsed);
        timings.push(elapsed);
    }

    print_summary(&timings);
    Ok(())
}
