//! Distributed command implementation
//!
//! Launches one participant per rank, each with private state, joined by a
//! collective sum to rank 0. Repeated iterations relaunch the whole world.

use std::time::{Duration, Instant};

use estimator_core::Ellipse;
use estimator_engine::dist::launch_local_cluster;
use tracing::info;

use super::{check_iterations, print_report, print_summary, resolve_run_id, EstimateArgs};
use crate::config::CliConfig;
use crate::Result;

/// Run the distributed command
pub fn run(settings: &CliConfig, args: &EstimateArgs, ranks: usize, iterations: u32) -> Result<()> {
    check_iterations(iterations)?;
    let config = args.to_config(settings, ranks)?;

    info!(
        samples = config.total_samples(),
        ranks = config.workers(),
        remainder = %config.remainder(),
        bounding_box = %config.bounding_box(),
        iterations,
        "Starting distributed estimation"
    );

    let curve = Ellipse::reference();
    let base_run_id = resolve_run_id(settings);

    let mut timings: Vec<Duration> = Vec::with_capacity(iterations as usize);
    for i in 0..iterations {
        let started = Instant::now();
        let report = launch_local_cluster(&config, base_run_id.wrapping_add(u64::from(i)), &curve)?;
        let elapsed = started.elapsed();

        print_report(i, &config.bounding_box(), &report, elapsed);
        timings.push(elapsed);
    }

    print_summary(&timings);
    Ok(())
}
