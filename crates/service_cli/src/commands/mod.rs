//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared helpers for
//! building the engine configuration and printing results live here.

pub mod distributed;
pub mod threads;

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Args;
use estimator_core::{AreaEstimate, Ellipse, Rectangle};
use estimator_engine::mc::{EstimatorConfig, RunReport};
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Positional arguments shared by every estimation command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EstimateArgs {
    /// Total number of random samples
    pub sample_count: u64,

    /// Left edge of the bounding box (inclusive)
    #[arg(allow_negative_numbers = true)]
    pub left: i32,

    /// Bottom edge of the bounding box (inclusive)
    #[arg(allow_negative_numbers = true)]
    pub bottom: i32,

    /// Right edge of the bounding box (exclusive)
    #[arg(allow_negative_numbers = true)]
    pub right: i32,

    /// Top edge of the bounding box (exclusive)
    #[arg(allow_negative_numbers = true)]
    pub top: i32,
}

impl EstimateArgs {
    /// Builds the validated engine configuration for `workers` workers.
    pub fn to_config(&self, settings: &CliConfig, workers: usize) -> Result<EstimatorConfig> {
        let bounding_box = Rectangle::new(self.left, self.bottom, self.right, self.top)?;
        let config = EstimatorConfig::builder()
            .bounding_box(bounding_box)
            .total_samples(self.sample_count)
            .workers(workers)
            .remainder(settings.remainder)
            .build()?;
        Ok(config)
    }
}

/// Rejects a zero iteration count.
pub(crate) fn check_iterations(iterations: u32) -> Result<()> {
    if iterations == 0 {
        return Err(CliError::Usage(
            "iteration count must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Returns the configured run id, or draws one from the clock and logs it.
pub(crate) fn resolve_run_id(settings: &CliConfig) -> u64 {
    match settings.run_id {
        Some(run_id) => run_id,
        None => {
            let run_id = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default();
            info!(run_id, "No run id given; pass --run-id {run_id} to replay");
            run_id
        }
    }
}

/// Analytic area and absolute error of `estimate`, if `bounding_box`
/// encloses the whole reference ellipse.
pub(crate) fn reference_comparison(
    bounding_box: &Rectangle,
    estimate: &AreaEstimate,
) -> Option<(f64, f64)> {
    let reference = Ellipse::reference();
    reference.is_enclosed_by(bounding_box).then(|| {
        let area = reference.analytic_area();
        (area, estimate.abs_error(area))
    })
}

/// Prints one iteration's counts, estimate and timing.
pub(crate) fn print_report(
    iteration: u32,
    bounding_box: &Rectangle,
    report: &RunReport,
    elapsed: Duration,
) {
    let estimate = report.estimate();

    println!("Iteration {}", iteration + 1);
    for worker in report.workers() {
        println!(
            "  worker {:>4}: {} / {} inside",
            worker.worker_id, worker.inside, worker.samples
        );
    }
    println!(
        "  total inside: {} of {} samples",
        report.total_inside(),
        report.samples_requested()
    );
    println!("  area estimate: {:.6}", estimate.value());
    match reference_comparison(bounding_box, estimate) {
        Some((area, error)) => {
            println!("  analytic area: {area:.6} (abs error {error:.6})")
        }
        None => println!("  analytic area: n/a (box {bounding_box} clips the ellipse)"),
    }
    println!("  time: {:.6} s", elapsed.as_secs_f64());
}

/// Prints the average time per iteration.
pub(crate) fn print_summary(timings: &[Duration]) {
    if timings.is_empty() {
        return;
    }
    let total: f64 = timings.iter().map(Duration::as_secs_f64).sum();
    println!(
        "Average time over {} iteration(s): {:.6} s",
        timings.len(),
        total / timings.len() as f64
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use estimator_core::estimate_area;
    use estimator_engine::mc::RemainderPolicy;

    fn args(samples: u64, right: i32) -> EstimateArgs {
        EstimateArgs {
            sample_count: samples,
            left: -100,
            bottom: -50,
            right,
            top: 50,
        }
    }

    #[test]
    fn test_to_config() {
        let settings = CliConfig {
            remainder: RemainderPolicy::Spread,
            ..Default::default()
        };
        let config = args(1_000, 100).to_config(&settings, 4).unwrap();
        assert_eq!(config.total_samples(), 1_000);
        assert_eq!(config.workers(), 4);
        assert_eq!(config.remainder(), RemainderPolicy::Spread);
        assert_eq!(config.bounding_box().area(), 20_000.0);
    }

    #[test]
    fn test_degenerate_box_is_geometry_error() {
        let err = args(1_000, -100)
            .to_config(&CliConfig::default(), 1)
            .unwrap_err();
        assert!(matches!(err, CliError::Geometry(_)));
    }

    #[test]
    fn test_zero_samples_is_engine_error() {
        let err = args(0, 100).to_config(&CliConfig::default(), 1).unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }

    #[test]
    fn test_fixed_run_id_is_used() {
        let settings = CliConfig {
            run_id: Some(5),
            ..Default::default()
        };
        assert_eq!(resolve_run_id(&settings), 5);
    }

    #[test]
    fn test_reference_comparison_for_enclosing_box() {
        let rect = Rectangle::new(-100, -50, 101, 51).unwrap();
        let estimate = estimate_area(7_854, &rect, 10_000).unwrap();
        let (area, error) = reference_comparison(&rect, &estimate).unwrap();
        assert_relative_eq!(area, std::f64::consts::PI * 5_000.0, epsilon = 1e-9);
        assert_relative_eq!(error, (estimate.value() - area).abs(), epsilon = 1e-9);
    }

    #[test]
    fn test_reference_comparison_skipped_for_clipped_box() {
        // quarter ellipse: comparing against the full area would be meaningless
        let quarter = Rectangle::new(0, 0, 100, 100).unwrap();
        let estimate = estimate_area(3_990, &quarter, 10_000).unwrap();
        assert_eq!(reference_comparison(&quarter, &estimate), None);

        let exclusive_edges = Rectangle::new(-100, -50, 100, 50).unwrap();
        let estimate = estimate_area(7_854, &exclusive_edges, 10_000).unwrap();
        assert_eq!(reference_comparison(&exclusive_edges, &estimate), None);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        assert!(matches!(check_iterations(0), Err(CliError::Usage(_))));
        assert!(check_iterations(1).is_ok());
    }
}
